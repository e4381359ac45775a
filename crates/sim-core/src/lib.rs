#![deny(warnings)]

//! Core domain models and invariants for Startup Survivor.
//!
//! This crate defines the serializable game state, the structured plan
//! effects applied to it, and the validation helpers that guarantee basic
//! invariants: metric keys are a closed set, numeric fields stay finite, and
//! bounded metrics are clamped to their configured ranges.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

pub mod rng;

/// Flag inserted into [`GameState::flags`] once the failure threshold is
/// crossed. A state carrying this flag rejects further turns.
pub const GAME_OVER_FLAG: &str = "game_over";

/// The closed set of metrics a plan effect may adjust.
///
/// Unknown keys coming from outside (interpreter output, mods) are rejected
/// by [`validate_effect`]; they are never silently applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Cash reserves in USD. Unbounded below; going under the configured
    /// floor ends the game.
    Cash,
    /// Monthly recurring revenue in USD (floor 0).
    Mrr,
    /// Public reputation index.
    Reputation,
    /// Support queue pressure index.
    SupportLoad,
    /// Infrastructure pressure index.
    InfraLoad,
    /// Monthly customer churn rate.
    Churn,
    /// Team morale index.
    Morale,
    /// Accumulated technical debt index.
    TechDebt,
}

impl Metric {
    /// All metrics in canonical order.
    pub const ALL: [Metric; 8] = [
        Metric::Cash,
        Metric::Mrr,
        Metric::Reputation,
        Metric::SupportLoad,
        Metric::InfraLoad,
        Metric::Churn,
        Metric::Morale,
        Metric::TechDebt,
    ];

    /// Canonical snake_case key used in wire formats and delta maps.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Cash => "cash",
            Metric::Mrr => "mrr",
            Metric::Reputation => "reputation",
            Metric::SupportLoad => "support_load",
            Metric::InfraLoad => "infra_load",
            Metric::Churn => "churn",
            Metric::Morale => "morale",
            Metric::TechDebt => "tech_debt",
        }
    }

    /// Parse a canonical key. Returns `None` for anything else.
    pub fn parse(key: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.key() == key)
    }

    /// Money metrics are stored as [`Decimal`]; the rest are indices.
    pub fn is_money(self) -> bool {
        matches!(self, Metric::Cash | Metric::Mrr)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Signed numeric adjustments keyed by metric.
pub type Delta = BTreeMap<Metric, f64>;

/// Focus area of a decision. Drives which delta template is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Growth,
    Efficiency,
    Reliability,
    Compliance,
    Fundraising,
    People,
    Product,
    Sales,
    Marketing,
    Security,
}

impl Tag {
    pub const ALL: [Tag; 10] = [
        Tag::Growth,
        Tag::Efficiency,
        Tag::Reliability,
        Tag::Compliance,
        Tag::Fundraising,
        Tag::People,
        Tag::Product,
        Tag::Sales,
        Tag::Marketing,
        Tag::Security,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Tag::Growth => "growth",
            Tag::Efficiency => "efficiency",
            Tag::Reliability => "reliability",
            Tag::Compliance => "compliance",
            Tag::Fundraising => "fundraising",
            Tag::People => "people",
            Tag::Product => "product",
            Tag::Sales => "sales",
            Tag::Marketing => "marketing",
            Tag::Security => "security",
        }
    }

    pub fn parse(key: &str) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|t| t.key() == key)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Risk level of a decision; drives delayed-effect probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Low,
    Med,
    High,
}

impl Risk {
    pub fn key(self) -> &'static str {
        match self {
            Risk::Low => "low",
            Risk::Med => "med",
            Risk::High => "high",
        }
    }

    pub fn parse(key: &str) -> Option<Risk> {
        match key {
            "low" => Some(Risk::Low),
            "med" => Some(Risk::Med),
            "high" => Some(Risk::High),
            _ => None,
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Primary game metrics at a point in time.
///
/// Money is held as [`Decimal`]; bounded indices as `f32`. Clamping rules are
/// applied by [`apply_delta`], not by this struct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Cash reserves in USD.
    pub cash: Decimal,
    /// Monthly recurring revenue in USD.
    pub mrr: Decimal,
    /// Reputation index (bounded).
    pub reputation: f32,
    /// Support queue pressure (bounded).
    pub support_load: f32,
    /// Infrastructure pressure (bounded).
    pub infra_load: f32,
    /// Monthly churn rate (bounded).
    pub churn: f32,
    /// Team morale (bounded).
    pub morale: f32,
    /// Technical debt (bounded).
    pub tech_debt: f32,
}

impl Stats {
    /// Read a metric as `f64` for summaries and interpreter context.
    pub fn metric(&self, m: Metric) -> f64 {
        match m {
            Metric::Cash => self.cash.to_f64().unwrap_or(0.0),
            Metric::Mrr => self.mrr.to_f64().unwrap_or(0.0),
            Metric::Reputation => f64::from(self.reputation),
            Metric::SupportLoad => f64::from(self.support_load),
            Metric::InfraLoad => f64::from(self.infra_load),
            Metric::Churn => f64::from(self.churn),
            Metric::Morale => f64::from(self.morale),
            Metric::TechDebt => f64::from(self.tech_debt),
        }
    }

    /// Snapshot all metrics as a plain map.
    pub fn to_map(&self) -> BTreeMap<Metric, f64> {
        Metric::ALL.iter().map(|&m| (m, self.metric(m))).collect()
    }
}

/// Inclusive clamp range for one bounded metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub lo: f32,
    pub hi: f32,
}

impl MetricRange {
    pub fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }
}

/// Configurable clamp ranges and the cash failure floor.
///
/// Exact ranges are a balancing decision, so they are configuration inputs
/// to the engine rather than hard-coded constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub reputation: MetricRange,
    pub support_load: MetricRange,
    pub infra_load: MetricRange,
    pub churn: MetricRange,
    pub morale: MetricRange,
    pub tech_debt: MetricRange,
    /// Cash strictly below this value marks the state terminal.
    pub fail_cash_floor: Decimal,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            reputation: MetricRange::new(0.0, 100.0),
            support_load: MetricRange::new(0.0, 100.0),
            infra_load: MetricRange::new(0.0, 100.0),
            churn: MetricRange::new(0.0, 0.50),
            morale: MetricRange::new(0.0, 100.0),
            tech_debt: MetricRange::new(0.0, 100.0),
            fail_cash_floor: Decimal::ZERO,
        }
    }
}

impl Bounds {
    /// Clamp range for a metric. `None` for `cash`, which is unbounded;
    /// `mrr` only has a floor at zero.
    pub fn range(&self, m: Metric) -> Option<MetricRange> {
        match m {
            Metric::Cash | Metric::Mrr => None,
            Metric::Reputation => Some(self.reputation),
            Metric::SupportLoad => Some(self.support_load),
            Metric::InfraLoad => Some(self.infra_load),
            Metric::Churn => Some(self.churn),
            Metric::Morale => Some(self.morale),
            Metric::TechDebt => Some(self.tech_debt),
        }
    }
}

/// Size limits applied when validating untrusted effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum narrative length in characters.
    pub max_narrative_chars: usize,
    /// Maximum months a delayed effect may be deferred.
    pub max_delay_months: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_narrative_chars: 2_000,
            max_delay_months: 24,
        }
    }
}

/// A delta scheduled to land a fixed number of months after its source turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedSpec {
    /// Months after the source turn (>= 1).
    pub delay_months: u32,
    pub deltas: Delta,
    pub description: String,
}

/// A [`DelayedSpec`] anchored to an absolute month and queued on the state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub due_month: u32,
    pub deltas: Delta,
    pub hint: String,
    pub from_month: u32,
}

/// A validated, structured decision ready for resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEffect {
    /// Signed adjustments per metric.
    pub deltas: Delta,
    /// Flags to add to the state (idempotent).
    pub unlocks: BTreeSet<String>,
    /// Result narrative shown to the player.
    pub narrative: String,
    /// Effects that land in later months.
    pub delayed: Vec<DelayedSpec>,
}

/// Untrusted effect as produced by an external interpreter, before
/// validation. String-keyed so unknown metrics can be rejected explicitly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEffect {
    #[serde(default)]
    pub deltas: BTreeMap<String, f64>,
    #[serde(default)]
    pub unlocks: Vec<String>,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub delayed: Vec<RawDelayedSpec>,
}

/// Untrusted delayed-effect entry inside a [`RawEffect`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDelayedSpec {
    #[serde(default)]
    pub delay_months: i64,
    #[serde(default)]
    pub deltas: BTreeMap<String, f64>,
    #[serde(default)]
    pub description: String,
}

/// Full mutable snapshot of simulation progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Month index; strictly increases by 1 per resolved turn.
    pub month: u32,
    pub stats: Stats,
    /// Unlocked flags, including the terminal [`GAME_OVER_FLAG`].
    pub flags: BTreeSet<String>,
    /// Pending delayed effects.
    pub delayed: Vec<DelayedEffect>,
    /// Effects applied so far, in order.
    pub history: Vec<PlanEffect>,
}

impl GameState {
    pub fn new(month: u32, stats: Stats) -> Self {
        Self {
            month,
            stats,
            flags: BTreeSet::new(),
            delayed: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Baseline campaign start. Kept here so headless tests and callers
    /// share the same numbers.
    pub fn default_start() -> Self {
        Self::new(
            1,
            Stats {
                cash: Decimal::new(550_000, 0),
                mrr: Decimal::new(900, 0),
                reputation: 50.0,
                support_load: 22.0,
                infra_load: 22.0,
                churn: 0.055,
                morale: 58.0,
                tech_debt: 22.0,
            },
        )
    }

    /// A terminal state rejects further turns.
    pub fn is_terminal(&self) -> bool {
        self.flags.contains(GAME_OVER_FLAG)
    }
}

/// Validation errors for effects and domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Delta key is not a known metric.
    #[error("unknown metric key: {0}")]
    UnknownMetric(String),
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Narrative exceeds the configured length limit.
    #[error("narrative too long: {len} chars (max {max})")]
    NarrativeTooLong { len: usize, max: usize },
    /// Delayed effect must land between 1 and the configured maximum.
    #[error("invalid delay: {0} months")]
    InvalidDelay(i64),
    /// Unlock flag names must be non-empty.
    #[error("empty unlock flag name")]
    EmptyFlag,
}

/// One in-range correction applied during delta application.
///
/// Clamping is not an error; it is recorded for transparency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClampEvent {
    pub metric: Metric,
    /// Value the delta would have produced.
    pub attempted: f64,
    /// Boundary value actually stored.
    pub clamped: f64,
}

fn validate_deltas(raw: &BTreeMap<String, f64>) -> Result<Delta, ValidationError> {
    let mut out = Delta::new();
    for (key, value) in raw {
        let metric =
            Metric::parse(key).ok_or_else(|| ValidationError::UnknownMetric(key.clone()))?;
        if !value.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        out.insert(metric, *value);
    }
    Ok(out)
}

/// Normalize and sanity-check an untrusted effect.
///
/// Fails fast instead of guessing defaults; the caller decides fallback
/// behavior. On success the returned [`PlanEffect`] is safe to resolve.
pub fn validate_effect(raw: &RawEffect, limits: &Limits) -> Result<PlanEffect, ValidationError> {
    let narrative = raw.narrative.trim();
    let len = narrative.chars().count();
    if len > limits.max_narrative_chars {
        return Err(ValidationError::NarrativeTooLong {
            len,
            max: limits.max_narrative_chars,
        });
    }

    let deltas = validate_deltas(&raw.deltas)?;

    let mut unlocks = BTreeSet::new();
    for flag in &raw.unlocks {
        let flag = flag.trim();
        if flag.is_empty() {
            return Err(ValidationError::EmptyFlag);
        }
        unlocks.insert(flag.to_string());
    }

    let mut delayed = Vec::with_capacity(raw.delayed.len());
    for spec in &raw.delayed {
        if spec.delay_months < 1 || spec.delay_months > i64::from(limits.max_delay_months) {
            return Err(ValidationError::InvalidDelay(spec.delay_months));
        }
        delayed.push(DelayedSpec {
            delay_months: spec.delay_months as u32,
            deltas: validate_deltas(&spec.deltas)?,
            description: spec.description.trim().to_string(),
        });
    }

    Ok(PlanEffect {
        deltas,
        unlocks,
        narrative: narrative.to_string(),
        delayed,
    })
}

/// Re-check the invariants of an already-typed effect.
///
/// Catalog effects are built in-process, but the engine still refuses to
/// apply non-finite numbers or oversized narratives from any source.
pub fn check_effect(effect: &PlanEffect, limits: &Limits) -> Result<(), ValidationError> {
    let len = effect.narrative.chars().count();
    if len > limits.max_narrative_chars {
        return Err(ValidationError::NarrativeTooLong {
            len,
            max: limits.max_narrative_chars,
        });
    }
    if effect.deltas.values().any(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite);
    }
    for spec in &effect.delayed {
        if spec.delay_months < 1 || spec.delay_months > limits.max_delay_months {
            return Err(ValidationError::InvalidDelay(i64::from(spec.delay_months)));
        }
        if spec.deltas.values().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite);
        }
    }
    Ok(())
}

fn add_money(current: Decimal, delta: Option<&f64>) -> Result<Decimal, ValidationError> {
    match delta {
        None => Ok(current),
        Some(v) => {
            let d = Decimal::from_f64(*v).ok_or(ValidationError::NonFinite)?;
            Ok(current + d)
        }
    }
}

fn apply_money_floor(
    metric: Metric,
    current: Decimal,
    delta: Option<&f64>,
    clamps: &mut Vec<ClampEvent>,
) -> Result<Decimal, ValidationError> {
    let next = add_money(current, delta)?;
    if next < Decimal::ZERO {
        clamps.push(ClampEvent {
            metric,
            attempted: next.to_f64().unwrap_or(0.0),
            clamped: 0.0,
        });
        return Ok(Decimal::ZERO);
    }
    Ok(next)
}

fn apply_index(
    metric: Metric,
    current: f32,
    delta: Option<&f64>,
    range: MetricRange,
    clamps: &mut Vec<ClampEvent>,
) -> Result<f32, ValidationError> {
    let delta = match delta {
        None => 0.0,
        Some(v) if v.is_finite() => *v,
        Some(_) => return Err(ValidationError::NonFinite),
    };
    let attempted = f64::from(current) + delta;
    let clamped = attempted.clamp(f64::from(range.lo), f64::from(range.hi));
    if clamped != attempted {
        clamps.push(ClampEvent {
            metric,
            attempted,
            clamped,
        });
    }
    Ok(clamped as f32)
}

/// Apply a delta with clamp rules. Pure function.
///
/// An adjustment that would drive a bounded metric outside its range is
/// clamped to the boundary, not dropped, and the clamp is reported back.
pub fn apply_delta(
    stats: &Stats,
    delta: &Delta,
    bounds: &Bounds,
) -> Result<(Stats, Vec<ClampEvent>), ValidationError> {
    let mut clamps = Vec::new();
    let next = Stats {
        cash: add_money(stats.cash, delta.get(&Metric::Cash))?,
        mrr: apply_money_floor(Metric::Mrr, stats.mrr, delta.get(&Metric::Mrr), &mut clamps)?,
        reputation: apply_index(
            Metric::Reputation,
            stats.reputation,
            delta.get(&Metric::Reputation),
            bounds.reputation,
            &mut clamps,
        )?,
        support_load: apply_index(
            Metric::SupportLoad,
            stats.support_load,
            delta.get(&Metric::SupportLoad),
            bounds.support_load,
            &mut clamps,
        )?,
        infra_load: apply_index(
            Metric::InfraLoad,
            stats.infra_load,
            delta.get(&Metric::InfraLoad),
            bounds.infra_load,
            &mut clamps,
        )?,
        churn: apply_index(
            Metric::Churn,
            stats.churn,
            delta.get(&Metric::Churn),
            bounds.churn,
            &mut clamps,
        )?,
        morale: apply_index(
            Metric::Morale,
            stats.morale,
            delta.get(&Metric::Morale),
            bounds.morale,
            &mut clamps,
        )?,
        tech_debt: apply_index(
            Metric::TechDebt,
            stats.tech_debt,
            delta.get(&Metric::TechDebt),
            bounds.tech_debt,
            &mut clamps,
        )?,
    };
    Ok((next, clamps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base_stats() -> Stats {
        GameState::default_start().stats
    }

    #[test]
    fn metric_keys_roundtrip() {
        for m in Metric::ALL {
            assert_eq!(Metric::parse(m.key()), Some(m));
        }
        assert_eq!(Metric::parse("vibes"), None);
    }

    #[test]
    fn state_serde_roundtrip() {
        let mut state = GameState::default_start();
        state.flags.insert("seed_round".to_string());
        state.delayed.push(DelayedEffect {
            due_month: 3,
            deltas: Delta::from([(Metric::Cash, -1_000.0)]),
            hint: "vendor invoice".to_string(),
            from_month: 1,
        });
        let s = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&s).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn validate_rejects_unknown_metric() {
        let raw = RawEffect {
            deltas: BTreeMap::from([("cash".to_string(), 500.0), ("karma".to_string(), 1.0)]),
            ..RawEffect::default()
        };
        let err = validate_effect(&raw, &Limits::default()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownMetric("karma".to_string()));
    }

    #[test]
    fn validate_rejects_non_finite() {
        let raw = RawEffect {
            deltas: BTreeMap::from([("morale".to_string(), f64::NAN)]),
            ..RawEffect::default()
        };
        assert_eq!(
            validate_effect(&raw, &Limits::default()).unwrap_err(),
            ValidationError::NonFinite
        );
    }

    #[test]
    fn validate_rejects_long_narrative() {
        let raw = RawEffect {
            narrative: "x".repeat(3_000),
            ..RawEffect::default()
        };
        assert!(matches!(
            validate_effect(&raw, &Limits::default()).unwrap_err(),
            ValidationError::NarrativeTooLong { len: 3_000, .. }
        ));
    }

    #[test]
    fn validate_rejects_bad_delay() {
        let raw = RawEffect {
            delayed: vec![RawDelayedSpec {
                delay_months: 0,
                ..RawDelayedSpec::default()
            }],
            ..RawEffect::default()
        };
        assert_eq!(
            validate_effect(&raw, &Limits::default()).unwrap_err(),
            ValidationError::InvalidDelay(0)
        );
    }

    #[test]
    fn validate_accepts_well_formed_effect() {
        let raw = RawEffect {
            deltas: BTreeMap::from([("cash".to_string(), 500.0), ("morale".to_string(), 2.0)]),
            unlocks: vec!["press_coverage".to_string()],
            narrative: "Launch went fine.".to_string(),
            delayed: vec![RawDelayedSpec {
                delay_months: 2,
                deltas: BTreeMap::from([("churn".to_string(), 0.01)]),
                description: "support backlog".to_string(),
            }],
        };
        let effect = validate_effect(&raw, &Limits::default()).unwrap();
        assert_eq!(effect.deltas[&Metric::Cash], 500.0);
        assert!(effect.unlocks.contains("press_coverage"));
        assert_eq!(effect.delayed[0].delay_months, 2);
    }

    #[test]
    fn clamp_is_recorded_at_boundary() {
        let bounds = Bounds::default();
        let delta = Delta::from([(Metric::Morale, 500.0)]);
        let (next, clamps) = apply_delta(&base_stats(), &delta, &bounds).unwrap();
        assert_eq!(next.morale, 100.0);
        assert_eq!(clamps.len(), 1);
        assert_eq!(clamps[0].metric, Metric::Morale);
        assert_eq!(clamps[0].clamped, 100.0);
    }

    #[test]
    fn cash_may_go_negative_without_clamp() {
        let bounds = Bounds::default();
        let delta = Delta::from([(Metric::Cash, -1_000_000.0)]);
        let (next, clamps) = apply_delta(&base_stats(), &delta, &bounds).unwrap();
        assert!(next.cash < Decimal::ZERO);
        assert!(clamps.is_empty());
    }

    #[test]
    fn mrr_floors_at_zero() {
        let bounds = Bounds::default();
        let delta = Delta::from([(Metric::Mrr, -5_000.0)]);
        let (next, clamps) = apply_delta(&base_stats(), &delta, &bounds).unwrap();
        assert_eq!(next.mrr, Decimal::ZERO);
        assert_eq!(clamps[0].metric, Metric::Mrr);
    }

    proptest! {
        #[test]
        fn bounded_metrics_stay_in_range(
            rep in -500.0f64..500.0,
            churn in -1.0f64..1.0,
            morale in -500.0f64..500.0,
            debt in -500.0f64..500.0,
        ) {
            let bounds = Bounds::default();
            let delta = Delta::from([
                (Metric::Reputation, rep),
                (Metric::Churn, churn),
                (Metric::Morale, morale),
                (Metric::TechDebt, debt),
            ]);
            let (next, _) = apply_delta(&base_stats(), &delta, &bounds).unwrap();
            prop_assert!((0.0..=100.0).contains(&next.reputation));
            prop_assert!((0.0..=0.50).contains(&next.churn));
            prop_assert!((0.0..=100.0).contains(&next.morale));
            prop_assert!((0.0..=100.0).contains(&next.tech_debt));
        }

        #[test]
        fn apply_delta_is_deterministic(cash in -100_000.0f64..100_000.0, morale in -50.0f64..50.0) {
            let bounds = Bounds::default();
            let delta = Delta::from([(Metric::Cash, cash), (Metric::Morale, morale)]);
            let a = apply_delta(&base_stats(), &delta, &bounds).unwrap();
            let b = apply_delta(&base_stats(), &delta, &bounds).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
