//! Draft schemas and lenient normalization for authored and model-produced
//! content.
//!
//! Normalizers accept the loose vocabulary interpreters tend to emit
//! ("funding", "hiring", "medium") and map it onto the closed enums; anything
//! unrecognizable stays `None` so the caller can fail explicitly.

use serde::{Deserialize, Serialize};
use sim_core::{Risk, Tag};
use std::fmt;
use thiserror::Error;

/// Option slot within a month. `You` is reserved for player plans and never
/// appears in the authored catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionId {
    A,
    B,
    C,
    You,
}

impl OptionId {
    pub fn key(self) -> &'static str {
        match self {
            OptionId::A => "A",
            OptionId::B => "B",
            OptionId::C => "C",
            OptionId::You => "YOU",
        }
    }

    pub fn parse(key: &str) -> Option<OptionId> {
        match key.trim().to_ascii_uppercase().as_str() {
            "A" => Some(OptionId::A),
            "B" => Some(OptionId::B),
            "C" => Some(OptionId::C),
            "YOU" => Some(OptionId::You),
            _ => None,
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One authored decision option: narrative intent only, no deltas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionDraft {
    pub id: OptionId,
    pub title: String,
    pub tag: Tag,
    pub risk: Risk,
    pub steps: Vec<String>,
    /// Short phrase seeding the delayed-effect hint.
    #[serde(default)]
    pub delayed_seed: String,
    /// What happens if this option is chosen.
    #[serde(default)]
    pub result: String,
}

/// One authored month: situation, crisis, and 2-3 options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthDraft {
    pub month: u32,
    pub title: String,
    pub context: String,
    pub crisis_title: String,
    pub crisis: String,
    pub options: Vec<OptionDraft>,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub cliffhanger: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// Draft validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("month {0}: title too short")]
    TitleTooShort(u32),
    #[error("month {0}: context too short")]
    ContextTooShort(u32),
    #[error("month {0}: crisis too short")]
    CrisisTooShort(u32),
    #[error("month {0}: needs 2-3 options, got {1}")]
    BadOptionCount(u32, usize),
    #[error("month {0}: duplicate option id {1}")]
    DuplicateOption(u32, OptionId),
    #[error("month {0}: player slot YOU is not an authorable option")]
    ReservedOption(u32),
    #[error("month {0} option {1}: title too short")]
    OptionTitleTooShort(u32, OptionId),
    #[error("month {0} option {1}: needs at least 3 steps")]
    TooFewSteps(u32, OptionId),
}

/// Validate an authored month draft.
pub fn validate_draft(draft: &MonthDraft) -> Result<(), DraftError> {
    let m = draft.month;
    if draft.title.trim().chars().count() < 4 {
        return Err(DraftError::TitleTooShort(m));
    }
    if draft.context.trim().chars().count() < 80 {
        return Err(DraftError::ContextTooShort(m));
    }
    if draft.crisis_title.trim().chars().count() < 4 || draft.crisis.trim().chars().count() < 80 {
        return Err(DraftError::CrisisTooShort(m));
    }
    if draft.options.len() < 2 || draft.options.len() > 3 {
        return Err(DraftError::BadOptionCount(m, draft.options.len()));
    }
    let mut seen = Vec::new();
    for opt in &draft.options {
        if opt.id == OptionId::You {
            return Err(DraftError::ReservedOption(m));
        }
        if seen.contains(&opt.id) {
            return Err(DraftError::DuplicateOption(m, opt.id));
        }
        seen.push(opt.id);
        if opt.title.trim().chars().count() < 3 {
            return Err(DraftError::OptionTitleTooShort(m, opt.id));
        }
        if clean_steps(opt.steps.iter().cloned()).len() < 3 {
            return Err(DraftError::TooFewSteps(m, opt.id));
        }
    }
    Ok(())
}

/// Map a loose tag string onto the closed [`Tag`] set.
pub fn normalize_tag(raw: &str) -> Option<Tag> {
    let t = raw.trim().to_ascii_lowercase();
    if let Some(tag) = Tag::parse(&t) {
        return Some(tag);
    }
    match t.as_str() {
        "funding" | "investment" | "investor" | "raise" => Some(Tag::Fundraising),
        "hiring" | "team" | "hr" => Some(Tag::People),
        "infra" | "infrastructure" | "stability" | "ops" => Some(Tag::Reliability),
        "privacy" | "legal" | "regulatory" => Some(Tag::Compliance),
        "feature" | "features" | "engineering" => Some(Tag::Product),
        "revenue" | "deals" => Some(Tag::Sales),
        "ads" | "brand" | "pr" => Some(Tag::Marketing),
        "cost" | "costs" | "runway" => Some(Tag::Efficiency),
        "scaling" | "expansion" | "users" => Some(Tag::Growth),
        "infosec" | "hardening" => Some(Tag::Security),
        _ => None,
    }
}

/// Map a loose risk string onto the closed [`Risk`] set.
pub fn normalize_risk(raw: &str) -> Option<Risk> {
    let r = raw.trim().to_ascii_lowercase();
    if let Some(risk) = Risk::parse(&r) {
        return Some(risk);
    }
    match r.as_str() {
        "safe" | "conservative" | "minimal" => Some(Risk::Low),
        "medium" | "moderate" | "balanced" => Some(Risk::Med),
        "risky" | "aggressive" | "bold" => Some(Risk::High),
        _ => None,
    }
}

/// Trim bullet prefixes and drop empty entries.
pub fn clean_steps(steps: impl IntoIterator<Item = String>) -> Vec<String> {
    steps
        .into_iter()
        .map(|s| s.trim().trim_start_matches(['-', '*', '\u{2022}']).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
