#![deny(warnings)]

//! Free-text plan interpretation.
//!
//! A [`PlanInterpreter`] turns the player's free-text plan into a structured
//! [`PlanIntent`] (title, tag, risk, steps). Interpreters never produce
//! metric deltas; those are materialized deterministically by the engine, so
//! a flaky or adversarial provider can shape the narrative but not the math.
//!
//! Two implementations ship here: [`ScriptedInterpreter`], a deterministic
//! keyword mapper used by the headless runner and tests, and
//! [`http::GeminiInterpreter`], a blocking HTTP provider.

pub mod http;
pub mod jsonx;

use content::{clean_steps, normalize_risk, normalize_tag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sim_core::{Metric, Risk, Tag};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// What the interpreter sees: the month, a metric snapshot, and the plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanRequest {
    pub month: u32,
    pub state_summary: BTreeMap<Metric, f64>,
    pub free_text: String,
}

/// Structured reading of a free-text plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanIntent {
    pub title: String,
    pub tag: Tag,
    pub risk: Risk,
    pub steps: Vec<String>,
    /// Short phrase seeding the delayed-effect hint.
    pub delayed_seed: String,
    /// One-paragraph account of how the plan plays out.
    pub result: String,
}

/// Interpretation failures.
#[derive(Debug, Error)]
pub enum InterpreterError {
    /// Transport or provider failure; retrying may help.
    #[error("interpreter unavailable: {0}")]
    Unavailable(String),
    /// The provider answered but the answer cannot be used.
    #[error("malformed interpreter output: {0}")]
    Malformed(String),
}

/// A service that reads a plan and returns a structured intent.
pub trait PlanInterpreter {
    fn interpret(&self, request: &PlanRequest) -> Result<PlanIntent, InterpreterError>;
}

/// Build a [`PlanIntent`] from a recovered JSON object, normalizing loose
/// tag and risk vocabulary. Rejects intents with fewer than 3 usable steps
/// or a title under 3 characters.
pub fn intent_from_value(value: &Value) -> Result<PlanIntent, InterpreterError> {
    let obj = value
        .as_object()
        .ok_or_else(|| InterpreterError::Malformed("not a JSON object".to_string()))?;
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if title.chars().count() < 3 {
        return Err(InterpreterError::Malformed("missing or short title".to_string()));
    }
    let tag_raw = obj.get("tag").and_then(Value::as_str).unwrap_or_default();
    let tag = normalize_tag(tag_raw)
        .ok_or_else(|| InterpreterError::Malformed(format!("unusable tag {tag_raw:?}")))?;
    let risk_raw = obj.get("risk").and_then(Value::as_str).unwrap_or("med");
    let risk = normalize_risk(risk_raw)
        .ok_or_else(|| InterpreterError::Malformed(format!("unusable risk {risk_raw:?}")))?;
    let steps = clean_steps(
        obj.get("steps")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default(),
    );
    if steps.len() < 3 {
        return Err(InterpreterError::Malformed(format!(
            "needs at least 3 steps, got {}",
            steps.len()
        )));
    }
    let delayed_seed = obj
        .get("delayed_seed")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let result = obj
        .get("result")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    Ok(PlanIntent {
        title,
        tag,
        risk,
        steps,
        delayed_seed,
        result,
    })
}

/// Parse raw provider text into an intent via lenient JSON recovery.
pub fn intent_from_text(raw: &str) -> Result<PlanIntent, InterpreterError> {
    let value = jsonx::parse_lenient(raw)
        .ok_or_else(|| InterpreterError::Malformed("no JSON object in output".to_string()))?;
    intent_from_value(&value)
}

/// Call the interpreter, retrying once on a transport failure. Malformed
/// output is not retried; the provider already answered.
pub fn interpret_with_retry(
    interpreter: &dyn PlanInterpreter,
    request: &PlanRequest,
) -> Result<PlanIntent, InterpreterError> {
    match interpreter.interpret(request) {
        Err(InterpreterError::Unavailable(reason)) => {
            warn!(%reason, "interpreter unavailable, retrying once");
            interpreter.interpret(request)
        }
        other => other,
    }
}

/// Deterministic keyword-based interpreter for tests and headless runs.
///
/// Maps the plan text onto a tag via [`normalize_tag`]-style keyword
/// scanning, defaults risk by verb aggressiveness, and echoes the plan back
/// as the result narrative. No I/O, no randomness.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedInterpreter;

impl ScriptedInterpreter {
    fn guess_tag(text: &str) -> Tag {
        let lower = text.to_ascii_lowercase();
        for tag in Tag::ALL {
            if lower.contains(tag.key()) {
                return tag;
            }
        }
        const HINTS: [(&str, Tag); 10] = [
            ("hire", Tag::People),
            ("fire", Tag::People),
            ("invest", Tag::Fundraising),
            ("raise", Tag::Fundraising),
            ("cut", Tag::Efficiency),
            ("cost", Tag::Efficiency),
            ("market", Tag::Marketing),
            ("sell", Tag::Sales),
            ("infra", Tag::Reliability),
            ("ship", Tag::Product),
        ];
        for (needle, tag) in HINTS {
            if lower.contains(needle) {
                return tag;
            }
        }
        Tag::Product
    }

    fn guess_risk(text: &str) -> Risk {
        let lower = text.to_ascii_lowercase();
        const BOLD: [&str; 5] = ["all in", "aggressive", "double", "bet", "gamble"];
        const SAFE: [&str; 4] = ["careful", "slow", "conservative", "safe"];
        if BOLD.iter().any(|w| lower.contains(w)) {
            Risk::High
        } else if SAFE.iter().any(|w| lower.contains(w)) {
            Risk::Low
        } else {
            Risk::Med
        }
    }
}

impl PlanInterpreter for ScriptedInterpreter {
    fn interpret(&self, request: &PlanRequest) -> Result<PlanIntent, InterpreterError> {
        let text = request.free_text.trim();
        if text.is_empty() {
            return Err(InterpreterError::Malformed("empty plan".to_string()));
        }
        let mut steps = clean_steps(
            text.split(['\n', '.', ';'])
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        );
        while steps.len() < 3 {
            steps.push(format!("Follow through on step {}", steps.len() + 1));
        }
        let title: String = text.chars().take(48).collect();
        Ok(PlanIntent {
            title,
            tag: Self::guess_tag(text),
            risk: Self::guess_risk(text),
            steps,
            delayed_seed: "player plan aftermath".to_string(),
            result: format!("The team executes the plan: {text}"),
        })
    }
}
