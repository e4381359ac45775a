//! Blocking HTTP interpreter backed by a Gemini-compatible endpoint.
//!
//! The API key is read from the `GEMINI_API_KEY` environment variable at
//! construction and is sent as a header only; it is never logged or included
//! in error messages.

use crate::{intent_from_text, InterpreterError, PlanInterpreter, PlanIntent, PlanRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const API_KEY_VAR: &str = "GEMINI_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Plan interpreter speaking the Gemini `generateContent` protocol.
pub struct GeminiInterpreter {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiInterpreter {
    /// Build a client using `GEMINI_API_KEY` from the process environment.
    pub fn from_env() -> Result<GeminiInterpreter, InterpreterError> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| InterpreterError::Unavailable(format!("{API_KEY_VAR} is not set")))?;
        Self::with_key(DEFAULT_ENDPOINT.to_string(), api_key)
    }

    pub fn with_key(endpoint: String, api_key: String) -> Result<GeminiInterpreter, InterpreterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InterpreterError::Unavailable(e.to_string()))?;
        Ok(GeminiInterpreter {
            client,
            endpoint,
            api_key,
        })
    }

    fn prompt(request: &PlanRequest) -> String {
        let snapshot = request
            .state_summary
            .iter()
            .map(|(metric, value)| format!("{metric}={value:.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are the game master of a startup survival simulation. \
             Month {month}. Company snapshot: {snapshot}.\n\
             The player's plan for this month:\n{plan}\n\n\
             Reply with a single JSON object and nothing else:\n\
             {{\"title\": str, \"tag\": one of growth|efficiency|reliability|compliance|\
             fundraising|people|product|sales|marketing|security, \
             \"risk\": one of low|med|high, \"steps\": [3-5 short strings], \
             \"delayed_seed\": short phrase, \"result\": one paragraph}}",
            month = request.month,
            snapshot = snapshot,
            plan = request.free_text.trim(),
        )
    }
}

impl PlanInterpreter for GeminiInterpreter {
    fn interpret(&self, request: &PlanRequest) -> Result<PlanIntent, InterpreterError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(request),
                }],
            }],
            generation_config: json!({ "temperature": 0.4 }),
        };
        debug!(month = request.month, "sending plan to interpreter");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| InterpreterError::Unavailable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(InterpreterError::Unavailable(format!(
                "provider returned {status}"
            )));
        }
        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| InterpreterError::Malformed(e.to_string()))?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| InterpreterError::Malformed("empty response".to_string()))?;
        intent_from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn prompt_includes_month_and_plan() {
        let prompt = GeminiInterpreter::prompt(&PlanRequest {
            month: 4,
            state_summary: BTreeMap::new(),
            free_text: "Hire two support engineers".to_string(),
        });
        assert!(prompt.contains("Month 4"));
        assert!(prompt.contains("Hire two support engineers"));
        assert!(prompt.contains("\"risk\""));
    }
}
