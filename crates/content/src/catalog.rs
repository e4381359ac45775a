//! Static scenario catalog: month index -> authored options.
//!
//! The built-in season is embedded YAML, parsed and validated once at
//! construction. Lookup past the authored content fails with
//! [`CatalogError::UnknownMonth`] instead of inventing a scenario.

use crate::schema::{validate_draft, DraftError, MonthDraft, OptionDraft, OptionId};
use serde::{Deserialize, Serialize};
use sim_core::{PlanEffect, Risk, Tag};
use sim_engine::Engine;
use std::collections::BTreeMap;
use tracing::info;
use thiserror::Error;

/// Catalog and materialization errors.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Month index exceeds the authored content.
    #[error("no authored scenario for month {0}")]
    UnknownMonth(u32),
    #[error("invalid catalog: {0}")]
    Parse(String),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Engine(#[from] sim_engine::EngineError),
}

/// An engine-ready option: authored intent plus a materialized effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub id: OptionId,
    pub label: String,
    pub tag: Tag,
    pub risk: Risk,
    pub steps: Vec<String>,
    /// Player-facing description (steps, risk, focus).
    pub description: String,
    pub effect: PlanEffect,
}

impl ScenarioOption {
    /// Materialize an option draft for a given month. Deterministic in
    /// `(engine seeds, month, option id)`.
    pub fn from_draft(
        engine: &Engine,
        month: u32,
        draft: &OptionDraft,
    ) -> Result<ScenarioOption, CatalogError> {
        let effect = engine.materialize(
            month,
            draft.id.key(),
            draft.tag,
            draft.risk,
            &draft.delayed_seed,
            draft.result.trim().to_string(),
        )?;
        Ok(ScenarioOption {
            id: draft.id,
            label: draft.title.clone(),
            tag: draft.tag,
            risk: draft.risk,
            steps: draft.steps.clone(),
            description: describe(draft),
            effect,
        })
    }
}

fn describe(opt: &OptionDraft) -> String {
    let steps = opt
        .steps
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{steps}\n\nRisk: {}\nFocus: {}", opt.risk, opt.tag)
}

/// Read-only table of authored monthly scenarios.
#[derive(Clone, Debug)]
pub struct Catalog {
    months: BTreeMap<u32, MonthDraft>,
}

impl Catalog {
    /// The built-in 12-month season.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Self::from_yaml(include_str!("../assets/catalog.yaml"))
    }

    /// Parse and validate a catalog from YAML text.
    pub fn from_yaml(text: &str) -> Result<Catalog, CatalogError> {
        let drafts: Vec<MonthDraft> =
            serde_yaml::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut months = BTreeMap::new();
        for draft in drafts {
            validate_draft(&draft)?;
            if months.insert(draft.month, draft).is_some() {
                return Err(CatalogError::Parse("duplicate month entry".to_string()));
            }
        }
        info!(months = months.len(), "scenario catalog loaded");
        Ok(Catalog { months })
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Highest authored month index, or 0 for an empty catalog.
    pub fn last_month(&self) -> u32 {
        self.months.keys().next_back().copied().unwrap_or(0)
    }

    /// The authored scenario for a month.
    pub fn month(&self, month: u32) -> Result<&MonthDraft, CatalogError> {
        self.months
            .get(&month)
            .ok_or(CatalogError::UnknownMonth(month))
    }

    /// The ordered, engine-ready options for a month.
    pub fn options(
        &self,
        month: u32,
        engine: &Engine,
    ) -> Result<Vec<ScenarioOption>, CatalogError> {
        let draft = self.month(month)?;
        draft
            .options
            .iter()
            .map(|opt| ScenarioOption::from_draft(engine, month, opt))
            .collect()
    }
}
