#![deny(warnings)]

//! Scenario catalog and content schemas for Startup Survivor.
//!
//! The catalog is a static, read-only table of authored monthly scenarios,
//! each offering 2-3 predefined options. Option effects are materialized
//! deterministically by the engine, so the catalog itself stores only
//! narrative intent (tag, risk, steps).

pub mod catalog;
pub mod schema;

pub use catalog::{Catalog, CatalogError, ScenarioOption};
pub use schema::{
    clean_steps, normalize_risk, normalize_tag, validate_draft, DraftError, MonthDraft,
    OptionDraft, OptionId,
};
