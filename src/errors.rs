//! Typed error hierarchy for the worklens engine.
//!
//! Two enums cover the two fallible surfaces:
//! - `StoreError` — record store mutations against missing ids
//! - `ViewConfigError` — per-view configuration loading and lookup
//!
//! Evaluation itself (filtering, ordering, grouping, projection) never
//! errors: malformed persisted filter data evaluates to "no match" and
//! unknown keys fall back to defaults, because saved views can be stale
//! or hand-crafted.

use thiserror::Error;

/// Errors from record store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record {id} not found")]
    RecordNotFound { id: String },
}

/// Errors from the per-view configuration store.
#[derive(Debug, Error)]
pub enum ViewConfigError {
    #[error("View {id} not found")]
    ViewNotFound { id: String },

    #[error("Failed to parse view configuration: {0}")]
    Parse(#[source] serde_json::Error),
}
