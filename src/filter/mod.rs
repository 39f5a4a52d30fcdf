//! Filter evaluation for saved-view filter specifications.
//!
//! A filter spec maps field names to accepted values: OR within a field,
//! AND across fields. Date-typed fields use the persisted
//! `value;operator;anchor` string format (see `date`). Two extra AND
//! terms sit outside the field map: a favorites toggle and a
//! case-insensitive name search, both carried on `FilterContext`.
//!
//! Evaluation never errors. Stale specs referencing unknown fields, empty
//! value lists, and malformed date strings all degrade to "no constraint"
//! or "no match" for the offending entry, never to a panic.

mod date;

pub use date::satisfies_date_filter;

use crate::record::Record;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Field name -> accepted values, as persisted in a saved view.
pub type FilterSpec = BTreeMap<String, Vec<String>>;

/// Fields evaluated as dates rather than discrete values.
const DATE_FIELDS: [&str; 4] = ["start_date", "target_date", "created_at", "updated_at"];

/// Per-evaluation context the spec itself does not carry.
///
/// `today` anchors relative date filters; the engine takes it as input
/// instead of reading a clock so evaluation stays pure.
#[derive(Debug, Clone)]
pub struct FilterContext {
    pub today: NaiveDate,
    /// Display toggle: only records flagged as favorite pass.
    pub favorites_only: bool,
    /// Case-insensitive substring match on the record name.
    pub search_query: Option<String>,
}

impl FilterContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            favorites_only: false,
            search_query: None,
        }
    }
}

/// Check whether a record passes the full filter spec plus context terms.
pub fn matches(record: &Record, spec: &FilterSpec, ctx: &FilterContext) -> bool {
    for (field, accepted) in spec {
        // A field present in the spec but mapped to no values is
        // unconstrained, never a universal rejection.
        if accepted.is_empty() {
            continue;
        }
        if DATE_FIELDS.contains(&field.as_str()) {
            if !matches_date_field(record, field, accepted, ctx.today) {
                return false;
            }
        } else if !record.group_values(field).keys().iter().any(|v| accepted.contains(v)) {
            return false;
        }
    }

    if ctx.favorites_only && !record.is_favorite {
        return false;
    }
    if let Some(query) = &ctx.search_query {
        if !record.name.to_lowercase().contains(&query.to_lowercase()) {
            return false;
        }
    }
    true
}

/// A dated field passes when any of its filter entries is satisfied;
/// a record with no date on the field never passes a constrained field.
fn matches_date_field(record: &Record, field: &str, entries: &[String], today: NaiveDate) -> bool {
    let Some(value) = record.date_value(field) else {
        return false;
    };
    entries
        .iter()
        .any(|entry| satisfies_date_filter(value, entry, today))
}

/// Total number of applied filter values across all fields.
pub fn applied_filter_count(spec: &FilterSpec) -> usize {
    spec.values().map(Vec::len).sum()
}
