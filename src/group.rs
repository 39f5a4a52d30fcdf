//! Grouping engine: buckets an ordered record sequence by group key.
//!
//! Grouping never re-sorts. The input sequence arrives already ordered
//! and each bucket preserves that relative order, so order fidelity
//! inside a bucket is inherited from the comparator stage. Multi-valued
//! fields append the record to every resolved bucket, which is why the
//! completeness invariant is "at least once", not "exactly once".

use crate::record::Record;
use serde::Serialize;
use std::collections::BTreeMap;

/// The shape a view renders, depending on the display spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    /// No group-by: the ordered id sequence as-is.
    Ungrouped(Vec<String>),
    /// Group-by only: group key -> ordered ids.
    Grouped(BTreeMap<String, Vec<String>>),
    /// Group-by + sub-group-by: group key -> sub-group key -> ordered ids.
    SubGrouped(BTreeMap<String, BTreeMap<String, Vec<String>>>),
}

impl Projection {
    /// Every id in the projection, bucket duplicates included.
    pub fn all_ids(&self) -> Vec<&str> {
        match self {
            Projection::Ungrouped(ids) => ids.iter().map(String::as_str).collect(),
            Projection::Grouped(groups) => groups
                .values()
                .flatten()
                .map(String::as_str)
                .collect(),
            Projection::SubGrouped(groups) => groups
                .values()
                .flat_map(BTreeMap::values)
                .flatten()
                .map(String::as_str)
                .collect(),
        }
    }
}

/// Bucket an ordered sequence of records one or two levels deep.
///
/// `group_by == None` returns the sequence ungrouped; `sub_group_by` is
/// honored only alongside a distinct `group_by`. When an `EmptyGroupSeed`
/// is supplied, its known value lists seed empty buckets so a board can
/// render every column even with no members.
pub fn project_groups(
    records: &[&Record],
    group_by: Option<&str>,
    sub_group_by: Option<&str>,
    empty_groups: Option<&EmptyGroupSeed>,
) -> Projection {
    let Some(group_field) = group_by else {
        return Projection::Ungrouped(records.iter().map(|r| r.id.clone()).collect());
    };

    let sub_group_by = sub_group_by.filter(|s| *s != group_field);

    match sub_group_by {
        None => {
            let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
            if let Some(seed) = empty_groups {
                for key in &seed.group_values {
                    buckets.entry(key.clone()).or_default();
                }
            }
            for record in records {
                for key in record.group_values(group_field).keys() {
                    buckets.entry(key).or_default().push(record.id.clone());
                }
            }
            Projection::Grouped(buckets)
        }
        Some(sub_field) => {
            let mut buckets: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();
            if let Some(seed) = empty_groups {
                for key in &seed.group_values {
                    let sub = buckets.entry(key.clone()).or_default();
                    for sub_key in &seed.sub_group_values {
                        sub.entry(sub_key.clone()).or_default();
                    }
                }
            }
            for record in records {
                let sub_keys = record.group_values(sub_field).keys();
                for key in record.group_values(group_field).keys() {
                    let sub_buckets = buckets.entry(key).or_default();
                    for sub_key in &sub_keys {
                        sub_buckets
                            .entry(sub_key.clone())
                            .or_default()
                            .push(record.id.clone());
                    }
                }
            }
            Projection::SubGrouped(buckets)
        }
    }
}

/// Known discrete values used to seed empty buckets.
#[derive(Debug, Clone, Default)]
pub struct EmptyGroupSeed {
    pub group_values: Vec<String>,
    pub sub_group_values: Vec<String>,
}
