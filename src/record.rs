//! Record model for the projection engine.
//!
//! This module provides:
//! - `Record` — the flat entity shape shared by issues, cycles, and modules
//! - `FieldValue` — discrete field values, single- or multi-valued
//! - `GroupValues` — resolved group key(s) for one record and one field
//! - `ScheduleStatus` — date-derived status classification

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved bucket key for records whose group value is null or absent.
pub const NONE_GROUP_KEY: &str = "None";

/// A discrete field value on a record.
///
/// Multi-valued fields (assignees, labels) make the record a member of
/// every listed group at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
    Null,
}

/// Group key(s) resolved for a record under one group-by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValues {
    /// Field absent or null: the record belongs to the reserved `"None"` bucket.
    None,
    /// Single-valued field: exactly one bucket.
    One(String),
    /// Multi-valued field: one bucket per value; empty lists degrade to `None`.
    Many(Vec<String>),
}

impl GroupValues {
    /// Bucket keys this record lands in, `"None"` included.
    pub fn keys(&self) -> Vec<String> {
        match self {
            GroupValues::None => vec![NONE_GROUP_KEY.to_string()],
            GroupValues::One(key) => vec![key.clone()],
            GroupValues::Many(keys) if keys.is_empty() => vec![NONE_GROUP_KEY.to_string()],
            GroupValues::Many(keys) => keys.clone(),
        }
    }
}

/// A flat project-management record.
///
/// Issues, cycles, and modules are structurally identical as far as the
/// engine is concerned; entity-specific fields live in the open `fields`
/// map and are resolved through the accessor methods below, so the engine
/// never branches on an entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque unique identifier, assigned by the backend
    pub id: String,
    /// Display name, used for name ordering and search matching
    #[serde(default)]
    pub name: String,
    /// Manual ordering key; ties break by id
    #[serde(default)]
    pub sort_order: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_issues: u32,
    #[serde(default)]
    pub completed_issues: u32,
    #[serde(default)]
    pub cancelled_issues: u32,
    #[serde(default)]
    pub is_favorite: bool,
    /// Set when the record is archived; archived records are excluded from
    /// active-scope lookups
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    /// Discrete groupable/filterable fields (priority, state, lead,
    /// assignees, labels, ...)
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Resolve the group key(s) for a group-by field.
    ///
    /// A value the caller has no known option for is still returned raw —
    /// the record must land in a bucket either way.
    pub fn group_values(&self, field: &str) -> GroupValues {
        match self.fields.get(field) {
            Some(FieldValue::Single(v)) => GroupValues::One(v.clone()),
            Some(FieldValue::Many(vs)) => GroupValues::Many(vs.clone()),
            Some(FieldValue::Null) | None => GroupValues::None,
        }
    }

    /// Resolve a date-typed field for date filtering.
    pub fn date_value(&self, field: &str) -> Option<NaiveDate> {
        match field {
            "start_date" => self.start_date,
            "target_date" => self.target_date,
            "created_at" => Some(self.created_at.date_naive()),
            "updated_at" => Some(self.updated_at.date_naive()),
            _ => None,
        }
    }

    /// Completion ratio; zero total counts as no progress.
    pub fn progress(&self) -> f64 {
        if self.total_issues == 0 {
            return 0.0;
        }
        f64::from(self.completed_issues + self.cancelled_issues) / f64::from(self.total_issues)
    }

    /// Whether the record has been archived.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Date-derived schedule status for the record's start/end window.
    pub fn schedule_status(&self, today: NaiveDate) -> ScheduleStatus {
        ScheduleStatus::classify(self.start_date, self.target_date, today)
    }
}

/// Schedule status derived from a record's start/end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// End date strictly in the past
    Completed,
    /// Start date strictly in the future
    Upcoming,
    /// Started (or undated start) and not yet ended
    Current,
    /// Neither start nor end date set
    Draft,
}

impl ScheduleStatus {
    /// Classify a start/end window against `today`.
    ///
    /// An end date equal to today is not yet completed, matching the
    /// "has passed and is not today" reading used by the views.
    pub fn classify(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        if start.is_none() && end.is_none() {
            return ScheduleStatus::Draft;
        }
        if let Some(end) = end {
            if end < today {
                return ScheduleStatus::Completed;
            }
        }
        if let Some(start) = start {
            if start > today {
                return ScheduleStatus::Upcoming;
            }
        }
        ScheduleStatus::Current
    }
}
