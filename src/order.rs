//! Comparator registry for order-by keys.
//!
//! An order-by key is a field name with an optional `-` prefix for
//! descending. Parsing never fails: unknown keys fall back to ascending
//! `created_at` with a warning, because order-by values come from
//! persisted view preferences that may reference deprecated fields.
//!
//! Every comparator is total. Direction applies to the primary key only;
//! documented tie-breaks (name, then id) stay ascending, and the final id
//! tie-break guarantees no two distinct records ever compare equal, so a
//! stable sort reproduces the same sequence on every run.

use crate::record::Record;
use std::cmp::Ordering;
use tracing::warn;

/// Default ordering applied when no (valid) order-by is supplied.
pub const DEFAULT_ORDER_KEY: &str = "created_at";

/// Base sort key, without direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Name,
    Progress,
    IssuesLength,
    StartDate,
    TargetDate,
    CreatedAt,
    UpdatedAt,
    SortOrder,
}

impl OrderKey {
    fn from_base(base: &str) -> Option<Self> {
        match base {
            "name" => Some(OrderKey::Name),
            "progress" => Some(OrderKey::Progress),
            "issues_length" => Some(OrderKey::IssuesLength),
            "start_date" => Some(OrderKey::StartDate),
            "target_date" => Some(OrderKey::TargetDate),
            "created_at" => Some(OrderKey::CreatedAt),
            "updated_at" => Some(OrderKey::UpdatedAt),
            "sort_order" => Some(OrderKey::SortOrder),
            _ => None,
        }
    }
}

/// A parsed order-by key with direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub key: OrderKey,
    pub descending: bool,
}

impl Default for OrderBy {
    fn default() -> Self {
        Self {
            key: OrderKey::CreatedAt,
            descending: false,
        }
    }
}

impl OrderBy {
    /// Parse a persisted order-by value, e.g. `"sort_order"` or `"-name"`.
    pub fn parse(raw: &str) -> Self {
        let (base, descending) = match raw.strip_prefix('-') {
            Some(base) => (base, true),
            None => (raw, false),
        };
        match OrderKey::from_base(base) {
            Some(key) => Self { key, descending },
            None => {
                warn!(order_by = raw, "unknown order-by key, falling back to created_at");
                Self::default()
            }
        }
    }

    /// Total comparison of two records under this ordering.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let primary = match self.key {
            OrderKey::Name => self.directed(cmp_name(a, b)),
            OrderKey::Progress => self
                .directed(cmp_f64(a.progress(), b.progress()))
                .then_with(|| cmp_name(a, b)),
            OrderKey::IssuesLength => self.cmp_issue_count(a, b).then_with(|| cmp_name(a, b)),
            OrderKey::StartDate => self.cmp_dates(a.start_date, b.start_date),
            OrderKey::TargetDate => self.cmp_dates(a.target_date, b.target_date),
            OrderKey::CreatedAt => self.directed(a.created_at.cmp(&b.created_at)),
            OrderKey::UpdatedAt => self.directed(a.updated_at.cmp(&b.updated_at)),
            OrderKey::SortOrder => self.directed(cmp_f64(a.sort_order, b.sort_order)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        if self.descending { ordering.reverse() } else { ordering }
    }

    /// Count ordering, with the source's falsy-first descending policy:
    /// ascending compares raw counts, but descending only splits
    /// populated-before-empty and leaves the name tie-break to order the
    /// rest. A compatibility quirk specific to this key.
    fn cmp_issue_count(&self, a: &Record, b: &Record) -> Ordering {
        if self.descending {
            (a.total_issues == 0).cmp(&(b.total_issues == 0))
        } else {
            a.total_issues.cmp(&b.total_issues)
        }
    }

    /// Date ordering: absent dates sort after all present dates in both
    /// directions; only the chronological part follows the direction.
    fn cmp_dates(
        &self,
        a: Option<chrono::NaiveDate>,
        b: Option<chrono::NaiveDate>,
    ) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.directed(a.cmp(&b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn cmp_name(a: &Record, b: &Record) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable-sort a slice of record references under an ordering.
pub fn sort_records(records: &mut [&Record], order_by: &OrderBy) {
    records.sort_by(|a, b| order_by.compare(a, b));
}
