//! View projector: the engine's public entry point.
//!
//! `compute_view` runs the full pipeline — filter, stable sort, group —
//! over a snapshot of records and returns the nested id structure a view
//! renders. It is a pure function of its arguments: no clock, no router
//! state, no hidden store access. Callers re-run it on every relevant
//! mutation and own any memoization or diffing on top.

use crate::filter::{self, FilterContext, FilterSpec};
use crate::group::{self, EmptyGroupSeed, Projection};
use crate::order::{self, OrderBy};
use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Group-by fields recognized by default, mirroring the closed set of
/// grouping options the views offer. Callers with additional discrete
/// fields extend this through `ProjectOptions::groupable_fields`.
const DEFAULT_GROUPABLE_FIELDS: [&str; 8] = [
    "priority",
    "state",
    "state_group",
    "labels",
    "assignees",
    "lead",
    "cycle",
    "module",
];

/// Persisted display configuration for a view.
///
/// `sub_group_by` is meaningful only alongside a distinct non-null
/// `group_by`; the projector quietly ignores it otherwise. Unknown
/// `order_by` values fall back to `created_at` at parse time, and
/// unknown `group_by`/`sub_group_by` fields fall back to ungrouped at
/// projection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySpec {
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub sub_group_by: Option<String>,
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self {
            group_by: None,
            sub_group_by: None,
            order_by: default_order_by(),
        }
    }
}

fn default_order_by() -> String {
    order::DEFAULT_ORDER_KEY.to_string()
}

/// Caller-supplied knobs that are not part of the persisted view config.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Anchor for relative date filters; injected, never read from a clock.
    pub today: NaiveDate,
    /// Display toggle requiring `is_favorite`.
    pub favorites_only: bool,
    /// Case-insensitive substring match on record names.
    pub search_query: Option<String>,
    /// Known discrete values to render as empty buckets, when requested.
    pub empty_groups: Option<EmptyGroupSeed>,
    /// Fields accepted for grouping beyond the built-in set. A persisted
    /// `group_by` outside both lists falls back to ungrouped.
    pub groupable_fields: Vec<String>,
}

impl ProjectOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            favorites_only: false,
            search_query: None,
            empty_groups: None,
            groupable_fields: Vec::new(),
        }
    }

    fn is_groupable(&self, field: &str) -> bool {
        DEFAULT_GROUPABLE_FIELDS.contains(&field)
            || self.groupable_fields.iter().any(|f| f == field)
    }
}

/// Project a record snapshot into the id structure the view renders.
pub fn compute_view<'a, I>(
    records: I,
    filters: &FilterSpec,
    display: &DisplaySpec,
    options: &ProjectOptions,
) -> Projection
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ctx = FilterContext::new(options.today);
    ctx.favorites_only = options.favorites_only;
    ctx.search_query = options.search_query.clone();

    let mut visible: Vec<&Record> = records
        .into_iter()
        .filter(|record| filter::matches(record, filters, &ctx))
        .collect();

    let order_by = OrderBy::parse(&display.order_by);
    order::sort_records(&mut visible, &order_by);

    let group_field = resolve_group_field(display.group_by.as_deref(), options);
    let sub_group_field = resolve_group_field(display.sub_group_by.as_deref(), options);

    // Bind before the macro: tracing's field shorthand would otherwise
    // shadow a local named `display`.
    let visible_count = visible.len();
    debug!(
        visible = visible_count,
        group_by = group_field,
        sub_group_by = sub_group_field,
        "computing view projection"
    );

    group::project_groups(
        &visible,
        group_field,
        sub_group_field,
        options.empty_groups.as_ref(),
    )
}

/// Validate a persisted grouping field against the recognized set.
///
/// Persisted view preferences can reference deprecated fields; those
/// fall back to no grouping at this level instead of erroring or
/// collapsing every record into the `"None"` bucket.
fn resolve_group_field<'a>(field: Option<&'a str>, options: &ProjectOptions) -> Option<&'a str> {
    let field = field?;
    if options.is_groupable(field) {
        Some(field)
    } else {
        warn!(group_by = field, "unknown group-by field, falling back to ungrouped");
        None
    }
}
