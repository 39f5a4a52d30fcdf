//! worklens — grouping, filtering, and ordering engine for
//! project-management views.
//!
//! Given a flat record store and a declarative filter/display
//! configuration, the engine produces the nested id structure a
//! list/kanban/spreadsheet view renders: filter → stable sort →
//! group/sub-group. A separate fractional sort-key calculator supports
//! drag-and-drop reordering with a single-key write.
//!
//! The engine is synchronous and pure: callers hand it a consistent
//! snapshot plus explicit parameters (including `today` for relative
//! date filters) and re-invoke it on each relevant mutation.

pub mod errors;
pub mod filter;
pub mod group;
pub mod order;
pub mod projector;
pub mod record;
pub mod reorder;
pub mod store;
pub mod views;

pub use errors::{StoreError, ViewConfigError};
pub use filter::{FilterContext, FilterSpec, applied_filter_count, satisfies_date_filter};
pub use group::{EmptyGroupSeed, Projection};
pub use order::{OrderBy, OrderKey};
pub use projector::{DisplaySpec, ProjectOptions, compute_view};
pub use record::{FieldValue, GroupValues, Record, ScheduleStatus};
pub use reorder::compute_new_sort_order;
pub use store::{ArchiveScope, RecordStore};
pub use views::{ViewConfig, ViewConfigStore};
