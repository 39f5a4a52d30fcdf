//! Per-view configuration values and their in-memory registry.
//!
//! A saved view carries its filter spec and display spec together. The
//! settings service that persists them lives outside the engine; this
//! registry just holds the loaded values keyed by view id and applies
//! the merge-style updates the UI issues, so the projector always
//! receives a plain `ViewConfig` value.

use crate::errors::ViewConfigError;
use crate::filter::FilterSpec;
use crate::projector::DisplaySpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filter and display configuration for one saved view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(default)]
    pub display: DisplaySpec,
}

impl ViewConfig {
    /// Parse a persisted view configuration.
    pub fn from_json(raw: &str) -> Result<Self, ViewConfigError> {
        serde_json::from_str(raw).map_err(ViewConfigError::Parse)
    }
}

/// In-memory registry of view configurations, keyed by view id.
#[derive(Debug, Clone, Default)]
pub struct ViewConfigStore {
    configs: BTreeMap<String, ViewConfig>,
}

impl ViewConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a view with defaults if it is not yet known.
    ///
    /// The default ordering is ascending `created_at`, the same default
    /// the projector falls back to.
    pub fn init_view(&mut self, view_id: &str) -> &ViewConfig {
        self.configs
            .entry(view_id.to_string())
            .or_insert_with(ViewConfig::default)
    }

    pub fn get(&self, view_id: &str) -> Option<&ViewConfig> {
        self.configs.get(view_id)
    }

    /// Merge a partial display update into a view's display spec.
    ///
    /// Only the supplied parts change; `Some(None)` clears a grouping
    /// level, `None` leaves it untouched.
    pub fn update_display(
        &mut self,
        view_id: &str,
        group_by: Option<Option<String>>,
        sub_group_by: Option<Option<String>>,
        order_by: Option<String>,
    ) -> Result<(), ViewConfigError> {
        let config = self.get_mut(view_id)?;
        if let Some(group_by) = group_by {
            config.display.group_by = group_by;
        }
        if let Some(sub_group_by) = sub_group_by {
            config.display.sub_group_by = sub_group_by;
        }
        if let Some(order_by) = order_by {
            config.display.order_by = order_by;
        }
        Ok(())
    }

    /// Merge filter values per field; fields not mentioned are kept.
    pub fn update_filters(
        &mut self,
        view_id: &str,
        filters: FilterSpec,
    ) -> Result<(), ViewConfigError> {
        let config = self.get_mut(view_id)?;
        for (field, values) in filters {
            config.filters.insert(field, values);
        }
        Ok(())
    }

    /// Drop every filter on a view, leaving display settings alone.
    pub fn clear_filters(&mut self, view_id: &str) -> Result<(), ViewConfigError> {
        let config = self.get_mut(view_id)?;
        config.filters.clear();
        Ok(())
    }

    fn get_mut(&mut self, view_id: &str) -> Result<&mut ViewConfig, ViewConfigError> {
        self.configs
            .get_mut(view_id)
            .ok_or_else(|| ViewConfigError::ViewNotFound {
                id: view_id.to_string(),
            })
    }
}
