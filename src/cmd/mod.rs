//! Command handlers for the worklens CLI.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::Path;
use worklens::{ProjectOptions, Record, ViewConfig, compute_new_sort_order, compute_view};

/// Load records and a view config from JSON files, run the projection,
/// and print the resulting id structure as JSON on stdout.
pub fn project(
    records_path: &Path,
    view_path: &Path,
    today: Option<&str>,
    favorites: bool,
    search: Option<String>,
) -> Result<()> {
    let records_raw = fs::read_to_string(records_path)
        .with_context(|| format!("Failed to read records file {}", records_path.display()))?;
    let records: Vec<Record> =
        serde_json::from_str(&records_raw).context("Failed to parse records JSON")?;

    let view_raw = fs::read_to_string(view_path)
        .with_context(|| format!("Failed to read view file {}", view_path.display()))?;
    let view = ViewConfig::from_json(&view_raw).context("Failed to parse view configuration")?;

    let today = match today {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .with_context(|| format!("Invalid --today date: {raw}"))?,
        None => Utc::now().date_naive(),
    };

    let mut options = ProjectOptions::new(today);
    options.favorites_only = favorites;
    options.search_query = search;

    let projection = compute_view(&records, &view.filters, &view.display, &options);
    println!("{}", serde_json::to_string_pretty(&projection)?);
    Ok(())
}

/// Compute the new sort key for a drag-and-drop move and print it.
pub fn reorder(keys: &[f64], source: usize, destination: usize) -> Result<()> {
    let new_key = compute_new_sort_order(keys, source, destination);
    println!("{new_key}");
    Ok(())
}
