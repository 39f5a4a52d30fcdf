//! Integration tests for the worklens projection pipeline.
//!
//! These exercise the documented end-to-end scenarios and the engine's
//! core guarantees: completeness, order fidelity, and idempotence.

use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;
use worklens::{
    ArchiveScope, DisplaySpec, FieldValue, FilterSpec, OrderBy, ProjectOptions, Projection,
    Record, RecordStore, ScheduleStatus, compute_view,
};

/// Helper to build a record with a priority and sort order.
fn record(id: &str, priority: &str, sort_order: f64) -> Record {
    let mut fields = BTreeMap::new();
    fields.insert(
        "priority".to_string(),
        FieldValue::Single(priority.to_string()),
    );
    Record {
        id: id.to_string(),
        name: id.to_string(),
        sort_order,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        start_date: None,
        target_date: None,
        total_issues: 0,
        completed_issues: 0,
        cancelled_issues: 0,
        is_favorite: false,
        archived_at: None,
        fields,
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn options() -> ProjectOptions {
    ProjectOptions::new(today())
}

fn sample_records() -> Vec<Record> {
    vec![
        record("a", "high", 1.0),
        record("b", "low", 2.0),
        record("c", "high", 3.0),
    ]
}

fn priority_view() -> DisplaySpec {
    DisplaySpec {
        group_by: Some("priority".to_string()),
        sub_group_by: None,
        order_by: "sort_order".to_string(),
    }
}

// =============================================================================
// Documented scenarios
// =============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn group_by_priority_ordered_by_sort_order() {
        let records = sample_records();
        let projection = compute_view(&records, &FilterSpec::new(), &priority_view(), &options());
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        assert_eq!(groups["high"], vec!["a", "c"]);
        assert_eq!(groups["low"], vec!["b"]);
    }

    #[test]
    fn priority_filter_drops_non_matching_groups() {
        let records = sample_records();
        let mut filters = FilterSpec::new();
        filters.insert("priority".to_string(), vec!["high".to_string()]);
        let projection = compute_view(&records, &filters, &priority_view(), &options());
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["high"], vec!["a", "c"]);
    }

    #[test]
    fn relative_date_filter_one_week_in_the_past() {
        let mut ten_days_ago = record("old", "high", 1.0);
        ten_days_ago.target_date = NaiveDate::from_ymd_opt(2024, 6, 5);
        let mut three_days_ago = record("recent", "high", 2.0);
        three_days_ago.target_date = NaiveDate::from_ymd_opt(2024, 6, 12);

        let mut filters = FilterSpec::new();
        filters.insert(
            "target_date".to_string(),
            vec!["1_weeks;before;fromnow".to_string()],
        );
        let projection = compute_view(
            &[ten_days_ago, three_days_ago],
            &filters,
            &DisplaySpec::default(),
            &options(),
        );
        assert_eq!(projection, Projection::Ungrouped(vec!["old".to_string()]));
    }

    #[test]
    fn multi_valued_grouping_puts_record_in_both_buckets() {
        let mut r = record("a", "high", 1.0);
        r.fields.insert(
            "assignees".to_string(),
            FieldValue::Many(vec!["u1".to_string(), "u2".to_string()]),
        );
        let display = DisplaySpec {
            group_by: Some("assignees".to_string()),
            sub_group_by: None,
            order_by: "sort_order".to_string(),
        };
        let projection = compute_view(&[r], &FilterSpec::new(), &display, &options());
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        assert_eq!(groups["u1"], vec!["a"]);
        assert_eq!(groups["u2"], vec!["a"]);
    }

    #[test]
    fn sub_grouping_by_priority_then_assignee() {
        let mut a = record("a", "high", 1.0);
        a.fields.insert(
            "assignees".to_string(),
            FieldValue::Many(vec!["u1".to_string()]),
        );
        let mut b = record("b", "high", 2.0);
        b.fields.insert(
            "assignees".to_string(),
            FieldValue::Many(vec!["u1".to_string(), "u2".to_string()]),
        );
        let display = DisplaySpec {
            group_by: Some("priority".to_string()),
            sub_group_by: Some("assignees".to_string()),
            order_by: "sort_order".to_string(),
        };
        let projection = compute_view(&[a, b], &FilterSpec::new(), &display, &options());
        let Projection::SubGrouped(groups) = projection else {
            panic!("expected sub-grouped projection");
        };
        assert_eq!(groups["high"]["u1"], vec!["a", "b"]);
        assert_eq!(groups["high"]["u2"], vec!["b"]);
    }
}

// =============================================================================
// Invariants
// =============================================================================

mod invariants {
    use super::*;

    #[test]
    fn completeness_every_filtered_id_appears_at_least_once() {
        let mut records = sample_records();
        records[1].fields.insert(
            "labels".to_string(),
            FieldValue::Many(vec!["bug".to_string(), "ui".to_string()]),
        );
        let display = DisplaySpec {
            group_by: Some("labels".to_string()),
            sub_group_by: None,
            order_by: "sort_order".to_string(),
        };
        let projection = compute_view(&records, &FilterSpec::new(), &display, &options());
        let projected = projection.all_ids();
        for record in &records {
            assert!(
                projected.contains(&record.id.as_str()),
                "record {} missing from projection",
                record.id
            );
        }
    }

    #[test]
    fn idempotence_same_inputs_same_output() {
        let records = sample_records();
        let display = priority_view();
        let first = compute_view(&records, &FilterSpec::new(), &display, &options());
        let second = compute_view(&records, &FilterSpec::new(), &display, &options());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn order_fidelity_adjacent_pairs_compare_non_positive() {
        let mut records = Vec::new();
        for (i, (priority, sort_order)) in [
            ("high", 9.0),
            ("low", 1.0),
            ("high", 4.0),
            ("low", 7.0),
            ("medium", 2.0),
        ]
        .iter()
        .enumerate()
        {
            records.push(record(&format!("r{i}"), priority, *sort_order));
        }
        let projection = compute_view(&records, &FilterSpec::new(), &priority_view(), &options());
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        let order_by = OrderBy::parse("sort_order");
        let by_id: BTreeMap<&str, &Record> =
            records.iter().map(|r| (r.id.as_str(), r)).collect();
        for ids in groups.values() {
            for pair in ids.windows(2) {
                let a = by_id[pair[0].as_str()];
                let b = by_id[pair[1].as_str()];
                assert_ne!(
                    order_by.compare(a, b),
                    std::cmp::Ordering::Greater,
                    "bucket order violates comparator: {} before {}",
                    a.id,
                    b.id
                );
            }
        }
    }
}

// =============================================================================
// Store integration
// =============================================================================

mod store_pipeline {
    use super::*;

    #[test]
    fn reorder_write_back_changes_projection() {
        let mut store = RecordStore::new();
        store.add_records(sample_records(), false);

        // Snapshot the high bucket's keys, move "c" to the front, and
        // write the computed key back through the store.
        let keys = [1.0, 3.0];
        let new_key = worklens::compute_new_sort_order(&keys, 1, 0);
        store.update_record("c", |r| r.sort_order = new_key).unwrap();

        let records: Vec<&Record> = store.records().collect();
        let projection = compute_view(
            records.into_iter(),
            &FilterSpec::new(),
            &priority_view(),
            &options(),
        );
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        assert_eq!(groups["high"], vec!["c", "a"]);
    }

    #[test]
    fn archived_records_are_excluded_from_active_scope() {
        let mut store = RecordStore::new();
        store.add_records(sample_records(), false);
        store
            .update_record("b", |r| {
                r.archived_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
            })
            .unwrap();

        let ids: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let active = store.records_by_ids(&ids, ArchiveScope::Active);
        assert_eq!(active.len(), 2);

        let projection = compute_view(
            active.into_iter(),
            &FilterSpec::new(),
            &priority_view(),
            &options(),
        );
        let Projection::Grouped(groups) = projection else {
            panic!("expected grouped projection");
        };
        assert!(!groups.contains_key("low"));
    }

    #[test]
    fn schedule_status_projection_orders_by_sort_order() {
        let mut store = RecordStore::new();
        let mut done = record("done", "high", 2.0);
        done.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        done.target_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let mut running = record("running", "high", 1.0);
        running.start_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        running.target_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        store.add_records(vec![done, running], false);

        assert_eq!(
            store.ids_with_schedule_status(ScheduleStatus::Completed, today()),
            vec!["done".to_string()]
        );
        assert_eq!(
            store.ids_with_schedule_status(ScheduleStatus::Current, today()),
            vec!["running".to_string()]
        );
    }
}
