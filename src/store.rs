//! In-memory record store.
//!
//! The store is a flat `id -> Record` map owned by the caller's fetch
//! layer: network response handlers insert and patch records here, and
//! the projection engine only ever reads a consistent snapshot of it.
//! Writes racing at the network layer are the caller's problem to
//! sequence (latest write wins per id) before projecting.

use crate::errors::StoreError;
use crate::record::{Record, ScheduleStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Whether a lookup should see active or archived records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveScope {
    Active,
    Archived,
}

impl ArchiveScope {
    fn admits(&self, record: &Record) -> bool {
        match self {
            ArchiveScope::Active => !record.is_archived(),
            ArchiveScope::Archived => record.is_archived(),
        }
    }
}

/// Flat map from record id to record.
///
/// `BTreeMap` keeps iteration order deterministic, which the projection
/// idempotence guarantee depends on.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<String, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of records.
    ///
    /// Existing ids are left untouched unless `replace` is set, matching
    /// the fetch layer's "add unless already known" contract.
    pub fn add_records(&mut self, records: Vec<Record>, replace: bool) {
        for record in records {
            if replace || !self.records.contains_key(&record.id) {
                self.records.insert(record.id.clone(), record);
            }
        }
    }

    /// Patch a record in place.
    pub fn update_record(
        &mut self,
        id: &str,
        update: impl FnOnce(&mut Record),
    ) -> Result<(), StoreError> {
        match self.records.get_mut(id) {
            Some(record) => {
                update(record);
                Ok(())
            }
            None => Err(StoreError::RecordNotFound { id: id.to_string() }),
        }
    }

    /// Remove a record.
    pub fn remove_record(&mut self, id: &str) -> Result<Record, StoreError> {
        self.records
            .remove(id)
            .ok_or_else(|| StoreError::RecordNotFound { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in id order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Resolve a known id list to records within an archive scope.
    ///
    /// Ids that are unknown or fall outside the scope are dropped, the
    /// same way the fetch layer's archived/un-archived lookup behaves.
    pub fn records_by_ids<'a>(
        &'a self,
        ids: &'a [String],
        scope: ArchiveScope,
    ) -> Vec<&'a Record> {
        ids.iter()
            .filter_map(|id| self.records.get(id))
            .filter(|record| scope.admits(record))
            .collect()
    }

    /// Ids of records in a schedule status, sorted by `sort_order`
    /// (ties by id).
    pub fn ids_with_schedule_status(&self, status: ScheduleStatus, today: NaiveDate) -> Vec<String> {
        let mut matching: Vec<&Record> = self
            .records
            .values()
            .filter(|record| record.schedule_status(today) == status)
            .collect();
        matching.sort_by(|a, b| {
            a.sort_order
                .partial_cmp(&b.sort_order)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        matching.into_iter().map(|record| record.id.clone()).collect()
    }
}
