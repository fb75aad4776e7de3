//! redb-backed record store.
//!
//! One table per record kind. Keys are `{facility_id}/{id}`, so a prefix
//! scan on `{facility_id}/` returns exactly one facility's records and a
//! point lookup can never cross facilities. Values are JSON.

use std::path::Path;
use std::sync::Arc;

use medsched_core::ServiceError;
use redb::{Database, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{AvailabilityRule, AvailabilitySlot, Doctor};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

fn storage<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Storage(e.to_string())
}

/// A facility-owned record kind.
pub trait Record: Serialize + DeserializeOwned {
    /// redb table holding this kind.
    const TABLE: &'static str;

    fn facility_id(&self) -> &str;

    fn key_value(&self) -> &str;
}

fn table<R: Record>() -> TableDefinition<'static, &'static str, &'static [u8]> {
    TableDefinition::new(R::TABLE)
}

fn record_key(facility_id: &str, id: &str) -> String {
    format!("{}/{}", facility_id, id)
}

fn facility_prefix(facility_id: &str) -> String {
    format!("{}/", facility_id)
}

pub struct AvailabilityStore {
    db: Arc<Database>,
}

impl AvailabilityStore {
    /// Open or create the database at `path`, creating all tables.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(storage)?;

        let write_txn = db.begin_write().map_err(storage)?;
        {
            write_txn.open_table(table::<Doctor>()).map_err(storage)?;
            write_txn.open_table(table::<AvailabilityRule>()).map_err(storage)?;
            write_txn.open_table(table::<AvailabilitySlot>()).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Look up one record inside a facility.
    pub fn get<R: Record>(&self, facility_id: &str, id: &str) -> Result<Option<R>, StoreError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(table::<R>()).map_err(storage)?;

        let key = record_key(facility_id, id);
        match table.get(key.as_str()).map_err(storage)? {
            Some(val) => serde_json::from_slice(val.value())
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// All records of one facility, in key order.
    pub fn scan<R: Record>(&self, facility_id: &str) -> Result<Vec<R>, StoreError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(table::<R>()).map_err(storage)?;

        let prefix = facility_prefix(facility_id);
        let mut results = Vec::new();
        for entry in table.range(prefix.as_str()..).map_err(storage)? {
            let (key, value) = entry.map_err(storage)?;
            if !key.value().starts_with(prefix.as_str()) {
                break;
            }
            let record = serde_json::from_slice(value.value())
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            results.push(record);
        }
        Ok(results)
    }

    /// Insert or replace records in a single transaction.
    pub fn put_all<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(table::<R>()).map_err(storage)?;
            for record in records {
                let key = record_key(record.facility_id(), record.key_value());
                let data = serde_json::to_vec(record)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                table.insert(key.as_str(), data.as_slice()).map_err(storage)?;
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(())
    }

    pub fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.put_all(std::slice::from_ref(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(facility: &str, id: &str, name: &str) -> Doctor {
        Doctor {
            id: id.into(),
            facility_id: facility.into(),
            name: name.into(),
            specialty: "general".into(),
            email: None,
            phone: None,
            active: true,
        }
    }

    fn open_temp() -> (AvailabilityStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = AvailabilityStore::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn get_is_facility_scoped() {
        let (store, _dir) = open_temp();
        store.put(&doctor("f1", "d1", "Ada")).unwrap();

        assert_eq!(store.get::<Doctor>("f1", "d1").unwrap().unwrap().name, "Ada");
        assert!(store.get::<Doctor>("f2", "d1").unwrap().is_none());
        assert!(store.get::<Doctor>("f1", "d2").unwrap().is_none());
    }

    #[test]
    fn scan_does_not_leak_prefix_neighbours() {
        let (store, _dir) = open_temp();
        store
            .put_all(&[
                doctor("f1", "a", "A"),
                doctor("f1", "b", "B"),
                doctor("f10", "c", "C"),
                doctor("f2", "d", "D"),
            ])
            .unwrap();

        let ids: Vec<String> = store.scan::<Doctor>("f1").unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(store.scan::<Doctor>("f3").unwrap().is_empty());
    }

    #[test]
    fn put_replaces_existing() {
        let (store, _dir) = open_temp();
        store.put(&doctor("f1", "d1", "Old")).unwrap();
        store.put(&doctor("f1", "d1", "New")).unwrap();
        let all = store.scan::<Doctor>("f1").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "New");
    }

    #[test]
    fn reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.redb");
        {
            let store = AvailabilityStore::open(&path).unwrap();
            store.put(&doctor("f1", "d1", "Ada")).unwrap();
        }
        let store = AvailabilityStore::open(&path).unwrap();
        assert!(store.get::<Doctor>("f1", "d1").unwrap().is_some());
    }
}
