//! Mock adapters for integration tests.
//!
//! Records every emitted event and keeps storage in a plain map so tests
//! can assert on the full history without touching the filesystem.

use geoalert::app::events::AppEvent;
use geoalert::app::ports::{EventSink, StorageError, StoragePort};
use geoalert::geofence::Transition;
use std::collections::HashMap;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts only, in emission order.
    pub fn alerts(&self) -> Vec<Transition> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Alert(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockStore ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStore {
    store: HashMap<String, Vec<u8>>,
    /// When set, every write fails with this error.
    pub fail_writes: Option<StorageError>,
    /// When set, only the write with this 1-based number fails.
    pub fail_write_no: Option<usize>,
    writes: usize,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: StorageError) -> Self {
        Self {
            fail_writes: Some(err),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
}

impl StoragePort for MockStore {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.get(&format!("{}::{}", namespace, key)) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn value_len(&self, namespace: &str, key: &str) -> Result<usize, StorageError> {
        self.store
            .get(&format!("{}::{}", namespace, key))
            .map(Vec::len)
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.writes += 1;
        if let Some(e) = self.fail_writes {
            return Err(e);
        }
        if self.fail_write_no == Some(self.writes) {
            return Err(StorageError::IoError);
        }
        self.store
            .insert(format!("{}::{}", namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&format!("{}::{}", namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&format!("{}::{}", namespace, key))
    }
}
