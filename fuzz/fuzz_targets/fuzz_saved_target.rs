//! Fuzz target: saved-target decoder
//!
//! Stores arbitrary bytes under the LAT/LNG/TITLE keys and loads the
//! record back, verifying:
//! - No panics on any stored bytes
//! - A loaded record never has a zero coordinate
//! - A loaded title is exactly the stored TITLE bytes
//!
//! cargo fuzz run fuzz_saved_target

#![no_main]

use geoalert::app::ports::{StorageError, StoragePort};
use geoalert::saved_target::{self, LAT_KEY, LNG_KEY, PREFS_NAMESPACE, TITLE_KEY};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

// ── In-memory StoragePort for fuzz testing ────────────────────

struct MemStore {
    data: HashMap<String, Vec<u8>>,
}

impl MemStore {
    fn new() -> Self {
        Self { data: HashMap::new() }
    }
}

impl StoragePort for MemStore {
    fn read(&self, ns: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.data.get(&format!("{ns}::{key}")) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn value_len(&self, ns: &str, key: &str) -> Result<usize, StorageError> {
        self.data
            .get(&format!("{ns}::{key}"))
            .map(Vec::len)
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, ns: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.data.insert(format!("{ns}::{key}"), data.to_vec());
        Ok(())
    }

    fn exists(&self, ns: &str, key: &str) -> bool {
        self.data.contains_key(&format!("{ns}::{key}"))
    }

    fn delete(&mut self, ns: &str, key: &str) -> Result<(), StorageError> {
        self.data.remove(&format!("{ns}::{key}"));
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First two bytes pick the LAT and LNG lengths (0..=8); the rest is
    // split between LAT, LNG and TITLE.
    let lat_len = (data[0] as usize % 9).min(data.len() - 2);
    let rest = &data[2..];
    let lng_len = (data[1] as usize % 9).min(rest.len() - lat_len);
    let (lat, rest) = rest.split_at(lat_len);
    let (lng, title) = rest.split_at(lng_len);

    let mut store = MemStore::new();
    let _ = store.write(PREFS_NAMESPACE, LAT_KEY, lat);
    let _ = store.write(PREFS_NAMESPACE, LNG_KEY, lng);
    let _ = store.write(PREFS_NAMESPACE, TITLE_KEY, title);

    if let Some(saved) = saved_target::load(&store) {
        assert!(saved.latitude != 0.0 && saved.longitude != 0.0);
        assert_eq!(saved.title.as_bytes(), title);
    }

    // Saving back whatever was decoded must not panic either.
    if let Some(saved) = saved_target::load(&store) {
        let _ = saved_target::save(&mut store, saved.latitude, saved.longitude, &saved.title);
    }
});
