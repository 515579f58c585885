//! Persisted target record.
//!
//! The last chosen target survives restarts as three keys in the `PREFS`
//! namespace:
//!
//! | Key     | Encoding                  |
//! |---------|---------------------------|
//! | `LAT`   | `f32`, little-endian      |
//! | `LNG`   | `f32`, little-endian      |
//! | `TITLE` | UTF-8, any length         |
//!
//! Coordinates are stored at 32-bit precision, so a restored target sits
//! up to ~1 m away from the original pick.  A missing coordinate reads
//! as `0.0`, and a record with either coordinate exactly `0.0` counts as
//! absent.  A genuine target on the equator or the prime meridian is
//! therefore indistinguishable from "nothing saved".
//!
//! The store has no multi-key transaction.  [`save`] removes `LAT` first
//! and writes it last, so a save cut short at any point leaves a record
//! that reads as absent, never one mixing two picks.  On failure the
//! previous record is put back.

use log::{debug, info, warn};

use crate::app::ports::{StorageError, StoragePort};
use crate::geo::LatLng;
use crate::geofence::TargetGeofence;

pub const PREFS_NAMESPACE: &str = "PREFS";
pub const LAT_KEY: &str = "LAT";
pub const LNG_KEY: &str = "LNG";
pub const TITLE_KEY: &str = "TITLE";

/// A target as it comes back out of storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTarget {
    pub latitude: f32,
    pub longitude: f32,
    pub title: String,
}

impl SavedTarget {
    /// Widen to a geofence with the given radius.
    pub fn to_geofence(&self, radius_m: f64) -> TargetGeofence {
        TargetGeofence::new(
            self.title.clone(),
            LatLng::new(f64::from(self.latitude), f64::from(self.longitude)),
            radius_m,
        )
    }
}

/// Raw values of the record's keys, in restore order (`LAT` last).
type Snapshot = [(&'static str, Option<Vec<u8>>); 3];

/// Persist a target, replacing the previous one.
///
/// All or nothing: on error the previous record is restored (or, if even
/// that fails, the record reads as absent).
pub fn save(
    store: &mut dyn StoragePort,
    latitude: f32,
    longitude: f32,
    title: &str,
) -> Result<(), StorageError> {
    let previous = snapshot(store);
    if let Err(e) = write_record(store, latitude, longitude, title) {
        warn!("saving target '{}' failed ({}), restoring previous", title, e);
        restore(store, previous);
        return Err(e);
    }
    info!("saved target '{}' ({}, {})", title, latitude, longitude);
    Ok(())
}

/// Load the saved target, or `None` if nothing usable is stored.
pub fn load(store: &dyn StoragePort) -> Option<SavedTarget> {
    let latitude = read_f32(store, LAT_KEY);
    let longitude = read_f32(store, LNG_KEY);
    let title = read_title(store);

    if latitude == 0.0 || longitude == 0.0 {
        debug!("no saved target (zero coordinate)");
        return None;
    }
    let title = title?;
    Some(SavedTarget {
        latitude,
        longitude,
        title,
    })
}

/// Remove every key of the saved record.
pub fn clear(store: &mut dyn StoragePort) -> Result<(), StorageError> {
    for key in [LAT_KEY, LNG_KEY, TITLE_KEY] {
        store.delete(PREFS_NAMESPACE, key)?;
    }
    Ok(())
}

fn write_record(
    store: &mut dyn StoragePort,
    latitude: f32,
    longitude: f32,
    title: &str,
) -> Result<(), StorageError> {
    store.delete(PREFS_NAMESPACE, LAT_KEY)?;
    store.write(PREFS_NAMESPACE, TITLE_KEY, title.as_bytes())?;
    store.write(PREFS_NAMESPACE, LNG_KEY, &longitude.to_le_bytes())?;
    store.write(PREFS_NAMESPACE, LAT_KEY, &latitude.to_le_bytes())
}

fn snapshot(store: &dyn StoragePort) -> Snapshot {
    [TITLE_KEY, LNG_KEY, LAT_KEY].map(|key| (key, read_raw(store, key)))
}

fn restore(store: &mut dyn StoragePort, snapshot: Snapshot) {
    for (key, value) in snapshot {
        let result = match value {
            Some(bytes) => store.write(PREFS_NAMESPACE, key, &bytes),
            None => store.delete(PREFS_NAMESPACE, key),
        };
        if let Err(e) = result {
            // LAT has not been put back yet, so the record reads as absent.
            warn!("restoring saved target failed at {} ({})", key, e);
            return;
        }
    }
}

fn read_raw(store: &dyn StoragePort, key: &str) -> Option<Vec<u8>> {
    let len = store.value_len(PREFS_NAMESPACE, key).ok()?;
    let mut buf = vec![0u8; len];
    let n = store.read(PREFS_NAMESPACE, key, &mut buf).ok()?;
    buf.truncate(n);
    Some(buf)
}

fn read_f32(store: &dyn StoragePort, key: &str) -> f32 {
    let mut buf = [0u8; 4];
    match store.read(PREFS_NAMESPACE, key, &mut buf) {
        Ok(4) => f32::from_le_bytes(buf),
        _ => 0.0,
    }
}

fn read_title(store: &dyn StoragePort) -> Option<String> {
    String::from_utf8(read_raw(store, TITLE_KEY)?).ok()
}
