//! Saved-target record against a bare key-value store.

use crate::mock_io::MockStore;

use geoalert::app::ports::{StorageError, StoragePort};
use geoalert::saved_target::{self, LAT_KEY, LNG_KEY, PREFS_NAMESPACE, TITLE_KEY};

#[test]
fn save_writes_three_keys_under_prefs() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 12.34, 56.78, "Cafe").unwrap();

    assert!(store.exists(PREFS_NAMESPACE, LAT_KEY));
    assert!(store.exists(PREFS_NAMESPACE, LNG_KEY));
    assert!(store.exists(PREFS_NAMESPACE, TITLE_KEY));
    assert_eq!(store.len(), 3);
}

#[test]
fn round_trip_keeps_f32_values() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 12.34, 56.78, "Cafe").unwrap();

    let saved = saved_target::load(&store).unwrap();
    assert_eq!(saved.latitude, 12.34_f32);
    assert_eq!(saved.longitude, 56.78_f32);
    assert_eq!(saved.title, "Cafe");
}

#[test]
fn later_save_overwrites_earlier() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 1.0, 2.0, "First").unwrap();
    saved_target::save(&mut store, 3.0, 4.0, "Second").unwrap();

    let saved = saved_target::load(&store).unwrap();
    assert_eq!(saved.title, "Second");
    assert_eq!(saved.latitude, 3.0);
}

#[test]
fn zero_latitude_reads_as_absent() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 0.0, 56.78, "Equator").unwrap();
    assert!(saved_target::load(&store).is_none());
}

#[test]
fn missing_title_reads_as_absent() {
    let mut store = MockStore::new();
    store
        .write(PREFS_NAMESPACE, LAT_KEY, &1.5_f32.to_le_bytes())
        .unwrap();
    store
        .write(PREFS_NAMESPACE, LNG_KEY, &2.5_f32.to_le_bytes())
        .unwrap();
    assert!(saved_target::load(&store).is_none());
}

#[test]
fn long_title_round_trips_whole() {
    let mut store = MockStore::new();
    let title = "Long Place Name ".repeat(64);
    saved_target::save(&mut store, 1.0, 1.0, &title).unwrap();

    let saved = saved_target::load(&store).unwrap();
    assert_eq!(saved.title, title);
}

#[test]
fn interrupted_save_keeps_previous_target() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 1.0, 2.0, "Home").unwrap();

    // Writes 1-3 were Home; the second save fails on its LNG write.
    store.fail_write_no = Some(5);
    assert_eq!(
        saved_target::save(&mut store, 10.0, 20.0, "Cafe"),
        Err(StorageError::IoError)
    );

    let saved = saved_target::load(&store).unwrap();
    assert_eq!(saved.latitude, 1.0);
    assert_eq!(saved.longitude, 2.0);
    assert_eq!(saved.title, "Home");
}

#[test]
fn every_failing_write_position_leaves_a_whole_record() {
    for n in 4..=6 {
        let mut store = MockStore::new();
        saved_target::save(&mut store, 1.0, 2.0, "Home").unwrap();
        store.fail_write_no = Some(n);
        let result = saved_target::save(&mut store, 10.0, 20.0, "Cafe");

        let saved = saved_target::load(&store).unwrap();
        let got = (saved.latitude, saved.longitude, saved.title.as_str());
        if result.is_ok() {
            assert_eq!(got, (10.0, 20.0, "Cafe"), "write {n}");
        } else {
            assert_eq!(got, (1.0, 2.0, "Home"), "write {n}");
        }
    }
}

#[test]
fn write_failure_is_reported() {
    let mut store = MockStore::failing(StorageError::IoError);
    assert_eq!(
        saved_target::save(&mut store, 1.0, 1.0, "Cafe"),
        Err(StorageError::IoError)
    );
}

#[test]
fn clear_removes_record() {
    let mut store = MockStore::new();
    saved_target::save(&mut store, 1.0, 1.0, "Cafe").unwrap();
    saved_target::clear(&mut store).unwrap();
    assert!(saved_target::load(&store).is_none());
    assert_eq!(store.len(), 0);
}
