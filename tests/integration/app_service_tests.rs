//! Integration tests for the AppService session lifecycle.
//!
//! Drives the service purely through `handle_command`, the way the
//! control loop does, and checks the event stream it produces.

use crate::mock_io::{MockStore, RecordingSink};

use geoalert::app::commands::AppCommand;
use geoalert::app::events::AppEvent;
use geoalert::app::ports::StorageError;
use geoalert::app::service::AppService;
use geoalert::config::SystemConfig;
use geoalert::geofence::Transition;
use geoalert::location::PositionFix;
use geoalert::saved_target;

fn make_app() -> (AppService, MockStore, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let store = MockStore::new();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    (app, store, sink)
}

fn gps(lat: f64, lng: f64, t: i64) -> AppCommand {
    AppCommand::Fix(PositionFix::new(lat, lng, 10.0, t, "gps").unwrap())
}

fn select(name: &str, lat: f64, lng: f64) -> AppCommand {
    AppCommand::PlaceSelected {
        name: name.into(),
        latitude: lat,
        longitude: lng,
    }
}

// ── Walk in, walk out ─────────────────────────────────────────

#[test]
fn walk_into_and_out_of_target_alerts_twice() {
    let (mut app, mut store, mut sink) = make_app();

    app.handle_command(select("Cafe", 0.0, 0.0), &mut store, &mut sink);
    app.handle_command(gps(0.01, 0.0, 1_000), &mut store, &mut sink);
    app.handle_command(gps(0.0005, 0.0, 2_000), &mut store, &mut sink);
    app.handle_command(gps(0.0004, 0.0, 3_000), &mut store, &mut sink);
    app.handle_command(gps(0.01, 0.0, 4_000), &mut store, &mut sink);

    assert_eq!(sink.alerts(), vec![Transition::Entered, Transition::Left]);
    assert_eq!(app.stats().alerts, 2);
    assert!(!app.is_within());
}

#[test]
fn alert_follows_position_adopted() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(select("Cafe", 0.0, 0.0), &mut store, &mut sink);
    sink.clear();

    app.handle_command(gps(0.0, 0.0, 1_000), &mut store, &mut sink);

    assert!(matches!(sink.events[0], AppEvent::PositionAdopted(_)));
    assert_eq!(sink.events[1], AppEvent::Alert(Transition::Entered));
    assert_eq!(sink.events.len(), 2);
}

#[test]
fn fixes_without_target_never_alert() {
    let (mut app, mut store, mut sink) = make_app();
    for i in 0..5 {
        app.handle_command(gps(0.0, 0.0, 1_000 * i), &mut store, &mut sink);
    }
    assert!(sink.alerts().is_empty());
    assert_eq!(app.stats().fixes_adopted, 5);
}

// ── Pause / resume ────────────────────────────────────────────

#[test]
fn fixes_while_paused_are_dropped() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(select("Cafe", 0.0, 0.0), &mut store, &mut sink);
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);

    app.handle_command(gps(0.0, 0.0, 1_000), &mut store, &mut sink);

    assert!(app.is_paused());
    assert!(app.best_position().is_none());
    assert!(sink.alerts().is_empty());
    assert_eq!(app.stats().fixes_dropped, 1);
    assert_eq!(app.stats().fixes_seen, 0);
}

#[test]
fn pause_twice_emits_once() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);
    let paused = sink
        .events
        .iter()
        .filter(|e| **e == AppEvent::Paused)
        .count();
    assert_eq!(paused, 1);
}

#[test]
fn resume_seeds_freshest_cached_fix() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);
    app.handle_command(
        AppCommand::Resume {
            last_known: vec![
                PositionFix::new(1.0, 1.0, 5.0, 9_000, "gps").unwrap(),
                PositionFix::new(2.0, 2.0, 800.0, 10_000, "network").unwrap(),
            ],
        },
        &mut store,
        &mut sink,
    );

    assert!(!app.is_paused());
    let best = app.best_position().unwrap();
    assert_eq!(best.provider.as_str(), "network");
    assert_eq!(best.timestamp_ms, 10_000);
}

#[test]
fn resume_inside_target_reannounces_entered() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(select("Cafe", 0.0, 0.0), &mut store, &mut sink);
    app.handle_command(gps(0.0, 0.0, 1_000), &mut store, &mut sink);
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);
    sink.clear();

    app.handle_command(
        AppCommand::Resume {
            last_known: vec![PositionFix::new(0.0, 0.0, 10.0, 2_000, "gps").unwrap()],
        },
        &mut store,
        &mut sink,
    );

    assert_eq!(sink.alerts(), vec![Transition::Entered]);
    assert!(app.is_within());
}

#[test]
fn resume_without_cache_keeps_previous_best() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(gps(3.0, 3.0, 1_000), &mut store, &mut sink);
    app.handle_command(AppCommand::Pause, &mut store, &mut sink);
    app.handle_command(AppCommand::Resume { last_known: vec![] }, &mut store, &mut sink);

    assert_eq!(app.best_position().unwrap().latitude, 3.0);
    assert!(sink.events.contains(&AppEvent::Resumed));
}

// ── Persistence through the service ───────────────────────────

#[test]
fn selection_is_persisted_and_restored_by_next_session() {
    let (mut app, mut store, mut sink) = make_app();
    app.handle_command(select("Library", 40.5, -73.25), &mut store, &mut sink);

    let mut next = AppService::new(SystemConfig::default());
    let mut next_sink = RecordingSink::new();
    assert!(next.restore_target(&store, &mut next_sink));

    let target = next.target().unwrap();
    assert_eq!(target.label, "Library");
    assert_eq!(target.center.latitude, 40.5);
    assert_eq!(target.center.longitude, -73.25);
    assert!(!next.is_within());
    assert!(matches!(next_sink.events[0], AppEvent::TargetRestored(_)));
}

#[test]
fn storage_failure_keeps_target_for_session() {
    let mut app = AppService::new(SystemConfig::default());
    let mut store = MockStore::failing(StorageError::Full);
    let mut sink = RecordingSink::new();

    app.handle_command(select("Cafe", 0.0, 0.0), &mut store, &mut sink);
    app.handle_command(gps(0.0, 0.0, 1_000), &mut store, &mut sink);

    assert_eq!(app.target().unwrap().label, "Cafe");
    assert_eq!(sink.alerts(), vec![Transition::Entered]);
    assert!(saved_target::load(&store).is_none());
}

#[test]
fn restore_with_empty_store_is_a_no_op() {
    let (mut app, store, mut sink) = make_app();
    sink.clear();
    assert!(!app.restore_target(&store, &mut sink));
    assert!(app.target().is_none());
    assert!(sink.events.is_empty());
}
