//! Inbox fan-in feeding a single AppService.

use crate::mock_io::{MockStore, RecordingSink};

use geoalert::app::commands::AppCommand;
use geoalert::app::inbox::Inbox;
use geoalert::app::service::AppService;
use geoalert::config::SystemConfig;
use geoalert::location::PositionFix;

#[test]
fn two_providers_fan_in_to_one_service() {
    let inbox = Inbox::new();
    let mut app = AppService::new(SystemConfig::default());
    let mut store = MockStore::new();
    let mut sink = RecordingSink::new();

    std::thread::scope(|s| {
        for provider in ["gps", "network"] {
            let sender = inbox.sender();
            s.spawn(move || {
                for i in 0..100 {
                    let fix = PositionFix::new(0.0, 0.0, 10.0, i * 1_000, provider).unwrap();
                    sender.post(AppCommand::Fix(fix));
                }
            });
        }

        let handled = inbox.serve(|cmd| app.handle_command(cmd, &mut store, &mut sink));
        assert_eq!(handled, 200);
    });

    assert!(inbox.is_empty());
    assert_eq!(app.stats().fixes_seen, 200);
}

#[test]
fn pause_posted_before_fix_is_honoured() {
    let inbox = Inbox::new();
    let mut app = AppService::new(SystemConfig::default());
    let mut store = MockStore::new();
    let mut sink = RecordingSink::new();

    inbox.post(AppCommand::Pause).unwrap();
    inbox
        .post(AppCommand::Fix(PositionFix::new(1.0, 1.0, 5.0, 1_000, "gps").unwrap()))
        .unwrap();
    inbox.drain(|cmd| app.handle_command(cmd, &mut store, &mut sink));

    assert!(app.best_position().is_none());
    assert_eq!(app.stats().fixes_dropped, 1);
}
