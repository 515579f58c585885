//! Fuzz target: replay line parser
//!
//! Feeds arbitrary text to `ReplayParser::parse_line` and checks:
//! - No panics on any input
//! - Blank and comment lines never produce a command
//! - Any parsed fix carries a provider id within `PROVIDER_ID_CAP`
//!
//! cargo fuzz run fuzz_replay_line

#![no_main]

use geoalert::adapters::replay::ReplayParser;
use geoalert::adapters::time::SystemClock;
use geoalert::app::commands::AppCommand;
use geoalert::location::PROVIDER_ID_CAP;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    let parser = ReplayParser::new(SystemClock::new());
    let parsed = parser.parse_line(1, line);

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        assert!(matches!(parsed, Ok(None)), "ignored line produced a command");
    }

    match parsed {
        Ok(Some(AppCommand::Fix(fix))) => {
            assert!(fix.provider.len() <= PROVIDER_ID_CAP);
        }
        Ok(Some(AppCommand::Resume { last_known })) => {
            for fix in last_known {
                assert!(fix.provider.len() <= PROVIDER_ID_CAP);
            }
        }
        _ => {}
    }
});
