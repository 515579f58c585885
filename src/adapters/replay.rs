//! JSON-lines replay adapter.
//!
//! Stands in for the device location subsystem and the place picker on a
//! host: each line of a replay file is one inbound event.
//!
//! ```text
//! {"fix":{"latitude":47.61,"longitude":-122.33,"accuracy":12.0,"timestamp_ms":1700000000000,"provider":"gps"}}
//! {"place_selected":{"name":"Cafe","latitude":47.6101,"longitude":-122.3421}}
//! "pause"
//! {"resume":{"last_known":[ ...fix objects... ]}}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.  A fix without
//! `timestamp_ms` is stamped with the current wall-clock time.

use std::io::BufRead;

use log::warn;
use serde::Deserialize;

use super::time::SystemClock;
use crate::app::commands::AppCommand;
use crate::error::{Error, Result};
use crate::location::PositionFix;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ReplayRecord {
    Fix(ReplayFix),
    PlaceSelected {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    Pause,
    Resume {
        #[serde(default)]
        last_known: Vec<ReplayFix>,
    },
}

#[derive(Debug, Deserialize)]
struct ReplayFix {
    latitude: f64,
    longitude: f64,
    accuracy: f32,
    #[serde(default)]
    timestamp_ms: Option<i64>,
    provider: String,
}

/// Outcome of replaying a whole source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records turned into commands.
    pub commands: usize,
    /// Malformed records that were skipped.
    pub skipped: usize,
}

/// Turns replay lines into [`AppCommand`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplayParser {
    clock: SystemClock,
}

impl ReplayParser {
    pub fn new(clock: SystemClock) -> Self {
        Self { clock }
    }

    /// Parse one line.  `Ok(None)` for blank and comment lines.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Result<Option<AppCommand>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        let record: ReplayRecord =
            serde_json::from_str(trimmed).map_err(|_| Error::Replay { line: line_no })?;

        let malformed = |_: Error| Error::Replay { line: line_no };
        let cmd = match record {
            ReplayRecord::Fix(f) => AppCommand::Fix(self.build_fix(f).map_err(malformed)?),
            ReplayRecord::PlaceSelected {
                name,
                latitude,
                longitude,
            } => AppCommand::PlaceSelected {
                name,
                latitude,
                longitude,
            },
            ReplayRecord::Pause => AppCommand::Pause,
            ReplayRecord::Resume { last_known } => AppCommand::Resume {
                last_known: last_known
                    .into_iter()
                    .map(|f| self.build_fix(f))
                    .collect::<Result<Vec<_>>>()
                    .map_err(malformed)?,
            },
        };
        Ok(Some(cmd))
    }

    /// Feed every record of `reader` to `on_command`.
    ///
    /// Malformed records are logged and skipped; only I/O failures abort.
    pub fn replay<R: BufRead>(
        &self,
        reader: R,
        mut on_command: impl FnMut(AppCommand),
    ) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            match self.parse_line(idx + 1, &line) {
                Ok(Some(cmd)) => {
                    on_command(cmd);
                    summary.commands += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("{}", e);
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }

    fn build_fix(&self, f: ReplayFix) -> Result<PositionFix> {
        let timestamp_ms = f.timestamp_ms.unwrap_or_else(|| self.clock.now_millis());
        PositionFix::new(f.latitude, f.longitude, f.accuracy, timestamp_ms, &f.provider)
    }
}
