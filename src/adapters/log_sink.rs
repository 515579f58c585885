//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade.  Transition alerts are the transient
//! user-visible notification on a headless host; a UI adapter would show
//! a toast and move the camera instead.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink {
    alerts: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts shown so far.
    pub fn alerts_shown(&self) -> u32 {
        self.alerts
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | waiting for fixes");
            }
            AppEvent::PositionAdopted(fix) => {
                debug!(
                    "POS   | ({:.6}, {:.6}) \u{00b1}{:.0}m via {} @ {}",
                    fix.latitude, fix.longitude, fix.accuracy, fix.provider, fix.timestamp_ms
                );
            }
            AppEvent::TargetChanged(t) => {
                info!(
                    "TARGET| '{}' ({:.6}, {:.6}) r={}m",
                    t.label, t.center.latitude, t.center.longitude, t.radius_m
                );
            }
            AppEvent::TargetRestored(t) => {
                info!(
                    "TARGET| restored '{}' ({:.6}, {:.6})",
                    t.label, t.center.latitude, t.center.longitude
                );
            }
            AppEvent::Alert(transition) => {
                self.alerts += 1;
                info!("ALERT | {}", transition.message());
            }
            AppEvent::Paused => {
                info!("PAUSE | location updates off");
            }
            AppEvent::Resumed => {
                info!("RESUME| location updates on");
            }
        }
    }
}
