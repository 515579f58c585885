//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the fix arbiter and the geofence monitor for one
//! session.  It exposes a clean, platform-agnostic API.  All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  AppCommand ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService         │
//!  StoragePort ◀─▶│  FixArbiter · Geofence    │
//!                 └──────────────────────────┘
//! ```
//!
//! Each command is handled to completion before the next one; the
//! service is not meant to be shared between threads (see
//! [`Inbox`](super::inbox::Inbox) for fan-in).

use log::{info, warn};

use crate::config::SystemConfig;
use crate::geo::LatLng;
use crate::geofence::{GeofenceMonitor, TargetGeofence, Transition};
use crate::location::{FixArbiter, PositionFix};
use crate::saved_target;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, StoragePort};

// ───────────────────────────────────────────────────────────────
// Counters
// ───────────────────────────────────────────────────────────────

/// Running totals since the service was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Fixes delivered while not paused.
    pub fixes_seen: u64,
    /// Fixes that became the best position.
    pub fixes_adopted: u64,
    /// Fixes dropped because the session was paused.
    pub fixes_dropped: u64,
    /// Entered/Left alerts emitted.
    pub alerts: u64,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    arbiter: FixArbiter,
    monitor: GeofenceMonitor,
    paused: bool,
    stats: SessionStats,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        let arbiter = FixArbiter::new(&config);
        Self {
            config,
            arbiter,
            monitor: GeofenceMonitor::new(),
            paused: false,
            stats: SessionStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (radius={}m, stale after {}ms)",
            self.config.alert_radius_m, self.config.stale_fix_ms
        );
    }

    /// Reinstate the last saved target, if there is one.
    ///
    /// Goes through the same reset path as a fresh selection, so no alert
    /// fires until the next fix.
    pub fn restore_target(&mut self, store: &impl StoragePort, sink: &mut impl EventSink) -> bool {
        let Some(saved) = saved_target::load(store) else {
            info!("No saved target");
            return false;
        };
        let target = saved.to_geofence(self.config.alert_radius_m);
        self.monitor.set_target(target.clone());
        sink.emit(&AppEvent::TargetRestored(target));
        true
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one inbound command to completion.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::Fix(fix) => {
                self.on_fix(fix, sink);
            }
            AppCommand::PlaceSelected {
                name,
                latitude,
                longitude,
            } => {
                self.select_place(&name, LatLng::new(latitude, longitude), store, sink);
            }
            AppCommand::Pause => {
                if !self.paused {
                    self.paused = true;
                    sink.emit(&AppEvent::Paused);
                    info!("Location updates paused");
                }
            }
            AppCommand::Resume { last_known } => {
                self.resume(last_known, sink);
            }
        }
    }

    /// Arbitrate a fix and, if adopted, check it against the target.
    pub fn on_fix(&mut self, fix: PositionFix, sink: &mut impl EventSink) -> Option<Transition> {
        if self.paused {
            self.stats.fixes_dropped += 1;
            return None;
        }
        self.stats.fixes_seen += 1;

        if !self.arbiter.consider(fix) {
            return None;
        }
        self.stats.fixes_adopted += 1;

        let best = self.arbiter.best()?.clone();
        let transition = self.monitor.update(&best);
        sink.emit(&AppEvent::PositionAdopted(best));
        if let Some(t) = transition {
            self.alert(t, sink);
        }
        transition
    }

    /// Replace the target with a newly picked place and persist it.
    ///
    /// A storage failure is logged; the new target stays active for this
    /// session either way.
    pub fn select_place(
        &mut self,
        name: &str,
        center: LatLng,
        store: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        let target = TargetGeofence::new(name, center, self.config.alert_radius_m);
        self.monitor.set_target(target.clone());

        if let Err(e) = saved_target::save(
            store,
            center.latitude as f32,
            center.longitude as f32,
            name,
        ) {
            warn!("Could not persist target '{}': {}", name, e);
        }
        sink.emit(&AppEvent::TargetChanged(target));
    }

    fn resume(&mut self, last_known: Vec<PositionFix>, sink: &mut impl EventSink) {
        self.paused = false;
        sink.emit(&AppEvent::Resumed);
        info!("Location updates resumed ({} cached fixes)", last_known.len());

        if !self.arbiter.seed(last_known) {
            info!("No cached location available");
            return;
        }
        let Some(best) = self.arbiter.best().cloned() else {
            return;
        };
        sink.emit(&AppEvent::PositionAdopted(best.clone()));
        if let Some(t) = self.monitor.reassert(&best) {
            self.alert(t, sink);
        }
    }

    fn alert(&mut self, transition: Transition, sink: &mut impl EventSink) {
        self.stats.alerts += 1;
        sink.emit(&AppEvent::Alert(transition));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current best position (read-only snapshot).
    pub fn best_position(&self) -> Option<&PositionFix> {
        self.arbiter.best()
    }

    /// Current target (read-only snapshot).
    pub fn target(&self) -> Option<&TargetGeofence> {
        self.monitor.target()
    }

    /// Whether the user is currently considered inside the target.
    pub fn is_within(&self) -> bool {
        self.monitor.is_within()
    }

    /// Distance from the best position to the target, if both exist.
    pub fn distance_to_target(&self) -> Option<f64> {
        self.monitor.distance_to_target(self.arbiter.best()?)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
