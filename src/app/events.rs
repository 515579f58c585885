//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: show a transient alert, recentre
//! the map camera, redraw the target circle, write a log line.

use crate::geofence::{TargetGeofence, Transition};
use crate::location::PositionFix;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// A fix became the best current position (camera centring).
    PositionAdopted(PositionFix),

    /// The user picked a new target (marker / circle redraw).
    TargetChanged(TargetGeofence),

    /// A previously saved target was reinstated at startup.
    TargetRestored(TargetGeofence),

    /// The user crossed the target boundary (one-shot alert).
    Alert(Transition),

    /// Location updates suspended.
    Paused,

    /// Location updates resumed.
    Resumed,
}
