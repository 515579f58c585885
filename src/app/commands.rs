//! Inbound commands to the application service.
//!
//! These represent events pushed by the outside world (location
//! providers, the place picker, the session lifecycle) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::location::PositionFix;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// A raw fix from one of the location providers.
    Fix(PositionFix),

    /// The user picked a point of interest.
    PlaceSelected {
        name: String,
        latitude: f64,
        longitude: f64,
    },

    /// Stop accepting fixes (session moved to the background).
    Pause,

    /// Accept fixes again; `last_known` carries each provider's cached
    /// fix, if it has one.
    Resume { last_known: Vec<PositionFix> },
}
