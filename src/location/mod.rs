//! Location fixes and fix arbitration.
//!
//! Raw fixes arrive from several providers (satellite, network, fused, …)
//! at provider-chosen intervals.  The [`FixArbiter`] decides, fix by fix,
//! which one the rest of the system should believe.

pub mod arbiter;

pub use arbiter::{FixArbiter, Verdict};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::LatLng;

/// Maximum provider-name length in bytes.
pub const PROVIDER_ID_CAP: usize = 32;

/// Identity of the subsystem that produced a fix (e.g. `"gps"`).
pub type ProviderId = heapless::String<PROVIDER_ID_CAP>;

/// Well-known provider names.
pub mod providers {
    pub const GPS: &str = "gps";
    pub const NETWORK: &str = "network";
}

/// A single reported position.
///
/// Values are taken as-is: negative accuracy or NaN coordinates are the
/// location subsystem's problem, not ours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
    /// Estimated horizontal error radius (metres, lower is better).
    pub accuracy: f32,
    /// Wall-clock time of the fix (milliseconds since the Unix epoch).
    pub timestamp_ms: i64,
    pub provider: ProviderId,
}

impl PositionFix {
    /// Build a fix.  Fails with [`Error::ProviderName`] if `provider` is
    /// longer than [`PROVIDER_ID_CAP`] bytes.
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy: f32,
        timestamp_ms: i64,
        provider: &str,
    ) -> Result<Self> {
        Ok(Self {
            latitude,
            longitude,
            accuracy,
            timestamp_ms,
            provider: provider_id(provider)?,
        })
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn same_provider(&self, other: &PositionFix) -> bool {
        self.provider == other.provider
    }
}

/// Convert a provider name into a [`ProviderId`].
///
/// Names are never truncated: two providers that share a long prefix
/// must not end up with the same id.
pub fn provider_id(name: &str) -> Result<ProviderId> {
    let mut id = ProviderId::new();
    id.push_str(name).map_err(|()| Error::ProviderName)?;
    Ok(id)
}
