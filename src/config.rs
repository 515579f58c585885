//! System configuration parameters
//!
//! All tunable parameters for the GeoAlert engine.
//! Values can be overridden through the preference store.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Geofence ---
    /// Radius of the target circle in metres
    pub alert_radius_m: f64,

    // --- Arbitration ---
    /// Time separation beyond which a fix is judged on recency alone (ms)
    pub stale_fix_ms: u32,
    /// Accuracy loss still accepted from the incumbent's own provider (m)
    pub significant_accuracy_loss_m: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            alert_radius_m: 200.0,
            stale_fix_ms: 2 * 60 * 1000, // two minutes
            significant_accuracy_loss_m: 200.0,
        }
    }
}

/// Values given on the command line, applied over the stored config.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub alert_radius_m: Option<f64>,
    pub stale_fix_ms: Option<u32>,
    pub significant_accuracy_loss_m: Option<f32>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay every given value onto `config`.
    pub fn apply(&self, config: &mut SystemConfig) {
        if let Some(r) = self.alert_radius_m {
            config.alert_radius_m = r;
        }
        if let Some(ms) = self.stale_fix_ms {
            config.stale_fix_ms = ms;
        }
        if let Some(m) = self.significant_accuracy_loss_m {
            config.significant_accuracy_loss_m = m;
        }
    }
}
