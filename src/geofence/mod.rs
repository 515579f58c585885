//! Circular geofence and edge-triggered containment tracking.
//!
//! [`GeofenceMonitor`] turns a stream of trusted positions into at most
//! one [`Transition`] per update:
//!
//! ```text
//!            within && !inside
//!   Outside ───────────────────▶ Inside      (emits Entered)
//!           ◀───────────────────
//!            !within && inside               (emits Left)
//! ```
//!
//! Replacing the target forces the monitor back to *Outside* without
//! re-evaluating, so a user already standing inside a newly chosen target
//! hears nothing until the next position update, which then fires
//! `Entered`.

use log::info;
use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, great_circle_distance};
use crate::location::PositionFix;

/// A containment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Entered,
    Left,
}

impl Transition {
    /// User-facing alert text.
    pub fn message(self) -> &'static str {
        match self {
            Self::Entered => "Entered Target Radius",
            Self::Left => "Left Target Radius",
        }
    }
}

/// The single active point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetGeofence {
    pub center: LatLng,
    pub radius_m: f64,
    pub label: String,
}

impl TargetGeofence {
    pub fn new(label: impl Into<String>, center: LatLng, radius_m: f64) -> Self {
        Self {
            center,
            radius_m,
            label: label.into(),
        }
    }

    /// Distance from `point` to the centre (metres).
    pub fn distance_to(&self, point: LatLng) -> f64 {
        great_circle_distance(point, self.center)
    }

    /// Strictly inside: a point exactly on the boundary is outside.
    pub fn contains(&self, point: LatLng) -> bool {
        self.distance_to(point) < self.radius_m
    }
}

/// Tracks whether the user is inside the active target.
#[derive(Debug, Default)]
pub struct GeofenceMonitor {
    target: Option<TargetGeofence>,
    inside: bool,
}

impl GeofenceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active target and reset containment to outside.
    pub fn set_target(&mut self, target: TargetGeofence) {
        info!(
            "geofence: target '{}' at ({:.6}, {:.6}) r={}m",
            target.label, target.center.latitude, target.center.longitude, target.radius_m
        );
        self.target = Some(target);
        self.inside = false;
    }

    /// Evaluate a new position.  No-op without a target.
    pub fn update(&mut self, position: &PositionFix) -> Option<Transition> {
        let target = self.target.as_ref()?;
        let now_within = target.contains(position.lat_lng());

        if !self.inside && now_within {
            self.inside = true;
            Some(Transition::Entered)
        } else if self.inside && !now_within {
            self.inside = false;
            Some(Transition::Left)
        } else {
            None
        }
    }

    /// Re-announce presence after a session resume.
    ///
    /// Inside the target → containment is set and `Entered` is returned
    /// whatever the previous state.  Outside → nothing changes.
    pub fn reassert(&mut self, position: &PositionFix) -> Option<Transition> {
        let target = self.target.as_ref()?;
        if target.contains(position.lat_lng()) {
            self.inside = true;
            Some(Transition::Entered)
        } else {
            None
        }
    }

    pub fn target(&self) -> Option<&TargetGeofence> {
        self.target.as_ref()
    }

    pub fn is_within(&self) -> bool {
        self.inside
    }

    /// Distance from `position` to the active target, if any.
    pub fn distance_to_target(&self, position: &PositionFix) -> Option<f64> {
        self.target
            .as_ref()
            .map(|t| t.distance_to(position.lat_lng()))
    }
}
