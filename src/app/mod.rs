//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the session rules for GeoAlert: fix arbitration,
//! geofence transitions, target persistence.  All interaction with the
//! outside world happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a device or a map.

pub mod commands;
pub mod events;
pub mod inbox;
pub mod ports;
pub mod service;
