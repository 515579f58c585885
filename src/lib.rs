//! GeoAlert library.
//!
//! Location-fix arbitration and circular geofence alerting.  The pure
//! logic lives in [`location`], [`geofence`] and [`app`]; everything that
//! touches files, clocks or output lives in [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod geo;
pub mod geofence;
pub mod location;
pub mod saved_target;
