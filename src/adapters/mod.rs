//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `log_sink` | EventSink    | `log` output                    |
//! | `prefs`    | ConfigPort   | in-memory / JSON-file store     |
//! |            | StoragePort  |                                 |
//! | `replay`   | (inbound)    | JSON-lines fix/selection files  |
//! | `time`     | (clock)      | host wall clock                 |

pub mod log_sink;
pub mod prefs;
pub mod replay;
pub mod time;
