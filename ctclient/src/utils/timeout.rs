// ctclient-rs/ctclient/src/utils/timeout.rs
//! Timeout helpers.
//!
//! The reader manager takes RESET timeouts in whole seconds, with zero
//! meaning "use the service default".

use std::time::Duration;

/// Convert an optional timeout into the wire value in whole seconds.
/// Sub-second remainders are dropped and values beyond `u32::MAX` seconds
/// saturate. `None` and anything under one second map to `None`.
pub fn timeout_secs(timeout: Option<Duration>) -> Option<u32> {
    timeout
        .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
        .filter(|&secs| secs != 0)
}
