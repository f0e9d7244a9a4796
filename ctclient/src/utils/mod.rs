//! Utilities for ctclient: small helpers for log formatting and timeout
//! conversion.

pub mod hex;
pub mod timeout;

pub use self::hex::*;
pub use self::timeout::*;
