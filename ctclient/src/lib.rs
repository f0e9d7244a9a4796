// ctclient-rs/ctclient/src/lib.rs

//! ctclient
//!
//! Pure Rust client for smart-card reader manager services. A client
//! connects to one reader, queries card presence from the reader
//! descriptor and talks to the cards through RESET, TRANSACT, LOCK and
//! UNLOCK requests.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
/// Crate-wide error and result types
pub mod error;
/// Common imports for client code
pub mod prelude;
/// Request encoding and reply decoding
pub mod protocol;
/// Reader handles and the card operations on them
pub mod reader;
pub mod registry;
pub mod test_support;
/// Connections to the reader manager
pub mod transport;
/// Wire-level and descriptor types
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the wire types in `types` are available to consumers.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
