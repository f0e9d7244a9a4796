// ctclient-rs/ctclient/src/reader/mod.rs

/// Builder wiring registry, connector and config together
pub mod builder;
/// Reader handle lifecycle
pub mod handle;
mod operations;

pub use builder::ReaderBuilder;
pub use handle::ReaderHandle;
