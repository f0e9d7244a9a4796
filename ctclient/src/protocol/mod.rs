// ctclient-rs/ctclient/src/protocol/mod.rs

/// Bounded frame buffer
pub mod buffer;
/// Request encoder
pub mod commands;
pub mod responses;
pub mod tlv;

pub use buffer::FrameBuffer;
pub use commands::Command;
pub use responses::{decode_atr, decode_lock, decode_transact};
pub use tlv::{TlvBuilder, TlvParser};
