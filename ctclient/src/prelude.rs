// ctclient-rs/ctclient/src/prelude.rs

pub use crate::config::ClientConfig;
pub use crate::reader::{ReaderBuilder, ReaderHandle};
pub use crate::registry::{ReaderRegistry, StaticRegistry};
pub use crate::transport::{Connector, Transport};
pub use crate::{CardStatus, Error, LockHandle, LockType, ReaderInfo, Result, ServiceError};

#[cfg(feature = "socket")]
pub use crate::registry::StatusFileRegistry;
#[cfg(all(unix, feature = "socket"))]
pub use crate::transport::{SocketConnector, SocketTransport};

// Re-export small utilities for convenience
pub use crate::utils::{HexDisplay, bytes_to_hex_spaced};
