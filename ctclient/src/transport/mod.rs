// ctclient-rs/ctclient/src/transport/mod.rs

/// In-memory transports for tests
pub mod mock;
#[cfg(all(unix, feature = "socket"))]
pub mod socket;
/// Transport and connector traits
pub mod traits;

pub use mock::{LoopbackTransport, MockConnector, MockTransport};
#[cfg(all(unix, feature = "socket"))]
pub use socket::{PacketHeader, SocketConnector, SocketTransport};
pub use traits::{Connector, Transport};
