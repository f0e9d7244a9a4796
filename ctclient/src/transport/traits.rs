// ctclient-rs/ctclient/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the connection to the reader manager away from
/// command encoding and decoding.
pub trait Transport {
    /// Send one request frame and block until its reply arrives.
    ///
    /// Replies longer than `capacity` fail with `BufferOverflow`; a failure
    /// status reported by the service surfaces as `Error::Service`.
    fn call(&mut self, request: &[u8], capacity: usize) -> Result<Vec<u8>>;

    /// Close the connection. Calling it on a closed transport is a no-op.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens transports by address. The address of reader `n` is the decimal
/// string of `n`.
pub trait Connector {
    /// Open a connection to `address`.
    fn open(&self, address: &str) -> Result<Box<dyn Transport>>;
}
