// ctclient-rs/ctclient/src/reader/handle.rs

use std::fmt;

use log::{debug, trace, warn};

use crate::protocol::Command;
use crate::registry::ReaderRegistry;
use crate::transport::{Connector, Transport};
use crate::types::ReaderInfo;
use crate::utils::HexDisplay;
use crate::{Error, Result};

/// Logical connection to one reader.
///
/// The descriptor is captured once at connect time; `card_status` reads
/// card sequences from that snapshot. Call `refresh` to pick up insertions
/// the enumeration service has seen since.
pub struct ReaderHandle {
    transport: Box<dyn Transport>,
    index: usize,
    info: ReaderInfo,
    /// Last card sequence seen by `card_status`, per slot
    pub(crate) last_seen: Vec<u32>,
    closed: bool,
}

impl ReaderHandle {
    /// Connect to reader `reader` as listed by `registry`, opening the
    /// transport through `connector`.
    pub fn connect(
        reader: usize,
        registry: &dyn ReaderRegistry,
        connector: &dyn Connector,
    ) -> Result<Self> {
        let mut readers = registry.readers()?;
        if reader >= readers.len() {
            return Err(Error::InvalidArgument(format!(
                "reader {} out of range ({} readers)",
                reader,
                readers.len()
            )));
        }

        let address = reader.to_string();
        let transport = connector.open(&address)?;
        let info = readers.swap_remove(reader);
        debug!(
            "connected to reader {} '{}' ({} slots)",
            reader,
            info.name,
            info.slots()
        );

        Ok(Self {
            transport,
            index: reader,
            last_seen: vec![0; info.slots()],
            info,
            closed: false,
        })
    }

    /// Build a handle around an already opened transport and a known
    /// descriptor, bypassing enumeration.
    pub fn from_parts(index: usize, info: ReaderInfo, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            index,
            last_seen: vec![0; info.slots()],
            info,
            closed: false,
        }
    }

    /// Close the transport and discard all handle state.
    pub fn disconnect(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.last_seen.fill(0);
        debug!("disconnecting from reader {}", self.index);
        self.transport.close()
    }

    /// Copy of the descriptor snapshot. No I/O.
    pub fn reader_status(&self) -> ReaderInfo {
        self.info.clone()
    }

    /// Reader number this handle was opened for
    pub fn reader_index(&self) -> usize {
        self.index
    }

    /// Re-read this reader's descriptor from `registry`. The last-observed
    /// card sequences are kept, so the next `card_status` reports any
    /// insertion that happened in between.
    pub fn refresh(&mut self, registry: &dyn ReaderRegistry) -> Result<()> {
        let mut readers = registry.readers()?;
        if self.index >= readers.len() {
            return Err(Error::InvalidArgument(format!(
                "reader {} no longer listed ({} readers)",
                self.index,
                readers.len()
            )));
        }
        self.info = readers.swap_remove(self.index);
        self.last_seen.resize(self.info.slots(), 0);
        Ok(())
    }

    /// Validate `slot` against the descriptor and narrow it to the wire type.
    pub(crate) fn check_slot(&self, slot: usize) -> Result<u8> {
        if slot >= self.info.slots() {
            return Err(Error::InvalidArgument(format!(
                "slot {} out of range (reader {} has {} slots)",
                slot,
                self.index,
                self.info.slots()
            )));
        }
        u8::try_from(slot).map_err(|_| Error::InvalidArgument(format!("slot {}", slot)))
    }

    pub(crate) fn info(&self) -> &ReaderInfo {
        &self.info
    }

    /// Encode `cmd`, perform one blocking exchange and return the raw reply.
    /// Encoding errors abort before any I/O.
    pub(crate) fn execute(&mut self, cmd: &Command<'_>, capacity: usize) -> Result<Vec<u8>> {
        let frame = cmd.encode()?;
        debug!(
            "reader {}: {} slot {} ({} bytes)",
            self.index,
            cmd.opcode(),
            cmd.slot(),
            frame.len()
        );
        trace!("request {}", HexDisplay(frame.as_slice()));

        let reply = self.transport.call(frame.as_slice(), capacity)?;
        trace!("reply {}", HexDisplay(&reply));
        Ok(reply)
    }
}

impl Drop for ReaderHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("closing reader {} failed: {}", self.index, e);
        }
    }
}

impl fmt::Debug for ReaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderHandle")
            .field("index", &self.index)
            .field("info", &self.info)
            .field("last_seen", &self.last_seen)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
