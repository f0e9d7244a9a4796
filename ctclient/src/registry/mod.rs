// ctclient-rs/ctclient/src/registry/mod.rs

//! Reader enumeration. A registry answers "which readers exist right now,
//! and what do their slots look like".

#[cfg(feature = "socket")]
pub mod status_file;

#[cfg(feature = "socket")]
pub use status_file::StatusFileRegistry;

use crate::types::ReaderInfo;
use crate::{Error, Result};

/// Source of reader descriptors.
pub trait ReaderRegistry {
    /// Current descriptors, indexed by reader number.
    fn readers(&self) -> Result<Vec<ReaderInfo>>;
}

/// In-memory registry. The owner may change card sequences between
/// connects to simulate insertions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistry {
    readers: Vec<ReaderInfo>,
}

impl StaticRegistry {
    /// Registry listing `readers` in order
    pub fn new(readers: Vec<ReaderInfo>) -> Self {
        Self { readers }
    }

    /// Append a reader.
    pub fn push(&mut self, info: ReaderInfo) {
        self.readers.push(info);
    }

    /// Descriptor of reader `reader`
    pub fn get(&self, reader: usize) -> Option<&ReaderInfo> {
        self.readers.get(reader)
    }

    /// Overwrite the card sequence of one slot.
    pub fn set_card_seq(&mut self, reader: usize, slot: usize, seq: u32) -> Result<()> {
        let info = self.readers.get_mut(reader).ok_or_else(|| {
            Error::InvalidArgument(format!("reader {} not registered", reader))
        })?;
        info.set_card_seq(slot, seq)
    }

    /// Simulate a card insertion: bump the slot's sequence.
    pub fn insert_card(&mut self, reader: usize, slot: usize) -> Result<u32> {
        let next = self
            .get(reader)
            .and_then(|info| info.card_seq(slot))
            .unwrap_or(0)
            .wrapping_add(1)
            .max(1);
        self.set_card_seq(reader, slot, next)?;
        Ok(next)
    }

    /// Simulate a removal: clear the slot's sequence.
    pub fn remove_card(&mut self, reader: usize, slot: usize) -> Result<()> {
        self.set_card_seq(reader, slot, 0)
    }
}

impl ReaderRegistry for StaticRegistry {
    fn readers(&self) -> Result<Vec<ReaderInfo>> {
        Ok(self.readers.clone())
    }
}

impl<R: ReaderRegistry + ?Sized> ReaderRegistry for &R {
    fn readers(&self) -> Result<Vec<ReaderInfo>> {
        (**self).readers()
    }
}
