// ctclient-rs/ctclient/src/protocol/buffer.rs

use crate::{Error, Result};

/// Append-only byte buffer with a hard capacity. Writes that would exceed
/// the capacity fail with `BufferOverflow` and leave the buffer unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl FrameBuffer {
    /// Empty buffer that will hold at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Fixed upper bound
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Nothing written yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes that still fit
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Fail unless `additional` more bytes fit.
    pub fn reserve_check(&self, additional: usize) -> Result<()> {
        if additional > self.remaining() {
            return Err(Error::BufferOverflow {
                capacity: self.capacity,
                required: self.data.len() + additional,
            });
        }
        Ok(())
    }

    /// Append one byte.
    pub fn put_u8(&mut self, byte: u8) -> Result<()> {
        self.reserve_check(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Append `bytes`, all or nothing.
    pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_check(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Take the written bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for FrameBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
