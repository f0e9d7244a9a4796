// ctclient-rs/ctclient/src/protocol/commands.rs

use crate::constants::{COMMAND_BUFFER_SIZE, TRANSACT_BUFFER_SIZE};
use crate::protocol::buffer::FrameBuffer;
use crate::protocol::tlv::TlvBuilder;
use crate::types::{LockHandle, LockType, Opcode, Tag};
use crate::Result;

/// High-level command. Every frame starts with the opcode byte and the slot
/// byte; arguments follow as tagged fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// RESET(slot, [TIMEOUT], [MESSAGE]) -> {ATR}. A zero timeout and an
    /// absent message are left out of the frame.
    Reset {
        /// Target slot
        slot: u8,
        /// Seconds to wait for insertion
        timeout: Option<u32>,
        /// Prompt for the reader display
        message: Option<&'a str>,
    },
    /// TRANSACT(slot, apdu) -> raw reply. The APDU follows the header
    /// verbatim, without a tag.
    Transact {
        /// Target slot
        slot: u8,
        /// Command APDU
        apdu: &'a [u8],
    },
    /// LOCK(slot, LOCKTYPE) -> {LOCK}
    Lock {
        /// Target slot
        slot: u8,
        /// Requested lock type
        lock_type: LockType,
    },
    /// UNLOCK(slot, LOCK)
    Unlock {
        /// Target slot
        slot: u8,
        /// Token from an earlier LOCK
        lock: LockHandle,
    },
}

impl<'a> Command<'a> {
    /// First byte of the frame
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Reset { .. } => Opcode::Reset,
            Self::Transact { .. } => Opcode::Transact,
            Self::Lock { .. } => Opcode::Lock,
            Self::Unlock { .. } => Opcode::Unlock,
        }
    }

    /// Second byte of the frame
    pub fn slot(&self) -> u8 {
        match self {
            Self::Reset { slot, .. }
            | Self::Transact { slot, .. }
            | Self::Lock { slot, .. }
            | Self::Unlock { slot, .. } => *slot,
        }
    }

    /// Size of the bounded buffer this command is encoded into
    pub fn capacity(&self) -> usize {
        match self {
            Self::Transact { .. } => TRANSACT_BUFFER_SIZE,
            _ => COMMAND_BUFFER_SIZE,
        }
    }

    /// Encode into a fresh frame. Fails with `BufferOverflow` when the
    /// arguments do not fit `capacity()`.
    pub fn encode(&self) -> Result<FrameBuffer> {
        let mut buf = FrameBuffer::with_capacity(self.capacity());
        buf.put_u8(self.opcode().as_u8())?;
        buf.put_u8(self.slot())?;

        match *self {
            Self::Reset {
                timeout, message, ..
            } => {
                let mut args = TlvBuilder::new(&mut buf);
                if let Some(secs) = timeout.filter(|&t| t != 0) {
                    args.put_int(Tag::Timeout, secs)?;
                }
                if let Some(msg) = message {
                    args.put_string(Tag::Message, msg)?;
                }
            }
            Self::Transact { apdu, .. } => buf.put(apdu)?,
            Self::Lock { lock_type, .. } => {
                TlvBuilder::new(&mut buf).put_int(Tag::LockType, lock_type.as_u32())?
            }
            Self::Unlock { lock, .. } => {
                TlvBuilder::new(&mut buf).put_int(Tag::Lock, lock.as_u32())?
            }
        }

        Ok(buf)
    }
}
