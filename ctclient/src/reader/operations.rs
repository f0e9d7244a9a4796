// ctclient-rs/ctclient/src/reader/operations.rs

use std::time::Duration;

use log::debug;

use crate::constants::COMMAND_BUFFER_SIZE;
use crate::protocol::{Command, decode_atr, decode_lock, decode_transact};
use crate::reader::ReaderHandle;
use crate::types::{CardStatus, LockHandle, LockType};
use crate::utils::{HexDisplay, timeout_secs};
use crate::Result;

impl ReaderHandle {
    /// Report card presence in `slot` from the descriptor snapshot.
    ///
    /// `PRESENT` is set when the slot's card sequence is non-zero, `CHANGED`
    /// additionally when it differs from what this handle saw last time.
    /// The last-seen value is updated on every call, including when the
    /// slot is empty.
    pub fn card_status(&mut self, slot: usize) -> Result<CardStatus> {
        self.check_slot(slot)?;
        let seq = self.info().card_seq(slot).unwrap_or(0);

        let mut status = CardStatus::EMPTY;
        if seq != 0 {
            status |= CardStatus::PRESENT;
            if seq != self.last_seen[slot] {
                status |= CardStatus::CHANGED;
            }
        }
        self.last_seen[slot] = seq;
        Ok(status)
    }

    /// Reset the card and copy its ATR into `atr`. Same as `card_request`
    /// without timeout or message.
    pub fn card_reset(&mut self, slot: usize, atr: &mut [u8]) -> Result<usize> {
        self.card_request(slot, None, None, atr)
    }

    /// Reset the card, optionally letting the service wait up to `timeout`
    /// for insertion while showing `message`. Returns the number of ATR
    /// bytes written; a longer ATR is cut to `atr.len()`.
    pub fn card_request(
        &mut self,
        slot: usize,
        timeout: Option<Duration>,
        message: Option<&str>,
        atr: &mut [u8],
    ) -> Result<usize> {
        let slot = self.check_slot(slot)?;
        let cmd = Command::Reset {
            slot,
            timeout: timeout_secs(timeout),
            message,
        };
        let reply = self.execute(&cmd, COMMAND_BUFFER_SIZE)?;
        let n = decode_atr(&reply, atr)?;
        debug!("slot {} ATR {}", slot, HexDisplay(&atr[..n]));
        Ok(n)
    }

    /// Exchange one APDU. The reply is written to `response`; a reply that
    /// does not fit fails with `BufferOverflow`.
    pub fn card_transact(
        &mut self,
        slot: usize,
        request: &[u8],
        response: &mut [u8],
    ) -> Result<usize> {
        let slot = self.check_slot(slot)?;
        let cmd = Command::Transact {
            slot,
            apdu: request,
        };
        let reply = self.execute(&cmd, response.len())?;
        decode_transact(&reply, response)
    }

    /// Ask the service for a lock on `slot`.
    pub fn card_lock(&mut self, slot: usize, lock_type: LockType) -> Result<LockHandle> {
        let slot = self.check_slot(slot)?;
        let cmd = Command::Lock { slot, lock_type };
        let reply = self.execute(&cmd, COMMAND_BUFFER_SIZE)?;
        let lock = decode_lock(&reply)?;
        debug!("slot {} locked ({:?}), handle {}", slot, lock_type, lock.as_u32());
        Ok(lock)
    }

    /// Release a lock obtained from `card_lock`. Whether the handle is still
    /// valid is for the service to decide.
    pub fn card_unlock(&mut self, slot: usize, lock: LockHandle) -> Result<()> {
        let slot = self.check_slot(slot)?;
        let cmd = Command::Unlock { slot, lock };
        self.execute(&cmd, COMMAND_BUFFER_SIZE)?;
        Ok(())
    }
}
