// ctclient-rs/ctclient/src/protocol/responses.rs

//! Reply decoders. Which decoder applies depends on the command issued:
//! RESET replies carry an ATR tag, LOCK replies a LOCK tag, TRANSACT replies
//! are the raw APDU response and UNLOCK replies carry nothing of interest.

use crate::protocol::tlv::TlvParser;
use crate::types::{LockHandle, Tag};
use crate::{Error, Result};

/// Copy the ATR of a RESET reply into `atr`, truncated to its length.
pub fn decode_atr(data: &[u8], atr: &mut [u8]) -> Result<usize> {
    TlvParser::parse(data)?.copy_bytes(Tag::Atr, atr)
}

/// Extract the lock token of a LOCK reply. A reply that parses but has no
/// usable LOCK field is reported as `Generic`.
pub fn decode_lock(data: &[u8]) -> Result<LockHandle> {
    let tlv = TlvParser::parse(data)?;
    match tlv.get_int(Tag::Lock) {
        Ok(raw) => Ok(LockHandle::new(raw)),
        Err(e @ (Error::MissingField { .. } | Error::FieldSize { .. })) => {
            Err(Error::Generic(format!("lock reply unusable: {}", e)))
        }
        Err(e) => Err(e),
    }
}

/// Copy a raw TRANSACT reply into `out`. Unlike the ATR, a reply that does
/// not fit is an error rather than being truncated.
pub fn decode_transact(data: &[u8], out: &mut [u8]) -> Result<usize> {
    if data.len() > out.len() {
        return Err(Error::BufferOverflow {
            capacity: out.len(),
            required: data.len(),
        });
    }
    out[..data.len()].copy_from_slice(data);
    Ok(data.len())
}
