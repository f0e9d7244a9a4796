// ctclient-rs/ctclient/src/registry/status_file.rs

//! Reader manager status file.
//!
//! The file is a packed array of fixed-size records, one per reader index:
//!
//! ```text
//! [name(64, NUL padded)] [slots(4)] [card(4) x 8] [flags(4)] [pid(4)]
//! ```
//!
//! Integers are little-endian. Unused indexes are all-zero records.

use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::{
    MAX_SLOTS, STATUS_FLAG_DISPLAY, STATUS_FLAG_KEYPAD, STATUS_NAME_LEN, STATUS_RECORD_LEN,
};
use crate::registry::ReaderRegistry;
use crate::types::ReaderInfo;
use crate::{Error, Result};

fn le_u32_at(data: &[u8], idx: usize) -> u32 {
    u32::from_le_bytes([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
}

/// Decode one record. `record` must be exactly `STATUS_RECORD_LEN` bytes.
pub fn decode_record(record: &[u8]) -> Result<ReaderInfo> {
    if record.len() != STATUS_RECORD_LEN {
        return Err(Error::MalformedResponse(format!(
            "status record is {} bytes, expected {}",
            record.len(),
            STATUS_RECORD_LEN
        )));
    }

    let name_raw = &record[..STATUS_NAME_LEN];
    let name_end = name_raw.iter().position(|&b| b == 0).unwrap_or(STATUS_NAME_LEN);
    let name = String::from_utf8_lossy(&name_raw[..name_end]).into_owned();

    let mut off = STATUS_NAME_LEN;
    let slots = le_u32_at(record, off) as usize;
    off += 4;
    if slots > MAX_SLOTS {
        return Err(Error::MalformedResponse(format!(
            "reader '{}' claims {} slots",
            name, slots
        )));
    }

    let card_seq = (0..slots).map(|i| le_u32_at(record, off + 4 * i)).collect();
    off += 4 * MAX_SLOTS;
    let flags = le_u32_at(record, off);
    let pid = le_u32_at(record, off + 4);

    Ok(ReaderInfo::new(name, card_seq)?
        .with_display(flags & STATUS_FLAG_DISPLAY != 0)
        .with_keypad(flags & STATUS_FLAG_KEYPAD != 0)
        .with_pid(pid))
}

/// Encode one record; names longer than the field are cut.
pub fn encode_record(info: &ReaderInfo) -> [u8; STATUS_RECORD_LEN] {
    let mut out = [0u8; STATUS_RECORD_LEN];
    let name = info.name.as_bytes();
    let n = name.len().min(STATUS_NAME_LEN - 1);
    out[..n].copy_from_slice(&name[..n]);

    let mut off = STATUS_NAME_LEN;
    out[off..off + 4].copy_from_slice(&(info.slots() as u32).to_le_bytes());
    off += 4;
    for (i, seq) in info.card_seqs().iter().take(MAX_SLOTS).enumerate() {
        out[off + 4 * i..off + 4 * i + 4].copy_from_slice(&seq.to_le_bytes());
    }
    off += 4 * MAX_SLOTS;

    let mut flags = 0u32;
    if info.display {
        flags |= STATUS_FLAG_DISPLAY;
    }
    if info.keypad {
        flags |= STATUS_FLAG_KEYPAD;
    }
    out[off..off + 4].copy_from_slice(&flags.to_le_bytes());
    out[off + 4..off + 8].copy_from_slice(&info.pid.to_le_bytes());
    out
}

/// Decode a whole status file image.
pub fn parse_status(data: &[u8]) -> Result<Vec<ReaderInfo>> {
    if data.len() % STATUS_RECORD_LEN != 0 {
        return Err(Error::MalformedResponse(format!(
            "status file length {} is not a multiple of {}",
            data.len(),
            STATUS_RECORD_LEN
        )));
    }
    data.chunks_exact(STATUS_RECORD_LEN)
        .map(decode_record)
        .collect()
}

/// Registry backed by the reader manager's status file. The file is re-read
/// on every `readers()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFileRegistry {
    path: PathBuf,
}

impl StatusFileRegistry {
    /// Registry backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File read by `readers()`
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReaderRegistry for StatusFileRegistry {
    fn readers(&self) -> Result<Vec<ReaderInfo>> {
        let data = std::fs::read(&self.path)?;
        let readers = parse_status(&data)?;
        debug!(
            "status file {} lists {} readers",
            self.path.display(),
            readers.len()
        );
        Ok(readers)
    }
}
