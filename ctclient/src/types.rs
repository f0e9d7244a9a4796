// ctclient-rs/ctclient/src/types.rs

use std::convert::TryFrom;
use std::ops::{BitOr, BitOrAssign};

use crate::constants;
use crate::Error;

/// Command opcode, first byte of every request frame
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Opcode {
    /// Acquire a slot lock
    #[display(fmt = "LOCK")]
    Lock = constants::CMD_LOCK,
    /// Release a slot lock
    #[display(fmt = "UNLOCK")]
    Unlock = constants::CMD_UNLOCK,
    /// Reset the card and fetch its ATR
    #[display(fmt = "RESET")]
    Reset = constants::CMD_RESET,
    /// APDU exchange
    #[display(fmt = "TRANSACT")]
    Transact = constants::CMD_TRANSACT,
}

impl Opcode {
    /// Wire value
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            constants::CMD_LOCK => Ok(Self::Lock),
            constants::CMD_UNLOCK => Ok(Self::Unlock),
            constants::CMD_RESET => Ok(Self::Reset),
            constants::CMD_TRANSACT => Ok(Self::Transact),
            other => Err(Error::InvalidArgument(format!(
                "unknown opcode {:#04x}",
                other
            ))),
        }
    }
}

/// TLV tag of a request argument or reply field
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Tag {
    /// Answer-to-reset bytes in a RESET reply
    #[display(fmt = "ATR")]
    Atr = constants::TAG_ATR,
    /// Lock token
    #[display(fmt = "LOCK")]
    Lock = constants::TAG_LOCK,
    /// Requested lock type
    #[display(fmt = "LOCKTYPE")]
    LockType = constants::TAG_LOCKTYPE,
    /// Insertion timeout in seconds
    #[display(fmt = "TIMEOUT")]
    Timeout = constants::TAG_TIMEOUT,
    /// Prompt for the reader display
    #[display(fmt = "MESSAGE")]
    Message = constants::TAG_MESSAGE,
}

impl Tag {
    /// Wire value, without the large-length flag
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Kind of slot lock requested from the reader manager
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockType {
    /// Other shared holders are allowed
    #[default]
    Shared = 0,
    /// Sole holder of the slot
    Exclusive = 1,
}

impl LockType {
    /// Value sent in the LOCKTYPE field
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Opaque token for a granted slot lock. Only meaningful to the service
/// that issued it, in a later unlock on the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockHandle(u32);

impl LockHandle {
    /// Wrap a raw token
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw token as sent in UNLOCK
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Card presence bits returned by `card_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardStatus(u32);

impl CardStatus {
    /// No card
    pub const EMPTY: Self = Self(0);
    /// A card is in the slot
    pub const PRESENT: Self = Self(constants::CARD_PRESENT);
    /// The card was inserted since the previous status query
    pub const CHANGED: Self = Self(constants::CARD_STATUS_CHANGED);

    /// Raw bit value
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `PRESENT` is set
    pub const fn is_present(&self) -> bool {
        self.contains(Self::PRESENT)
    }

    /// `CHANGED` is set
    pub const fn is_changed(&self) -> bool {
        self.contains(Self::CHANGED)
    }
}

impl BitOr for CardStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CardStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Static descriptor of one reader as published by the enumeration service.
///
/// `card_seq[n]` is the insertion counter of slot `n`; zero means no card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ReaderInfoFields")
)]
pub struct ReaderInfo {
    /// Reader name as published by the manager
    pub name: String,
    card_seq: Vec<u32>,
    /// Reader has a display for `MESSAGE` prompts
    pub display: bool,
    /// Reader has a PIN pad
    pub keypad: bool,
    /// Process id of the manager driving this reader
    pub pid: u32,
}

/// Unchecked wire form of `ReaderInfo`; deserialization goes through
/// `ReaderInfo::new` so the slot limit holds.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ReaderInfoFields {
    name: String,
    card_seq: Vec<u32>,
    display: bool,
    keypad: bool,
    pid: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<ReaderInfoFields> for ReaderInfo {
    type Error = Error;

    fn try_from(raw: ReaderInfoFields) -> crate::Result<Self> {
        Ok(Self::new(raw.name, raw.card_seq)?
            .with_display(raw.display)
            .with_keypad(raw.keypad)
            .with_pid(raw.pid))
    }
}

impl ReaderInfo {
    /// Build a descriptor with one sequence entry per slot. Readers with more
    /// than `MAX_SLOTS` slots are rejected.
    pub fn new(name: impl Into<String>, card_seq: Vec<u32>) -> crate::Result<Self> {
        if card_seq.len() > constants::MAX_SLOTS {
            return Err(Error::InvalidArgument(format!(
                "reader has {} slots, at most {} supported",
                card_seq.len(),
                constants::MAX_SLOTS
            )));
        }
        Ok(Self {
            name: name.into(),
            card_seq,
            display: false,
            keypad: false,
            pid: 0,
        })
    }

    /// Set the display capability
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Set the keypad capability
    pub fn with_keypad(mut self, keypad: bool) -> Self {
        self.keypad = keypad;
        self
    }

    /// Set the owning process id
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = pid;
        self
    }

    /// Number of slots
    pub fn slots(&self) -> usize {
        self.card_seq.len()
    }

    /// Card sequence number of `slot`, if the slot exists
    pub fn card_seq(&self, slot: usize) -> Option<u32> {
        self.card_seq.get(slot).copied()
    }

    /// Card sequence numbers of all slots, in slot order
    pub fn card_seqs(&self) -> &[u32] {
        &self.card_seq
    }

    /// Overwrite the sequence of an existing slot. Slots cannot be added
    /// this way.
    pub fn set_card_seq(&mut self, slot: usize, seq: u32) -> crate::Result<()> {
        let slots = self.slots();
        let entry = self.card_seq.get_mut(slot).ok_or_else(|| {
            Error::InvalidArgument(format!("slot {} out of range ({} slots)", slot, slots))
        })?;
        *entry = seq;
        Ok(())
    }
}
