// ctclient-rs/ctclient/src/constants.rs
//! Common protocol constants used across the crate

/// Command opcodes understood by the reader manager
pub const CMD_LOCK: u8 = 0x01;
/// Release a slot lock
pub const CMD_UNLOCK: u8 = 0x02;
/// Reset the card, optionally waiting for insertion
pub const CMD_RESET: u8 = 0x10;
/// Exchange one APDU with the card
pub const CMD_TRANSACT: u8 = 0x21;

/// TLV tags used in requests and replies
pub const TAG_ATR: u8 = 0x03;
/// Lock token issued by LOCK and consumed by UNLOCK
pub const TAG_LOCK: u8 = 0x05;
/// Shared (0) or exclusive (1) lock request
pub const TAG_LOCKTYPE: u8 = 0x06;
/// Insertion timeout in seconds
pub const TAG_TIMEOUT: u8 = 0x80;
/// Prompt shown on the reader display
pub const TAG_MESSAGE: u8 = 0x81;

/// Tag flag announcing a two-byte big-endian length field
pub const TAG_LARGE: u8 = 0x40;

/// Longest value that fits a one-byte TLV length
pub const TLV_SHORT_MAX: usize = 0xFF;

/// Longest value that fits a two-byte TLV length
pub const TLV_LARGE_MAX: usize = 0xFFFF;

/// Encoder capacity for RESET, LOCK and UNLOCK frames, and the reply
/// capacity used when decoding their responses
pub const COMMAND_BUFFER_SIZE: usize = 256;

/// Encoder capacity for TRANSACT frames (opcode + slot + raw APDU)
pub const TRANSACT_BUFFER_SIZE: usize = 512;

/// Maximum number of slots a single reader exposes
pub const MAX_SLOTS: usize = 8;

/// Card status bit: a card sits in the slot
pub const CARD_PRESENT: u32 = 0x0001;
/// Card status bit: the card differs from the one seen last time
pub const CARD_STATUS_CHANGED: u32 = 0x0002;

/// Socket packet header: xid(4) dest(4) error(2) count(2)
pub const SOCKET_HEADER_LEN: usize = 12;

/// Width of the NUL-padded name field of a status record
pub const STATUS_NAME_LEN: usize = 64;
/// Status file record: name(64) slots(4) card(4 * MAX_SLOTS) flags(4) pid(4)
pub const STATUS_RECORD_LEN: usize = STATUS_NAME_LEN + 4 + 4 * MAX_SLOTS + 4 + 4;

/// Status record flag: reader has a display
pub const STATUS_FLAG_DISPLAY: u32 = 0x01;
/// Status record flag: reader has a keypad
pub const STATUS_FLAG_KEYPAD: u32 = 0x02;

/// Default reader manager runtime directory
pub const DEFAULT_SOCKET_DIR: &str = "/var/run/openct";

/// Status file name inside the runtime directory
pub const STATUS_FILE_NAME: &str = "status";

/// Environment override for the socket directory
pub const ENV_SOCKET_DIR: &str = "OPENCT_SOCKETDIR";
/// Environment override for the status file path
pub const ENV_STATUS_FILE: &str = "OPENCT_STATUS";
