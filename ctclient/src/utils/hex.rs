// ctclient-rs/ctclient/src/utils/hex.rs
//! Hexadecimal formatting for log lines and diagnostics.

use std::fmt;

/// Lazily formats a byte slice as space-separated lowercase hex, so log
/// statements that are filtered out never allocate.
///
/// Example: `HexDisplay(&[0x3b, 0x02])` -> `"3b 02"`
#[derive(Debug, Clone, Copy)]
pub struct HexDisplay<'a>(pub &'a [u8]);

impl fmt::Display for HexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    HexDisplay(bytes).to_string()
}
