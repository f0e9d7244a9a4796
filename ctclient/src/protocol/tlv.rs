// ctclient-rs/ctclient/src/protocol/tlv.rs

//! Tag-length-value codec shared by requests and replies.
//!
//! Wire layout of one field:
//!
//! ```text
//! short:  [tag]        [len(1)]     [value(len)]     len <= 255
//! large:  [tag | 0x40] [len(2, BE)] [value(len)]     len <= 65535
//! ```
//!
//! Integers are big-endian with leading zero bytes stripped (at least one
//! byte). Strings are raw UTF-8 without terminator.

use std::collections::BTreeMap;

use crate::constants::{TAG_LARGE, TLV_LARGE_MAX, TLV_SHORT_MAX};
use crate::protocol::buffer::FrameBuffer;
use crate::types::Tag;
use crate::{Error, Result};

/// Appends tagged fields to a bounded buffer. Each `put_*` is all-or-nothing.
pub struct TlvBuilder<'b> {
    buf: &'b mut FrameBuffer,
}

impl<'b> TlvBuilder<'b> {
    /// Append to `buf`
    pub fn new(buf: &'b mut FrameBuffer) -> Self {
        Self { buf }
    }

    /// Append a raw value, switching to the large form above 255 bytes.
    pub fn put_bytes(&mut self, tag: Tag, value: &[u8]) -> Result<()> {
        let len = value.len();
        if len > TLV_LARGE_MAX {
            return Err(Error::BufferOverflow {
                capacity: TLV_LARGE_MAX,
                required: len,
            });
        }

        let header = if len > TLV_SHORT_MAX { 3 } else { 2 };
        self.buf.reserve_check(header + len)?;

        if len > TLV_SHORT_MAX {
            self.buf.put_u8(tag.as_u8() | TAG_LARGE)?;
            self.buf.put(&(len as u16).to_be_bytes())?;
        } else {
            self.buf.put_u8(tag.as_u8())?;
            self.buf.put_u8(len as u8)?;
        }
        self.buf.put(value)
    }

    /// Append an integer in minimal big-endian form (at least one byte).
    pub fn put_int(&mut self, tag: Tag, value: u32) -> Result<()> {
        let bytes = value.to_be_bytes();
        let skip = bytes.iter().take(3).take_while(|&&b| b == 0).count();
        self.put_bytes(tag, &bytes[skip..])
    }

    /// Append a string without terminator.
    pub fn put_string(&mut self, tag: Tag, value: &str) -> Result<()> {
        self.put_bytes(tag, value.as_bytes())
    }
}

/// Tag-indexed view over a reply buffer.
#[derive(Debug, Clone, Default)]
pub struct TlvParser<'a> {
    fields: BTreeMap<u8, &'a [u8]>,
}

impl<'a> TlvParser<'a> {
    /// Index every field of `data`. Fails with `MalformedResponse` if a
    /// header or value runs past the end of the buffer.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut fields = BTreeMap::new();
        let mut pos = 0usize;

        while pos < data.len() {
            let raw_tag = data[pos];
            let (tag, header, len) = if raw_tag & TAG_LARGE != 0 {
                let hdr = data.get(pos + 1..pos + 3).ok_or_else(|| {
                    Error::MalformedResponse(format!("truncated large header at offset {}", pos))
                })?;
                (
                    raw_tag & !TAG_LARGE,
                    3usize,
                    u16::from_be_bytes([hdr[0], hdr[1]]) as usize,
                )
            } else {
                let len = *data.get(pos + 1).ok_or_else(|| {
                    Error::MalformedResponse(format!("truncated header at offset {}", pos))
                })?;
                (raw_tag, 2usize, len as usize)
            };

            let start = pos + header;
            let value = data.get(start..start + len).ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "tag {:#04x} claims {} bytes, {} available",
                    tag,
                    len,
                    data.len().saturating_sub(start)
                ))
            })?;
            fields.insert(tag, value);
            pos = start + len;
        }

        Ok(Self { fields })
    }

    /// Whether `tag` was present
    pub fn contains(&self, tag: Tag) -> bool {
        self.fields.contains_key(&tag.as_u8())
    }

    /// Number of distinct tags found
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// No fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw value of `tag`, `MissingField` if absent.
    pub fn get_bytes(&self, tag: Tag) -> Result<&'a [u8]> {
        self.fields
            .get(&tag.as_u8())
            .copied()
            .ok_or(Error::MissingField { tag })
    }

    /// Copy the value of `tag` into `out`, truncated to `out.len()`.
    /// Returns the number of bytes written.
    pub fn copy_bytes(&self, tag: Tag, out: &mut [u8]) -> Result<usize> {
        let value = self.get_bytes(tag)?;
        let n = value.len().min(out.len());
        out[..n].copy_from_slice(&value[..n]);
        Ok(n)
    }

    /// Big-endian integer of 1 to 4 bytes.
    pub fn get_int(&self, tag: Tag) -> Result<u32> {
        let value = self.get_bytes(tag)?;
        if value.is_empty() || value.len() > 4 {
            return Err(Error::FieldSize {
                tag,
                max: 4,
                actual: value.len(),
            });
        }
        Ok(value.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }

    /// UTF-8 value of `tag`; invalid UTF-8 counts as missing.
    pub fn get_string(&self, tag: Tag) -> Result<String> {
        let value = self.get_bytes(tag)?;
        std::str::from_utf8(value)
            .map(str::to_owned)
            .map_err(|_| Error::MissingField { tag })
    }
}
