//! # String Codec
//!
//! Length-prefixed UTF-8 text.
//!
//! ## Wire Format
//! ```text
//! [length: u64, padded] [bytes: length] [padding to boundary]
//! ```
//!
//! The length counts bytes. Limits passed to [`decode_string`] count
//! characters.

use crate::core::align::Alignment;
use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::primitive::{decode_primitive, encode_primitive, Scalar};
use crate::error::{CodecError, Result};

/// Wire type of string length and array count prefixes.
pub type LengthPrefix = u64;

/// Encoded size of `s` including its prefix and padding.
pub fn encoded_size(s: &str, align: Alignment) -> usize {
    align.aligned(<LengthPrefix as Scalar>::WIDTH) + align.aligned(s.len())
}

pub fn encode_string(cur: &mut WriteCursor<'_>, s: &str) {
    encode_primitive(cur, s.len() as LengthPrefix);
    cur.put_aligned(s.as_bytes());
}

/// Decode a string, enforcing `max_chars` when it is nonzero.
pub fn decode_string(cur: &mut ReadCursor<'_>, max_chars: usize) -> Result<String> {
    let declared: LengthPrefix = decode_primitive(cur)?;
    let len = usize::try_from(declared).map_err(|_| CodecError::LengthOverflow(declared))?;

    let raw = cur.take_aligned(len)?;
    let text = std::str::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;

    if max_chars > 0 {
        // Byte length bounds the character count, so skip the scan when it fits
        if text.len() > max_chars {
            let chars = text.chars().count();
            if chars > max_chars {
                return Err(CodecError::StringTooLong {
                    chars,
                    max: max_chars,
                });
            }
        }
    }

    Ok(text.to_owned())
}
