//! # Cursors
//!
//! Bounded read and write positions over a caller-supplied byte span.
//!
//! Both cursors keep `position <= end` after every call. They only advance by
//! an amount that was first compared against [`ReadCursor::remaining`], which
//! is derived from two bounded offsets. A length taken from the input is never
//! added to a position before that comparison.

use crate::core::align::Alignment;
use crate::core::invariant::invariant_violated;
use crate::error::{CodecError, Result};

/// Read position over untrusted input.
#[derive(Debug, Clone)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    align: Alignment,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8], align: Alignment) -> Self {
        Self { buf, pos: 0, align }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the span.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    /// Take `len` bytes and skip the padding that follows them.
    ///
    /// Fails without moving when the value or its padding would run past the
    /// end of the span. Padding bytes are not interpreted.
    pub fn take_aligned(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Truncated {
                needed: len,
                remaining,
            });
        }

        // len <= remaining <= isize::MAX, so rounding up cannot overflow
        let step = self.align.aligned(len);
        if step > remaining {
            return Err(CodecError::Truncated {
                needed: step,
                remaining,
            });
        }

        let start = self.pos;
        self.pos += step;
        Ok(&self.buf[start..start + len])
    }
}

/// Write position over a destination sized by a prior size query.
#[derive(Debug)]
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
    align: Alignment,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8], align: Alignment) -> Self {
        Self { buf, pos: 0, align }
    }

    /// Bytes written so far, padding included.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    /// Reserve `len` bytes plus padding, zero the padding and return the
    /// `len`-byte slot for the caller to fill.
    ///
    /// Encode sizes its destination from its own size query, so running out
    /// of room here is a codec defect and aborts.
    pub fn slot(&mut self, len: usize) -> &mut [u8] {
        let remaining = self.remaining();
        if len > remaining {
            invariant_violated("encode wrote past the end of its destination");
        }
        let step = self.align.aligned(len);
        if step > remaining {
            invariant_violated("encode padding ran past the end of its destination");
        }

        let start = self.pos;
        self.pos += step;
        let (value, padding) = self.buf[start..start + step].split_at_mut(len);
        padding.fill(0);
        value
    }

    /// Copy `bytes` into the next slot.
    pub fn put_aligned(&mut self, bytes: &[u8]) {
        self.slot(bytes.len()).copy_from_slice(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_skips_padding() {
        let data = [1u8, 2, 3, 0, 0, 0, 0, 0, 9, 9];
        let mut cur = ReadCursor::new(&data, Alignment::new(8).unwrap());

        assert_eq!(cur.take_aligned(3).unwrap(), &[1, 2, 3]);
        assert_eq!(cur.position(), 8);
        assert_eq!(cur.remaining(), 2);
    }

    #[test]
    fn test_take_rejects_value_past_end() {
        let data = [0u8; 4];
        let mut cur = ReadCursor::new(&data, Alignment::NONE);

        let err = cur.take_aligned(5).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                needed: 5,
                remaining: 4
            }
        );
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_take_rejects_missing_padding() {
        let data = [7u8; 4];
        let mut cur = ReadCursor::new(&data, Alignment::new(8).unwrap());

        let err = cur.take_aligned(4).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                needed: 8,
                remaining: 4
            }
        );
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_take_huge_length_does_not_overflow() {
        let data = [0u8; 16];
        let mut cur = ReadCursor::new(&data, Alignment::new(8).unwrap());
        cur.take_aligned(8).unwrap();

        assert!(matches!(
            cur.take_aligned(usize::MAX),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            cur.take_aligned(usize::MAX - 3),
            Err(CodecError::Truncated { .. })
        ));
        assert_eq!(cur.position(), 8);
    }

    #[test]
    fn test_take_zero_at_end() {
        let data = [0u8; 8];
        let mut cur = ReadCursor::new(&data, Alignment::new(8).unwrap());
        cur.take_aligned(8).unwrap();
        assert_eq!(cur.take_aligned(0).unwrap(), &[] as &[u8]);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn test_slot_zeroes_padding() {
        let mut buf = [0xAAu8; 8];
        let mut cur = WriteCursor::new(&mut buf, Alignment::new(4).unwrap());

        cur.put_aligned(&[1, 2]);
        cur.put_aligned(&[3, 4, 5, 6]);
        assert_eq!(cur.position(), 8);
        assert_eq!(cur.remaining(), 0);
        assert_eq!(buf, [1, 2, 0, 0, 3, 4, 5, 6]);
    }
}
