//! # Alignment
//!
//! Every field on the wire starts at a multiple of a fixed power-of-two byte
//! count. [`Alignment`] holds that boundary and rounds sizes up to it:
//!
//! ```text
//! aligned(n) = n + ((-n) mod A)
//! ```
//!
//! The boundary is part of the wire format: both ends must agree on it, and it
//! must not change for data that is already stored.

use std::fmt;

use crate::error::{constants, CodecError};

/// Largest accepted alignment in bytes
pub const MAX_ALIGNMENT: usize = 4096;

/// A validated power-of-two alignment boundary of at most [`MAX_ALIGNMENT`]
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alignment(usize);

impl Alignment {
    /// No padding at all; fields are packed back to back.
    pub const NONE: Alignment = Alignment(1);

    /// Pointer-width alignment, the default wire layout.
    pub const NATIVE: Alignment = Alignment(std::mem::size_of::<usize>());

    /// Create an alignment from a byte count, which must be a power of two
    /// no larger than [`MAX_ALIGNMENT`].
    pub const fn new(bytes: usize) -> Option<Self> {
        if bytes.is_power_of_two() && bytes <= MAX_ALIGNMENT {
            Some(Alignment(bytes))
        } else {
            None
        }
    }

    /// The boundary in bytes.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Bytes needed after `n` to reach the next boundary.
    #[inline]
    pub const fn padding(self, n: usize) -> usize {
        n.wrapping_neg() & (self.0 - 1)
    }

    /// Round `n` up to the next boundary.
    ///
    /// Callers pass sizes bounded by an input length or an in-memory value,
    /// both at most `isize::MAX`, and `A <= MAX_ALIGNMENT`, so the sum cannot
    /// overflow.
    #[inline]
    pub const fn aligned(self, n: usize) -> usize {
        n + self.padding(n)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::NATIVE
    }
}

impl TryFrom<usize> for Alignment {
    type Error = CodecError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        if bytes == 0 {
            return Err(CodecError::ConfigError(
                constants::ERR_ALIGNMENT_ZERO.to_string(),
            ));
        }
        if !bytes.is_power_of_two() {
            return Err(CodecError::ConfigError(format!(
                "{}: {bytes}",
                constants::ERR_ALIGNMENT_NOT_POWER_OF_TWO
            )));
        }
        Alignment::new(bytes).ok_or_else(|| {
            CodecError::ConfigError(format!(
                "{}: {bytes} (maximum: {MAX_ALIGNMENT})",
                constants::ERR_ALIGNMENT_TOO_LARGE
            ))
        })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}
