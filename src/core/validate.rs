//! # Validator
//!
//! Field constraints checked immediately after each value is decoded, before
//! the next field is read. The first violation fails the whole record.
//!
//! | Field kind | Rule |
//! |---|---|
//! | Numeric | `0` means unset; any other value must lie in `[min, max]` |
//! | Enum ordinal | `min <= ordinal < sentinel` |
//! | Boolean | raw byte is `0` or `1` (see [`crate::core::primitive`]) |
//! | Floating | finite (see [`crate::core::primitive`]) |
//! | String | required strings are non-empty; optional character limit |
//!
//! Constructing or encoding a value never validates it. Only decode does.

use crate::error::{CodecError, Result};

/// Inclusive numeric range with `0` exempt as the unset sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    pub min: i64,
    pub max: i64,
}

impl NumericRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn check(&self, value: i64) -> Result<()> {
        if value != 0 && (value < self.min || value > self.max) {
            return Err(CodecError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A fieldless enum carried on the wire as a `u32` ordinal.
///
/// Valid ordinals are `MIN..SENTINEL`. The sentinel itself is never a valid
/// value.
pub trait WireEnum: Copy + Default {
    /// Smallest declared ordinal.
    const MIN: u32;
    /// Exclusive upper bound, one past the last declared ordinal.
    const SENTINEL: u32;

    fn ordinal(self) -> u32;

    /// Map an in-range ordinal to its variant.
    fn from_ordinal(ordinal: u32) -> Option<Self>;
}

/// Check a decoded ordinal and map it to its variant.
pub fn check_ordinal<E: WireEnum>(ordinal: u32) -> Result<E> {
    let invalid = CodecError::InvalidOrdinal {
        ordinal,
        min: E::MIN,
        sentinel: E::SENTINEL,
    };
    if ordinal < E::MIN || ordinal >= E::SENTINEL {
        return Err(invalid);
    }
    E::from_ordinal(ordinal).ok_or(invalid)
}

/// Whether a string field may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Constraints for a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub presence: Presence,
    /// Maximum length in characters; `0` means unlimited.
    pub max_chars: usize,
}

impl TextRule {
    pub const fn new(presence: Presence, max_chars: usize) -> Self {
        Self {
            presence,
            max_chars,
        }
    }

    /// Presence check. The character limit is enforced while decoding.
    pub fn check(&self, value: &str) -> Result<()> {
        if self.presence == Presence::Required && value.is_empty() {
            return Err(CodecError::EmptyString);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    enum Level {
        #[default]
        Low = 1,
        Mid,
        High,
    }

    impl WireEnum for Level {
        const MIN: u32 = 1;
        const SENTINEL: u32 = 4;

        fn ordinal(self) -> u32 {
            self as u32
        }

        fn from_ordinal(ordinal: u32) -> Option<Self> {
            match ordinal {
                1 => Some(Level::Low),
                2 => Some(Level::Mid),
                3 => Some(Level::High),
                _ => None,
            }
        }
    }

    #[test]
    fn test_zero_is_exempt_from_range() {
        let range = NumericRange::new(10, 200);
        assert!(range.check(0).is_ok());
        assert!(range.check(10).is_ok());
        assert!(range.check(200).is_ok());
        assert_eq!(
            range.check(9),
            Err(CodecError::OutOfRange {
                value: 9,
                min: 10,
                max: 200
            })
        );
        assert!(range.check(201).is_err());
        assert!(range.check(-5).is_err());
    }

    #[test]
    fn test_ordinal_bounds() {
        assert_eq!(check_ordinal::<Level>(1).unwrap(), Level::Low);
        assert_eq!(check_ordinal::<Level>(3).unwrap(), Level::High);
        assert_eq!(
            check_ordinal::<Level>(4),
            Err(CodecError::InvalidOrdinal {
                ordinal: 4,
                min: 1,
                sentinel: 4
            })
        );
        assert!(check_ordinal::<Level>(0).is_err());
        assert!(check_ordinal::<Level>(u32::MAX).is_err());
    }

    #[test]
    fn test_required_text() {
        let rule = TextRule::new(Presence::Required, 10);
        assert_eq!(rule.check(""), Err(CodecError::EmptyString));
        assert!(rule.check("Mary").is_ok());
        assert!(TextRule::new(Presence::Optional, 10).check("").is_ok());
    }
}
