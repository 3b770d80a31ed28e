//! # Core Codec Components
//!
//! Alignment, cursors, scalar and string codecs, field validation and record
//! composition.
//!
//! ## Components
//! - **Alignment**: power-of-two rounding of field sizes
//! - **Cursor**: bounded read and write positions
//! - **Primitive / String**: fixed-width scalars and length-prefixed text
//! - **Validate / Field**: per-field constraints applied as each value is read
//! - **Record**: ordered field lists, nested arrays, buffer-level entry points
//!
//! ## Wire Format
//! ```text
//! scalar: [value] [pad]
//! string: [len: u64] [pad] [bytes] [pad]
//! array:  [count: u64] [pad] [record] [record] ...
//! ```
//! All values use platform-native byte order.
//!
//! ## Security
//! - Lengths from the input are compared against the remaining span before use
//! - Array counts are bounded by the remaining span before allocation
//! - Failed decodes never expose a partly filled record

pub mod align;
pub mod cursor;
pub mod field;
pub mod invariant;
pub mod primitive;
pub mod record;
pub mod string;
pub mod validate;
