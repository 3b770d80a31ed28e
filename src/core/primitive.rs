//! # Primitive Codec
//!
//! Fixed-width scalars in platform-native byte order, each followed by zero
//! padding up to the alignment boundary.
//!
//! ## Wire Format
//! ```text
//! [value: size_of::<T>()] [padding: aligned(size_of::<T>()) - size_of::<T>()]
//! ```
//!
//! Decoding a float rejects NaN and infinities. Decoding a boolean rejects any
//! byte other than `0` or `1`.

use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::error::{CodecError, Result};

/// A fixed-width value with a native-endian wire representation.
pub trait Scalar: Copy {
    /// Encoded width in bytes, before padding.
    const WIDTH: usize;

    /// Write the value into `out`, which is exactly `WIDTH` bytes.
    fn to_wire(self, out: &mut [u8]);

    /// Read a value from `raw`, which is exactly `WIDTH` bytes.
    fn from_wire(raw: &[u8]) -> Result<Self>;
}

macro_rules! int_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_wire(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn from_wire(raw: &[u8]) -> Result<Self> {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(raw);
                Ok(<$t>::from_ne_bytes(bytes))
            }
        }
    )*};
}

macro_rules! float_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const WIDTH: usize = std::mem::size_of::<$t>();

            #[inline]
            fn to_wire(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }

            #[inline]
            fn from_wire(raw: &[u8]) -> Result<Self> {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(raw);
                let value = <$t>::from_ne_bytes(bytes);
                if !value.is_finite() {
                    return Err(CodecError::NonFinite);
                }
                Ok(value)
            }
        }
    )*};
}

int_scalar!(i8, i16, i32, i64, u8, u16, u32, u64);
float_scalar!(f32, f64);

impl Scalar for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn to_wire(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    #[inline]
    fn from_wire(raw: &[u8]) -> Result<Self> {
        match raw[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }
}

/// Decode one scalar and skip its padding.
pub fn decode_primitive<T: Scalar>(cur: &mut ReadCursor<'_>) -> Result<T> {
    let raw = cur.take_aligned(T::WIDTH)?;
    T::from_wire(raw)
}

/// Encode one scalar followed by zero padding.
pub fn encode_primitive<T: Scalar>(cur: &mut WriteCursor<'_>, value: T) {
    value.to_wire(cur.slot(T::WIDTH));
}
