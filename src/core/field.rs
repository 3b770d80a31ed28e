//! # Field Descriptors
//!
//! Each descriptor pairs a field name with its wire type and its validation
//! rule. Records declare one `const` descriptor per field and call it from
//! their size, encode and decode methods, so all three walk the same fields in
//! the same order.
//!
//! ```rust
//! use record_wire::core::field::{IntField, TextField};
//!
//! const AGE: IntField<i32> = IntField::ranged("age", 10, 200);
//! const GIVEN_NAME: TextField = TextField::required("given_name", 1024);
//! ```
//!
//! Decode errors leave a descriptor wrapped in [`CodecError::Field`] naming it.

use std::marker::PhantomData;

use crate::core::align::Alignment;
use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::primitive::{decode_primitive, encode_primitive, Scalar};
use crate::core::record::Record;
use crate::core::string::{self, decode_string, encode_string, LengthPrefix};
use crate::core::validate::{check_ordinal, NumericRange, Presence, TextRule, WireEnum};
use crate::error::{CodecError, Result};

/// Integer field, optionally range-checked with `0` as unset.
#[derive(Debug, Clone, Copy)]
pub struct IntField<T> {
    pub name: &'static str,
    pub range: Option<NumericRange>,
    _wire: PhantomData<T>,
}

impl<T> IntField<T> {
    pub const fn ranged(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            range: Some(NumericRange::new(min, max)),
            _wire: PhantomData,
        }
    }

    pub const fn unchecked(name: &'static str) -> Self {
        Self {
            name,
            range: None,
            _wire: PhantomData,
        }
    }
}

impl<T: Scalar + Into<i64>> IntField<T> {
    pub fn size(&self, align: Alignment) -> usize {
        align.aligned(T::WIDTH)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, value: T) {
        encode_primitive(cur, value);
    }

    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<T> {
        let value: T = decode_primitive(cur).map_err(|e| e.at_field(self.name))?;
        if let Some(range) = &self.range {
            range
                .check(value.into())
                .map_err(|e| e.at_field(self.name))?;
        }
        Ok(value)
    }
}

/// Floating point field; decode rejects non-finite values.
#[derive(Debug, Clone, Copy)]
pub struct FloatField<T> {
    pub name: &'static str,
    _wire: PhantomData<T>,
}

impl<T> FloatField<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _wire: PhantomData,
        }
    }
}

impl<T: Scalar> FloatField<T> {
    pub fn size(&self, align: Alignment) -> usize {
        align.aligned(T::WIDTH)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, value: T) {
        encode_primitive(cur, value);
    }

    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<T> {
        decode_primitive(cur).map_err(|e| e.at_field(self.name))
    }
}

/// Boolean field; decode rejects bytes other than `0` and `1`.
#[derive(Debug, Clone, Copy)]
pub struct BoolField {
    pub name: &'static str,
}

impl BoolField {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn size(&self, align: Alignment) -> usize {
        align.aligned(<bool as Scalar>::WIDTH)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, value: bool) {
        encode_primitive(cur, value);
    }

    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<bool> {
        decode_primitive(cur).map_err(|e| e.at_field(self.name))
    }
}

/// Enum field carried as a `u32` ordinal.
#[derive(Debug, Clone, Copy)]
pub struct EnumField<E> {
    pub name: &'static str,
    _wire: PhantomData<E>,
}

impl<E> EnumField<E> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _wire: PhantomData,
        }
    }
}

impl<E: WireEnum> EnumField<E> {
    pub fn size(&self, align: Alignment) -> usize {
        align.aligned(<u32 as Scalar>::WIDTH)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, value: E) {
        encode_primitive(cur, value.ordinal());
    }

    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<E> {
        let ordinal: u32 = decode_primitive(cur).map_err(|e| e.at_field(self.name))?;
        check_ordinal(ordinal).map_err(|e| e.at_field(self.name))
    }
}

/// String field with a presence rule and an optional character limit.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub name: &'static str,
    pub rule: TextRule,
}

impl TextField {
    /// Must be non-empty. `max_chars == 0` means unlimited.
    pub const fn required(name: &'static str, max_chars: usize) -> Self {
        Self {
            name,
            rule: TextRule::new(Presence::Required, max_chars),
        }
    }

    /// May be empty. `max_chars == 0` means unlimited.
    pub const fn optional(name: &'static str, max_chars: usize) -> Self {
        Self {
            name,
            rule: TextRule::new(Presence::Optional, max_chars),
        }
    }

    pub fn size(&self, align: Alignment, value: &str) -> usize {
        string::encoded_size(value, align)
    }

    /// Size of the shortest encoding that can appear on the wire.
    pub fn min_size(&self, align: Alignment) -> usize {
        string::encoded_size("", align)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, value: &str) {
        encode_string(cur, value);
    }

    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<String> {
        let value = decode_string(cur, self.rule.max_chars).map_err(|e| e.at_field(self.name))?;
        self.rule.check(&value).map_err(|e| e.at_field(self.name))?;
        Ok(value)
    }
}

/// Counted array of nested records.
#[derive(Debug, Clone, Copy)]
pub struct ArrayField<R> {
    pub name: &'static str,
    _item: PhantomData<R>,
}

impl<R> ArrayField<R> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _item: PhantomData,
        }
    }
}

impl<R: Record> ArrayField<R> {
    pub fn size(&self, align: Alignment, items: &[R]) -> usize {
        items
            .iter()
            .fold(align.aligned(<LengthPrefix as Scalar>::WIDTH), |total, item| {
                total + item.encoded_size(align)
            })
    }

    /// Size of an empty array.
    pub fn min_size(&self, align: Alignment) -> usize {
        align.aligned(<LengthPrefix as Scalar>::WIDTH)
    }

    pub fn encode(&self, cur: &mut WriteCursor<'_>, items: &[R]) {
        encode_primitive(cur, items.len() as LengthPrefix);
        for item in items {
            item.encode_fields(cur);
        }
    }

    /// Decode the count, bound it by what the remaining input could hold,
    /// then decode each element in turn.
    pub fn decode(&self, cur: &mut ReadCursor<'_>) -> Result<Vec<R>> {
        self.decode_items(cur).map_err(|e| e.at_field(self.name))
    }

    fn decode_items(&self, cur: &mut ReadCursor<'_>) -> Result<Vec<R>> {
        let declared: LengthPrefix = decode_primitive(cur)?;

        let smallest = R::min_encoded_size(cur.alignment()).max(1);
        let ceiling = cur.remaining() / smallest;
        let count = match usize::try_from(declared) {
            Ok(count) if count <= ceiling => count,
            _ => {
                return Err(CodecError::CountTooLarge {
                    count: declared,
                    ceiling,
                })
            }
        };

        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let item = R::decode_fields(cur).map_err(|e| e.at_element(index))?;
            items.push(item);
        }
        Ok(items)
    }
}
