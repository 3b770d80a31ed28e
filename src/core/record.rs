//! # Record Codec
//!
//! A record is a fixed, ordered list of fields. [`Record`] describes one record
//! type; [`RecordCodec`] drives encode and decode over whole buffers.
//!
//! ## Encode
//! Encoding runs in two passes over the same field order. The size query sums
//! the aligned size of every field. The fill pass zeroes a destination of that
//! size, writes every field, then checks it wrote exactly the queried length.
//!
//! ## Decode
//! Decoding builds a fresh value field by field and validates each one as soon
//! as it is read. The first failure abandons the value, so callers only ever
//! see a complete record or an error.
//!
//! ## Size Limit
//! A codec has no size limit unless one is set with
//! [`RecordCodec::with_max_input_size`] or taken from configuration. With a
//! limit, decode rejects larger input before reading any field and encode
//! refuses to produce a larger record, so everything a codec encodes it can
//! also decode.
//!
//! ## Security
//! - Array counts are capped by what the remaining input could hold before any
//!   allocation
//! - Encoding never validates; a record that would fail decode still encodes

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::core::align::Alignment;
use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::invariant::invariant_violated;
use crate::error::{CodecError, Result};

/// A record type with a fixed field order.
///
/// Implementations call their field descriptors in the same order from all
/// four methods.
pub trait Record: Sized + Default {
    /// Type name used in log output.
    const NAME: &'static str;

    /// Size of the smallest valid encoding: empty strings and arrays.
    ///
    /// Array decode divides the remaining input by this to bound element
    /// counts, so it must not overstate the true minimum.
    fn min_encoded_size(align: Alignment) -> usize;

    /// Exact encoded size of this value.
    fn encoded_size(&self, align: Alignment) -> usize;

    /// Write every field in order. The cursor has room for `encoded_size`.
    fn encode_fields(&self, cur: &mut WriteCursor<'_>);

    /// Read and validate every field in order.
    fn decode_fields(cur: &mut ReadCursor<'_>) -> Result<Self>;
}

/// Encodes and decodes records for one wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCodec {
    alignment: Alignment,
    max_input_size: Option<usize>,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(Alignment::NATIVE)
    }
}

impl RecordCodec {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            max_input_size: None,
        }
    }

    /// Build a codec from configuration, rejecting invalid settings.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        config.validate_strict()?;
        let alignment = Alignment::try_from(config.alignment)?;
        Ok(Self::new(alignment).with_max_input_size(config.max_input_size))
    }

    /// Limit encoded records, and so decode input, to `max_input_size` bytes.
    pub fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = Some(max_input_size);
        self
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn max_input_size(&self) -> Option<usize> {
        self.max_input_size
    }

    /// Size-query mode: bytes needed to encode `record`.
    pub fn encoded_size<R: Record>(&self, record: &R) -> usize {
        record.encoded_size(self.alignment)
    }

    /// Fill mode: encode `record` into the front of `dst`.
    ///
    /// Returns the number of bytes written. Bytes of `dst` past that length
    /// are left untouched.
    ///
    /// # Errors
    /// Returns `CodecError::RecordTooLarge` if the encoding would exceed the
    /// size limit, and `CodecError::BufferTooSmall` if `dst` is shorter than
    /// [`encoded_size`](Self::encoded_size).
    pub fn encode_into<R: Record>(&self, record: &R, dst: &mut [u8]) -> Result<usize> {
        let required = self.checked_size(record)?;
        if dst.len() < required {
            return Err(CodecError::BufferTooSmall {
                provided: dst.len(),
                required,
            });
        }

        let dst = &mut dst[..required];
        dst.fill(0);

        let mut cur = WriteCursor::new(dst, self.alignment);
        record.encode_fields(&mut cur);

        if cur.position() != required {
            invariant_violated("encoded length differs from the size query");
        }

        trace!(record = R::NAME, bytes = required, "Encoded record");
        Ok(required)
    }

    /// Encode `record` into a freshly allocated buffer.
    ///
    /// Only fails when the codec has a size limit and the record exceeds it.
    pub fn encode<R: Record>(&self, record: &R) -> Result<Bytes> {
        let mut buf = vec![0u8; self.checked_size(record)?];
        self.encode_into(record, &mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn checked_size<R: Record>(&self, record: &R) -> Result<usize> {
        let size = self.encoded_size(record);
        match self.max_input_size {
            Some(max) if size > max => {
                debug!(record = R::NAME, size, max, "Refused to encode oversized record");
                Err(CodecError::RecordTooLarge { size, max })
            }
            _ => Ok(size),
        }
    }

    /// Decode a record from the front of `input`.
    ///
    /// Returns the record and the number of bytes it occupied. Bytes after
    /// that are ignored.
    pub fn decode<R: Record>(&self, input: &[u8]) -> Result<(R, usize)> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        if let Some(max) = self.max_input_size {
            if input.len() > max {
                debug!(
                    record = R::NAME,
                    size = input.len(),
                    max,
                    "Rejected oversized input"
                );
                return Err(CodecError::InputTooLarge {
                    size: input.len(),
                    max,
                });
            }
        }

        let mut cur = ReadCursor::new(input, self.alignment);
        match R::decode_fields(&mut cur) {
            Ok(record) => {
                let consumed = cur.position();
                if consumed > input.len() {
                    invariant_violated("decode consumed more bytes than it was given");
                }
                trace!(record = R::NAME, consumed, "Decoded record");
                Ok((record, consumed))
            }
            Err(e) => {
                debug!(
                    record = R::NAME,
                    input_len = input.len(),
                    at = cur.position(),
                    path = %e.path(),
                    error = %e.root_cause(),
                    "Rejected record"
                );
                Err(e)
            }
        }
    }

    /// Decode a record that must span all of `input`.
    pub fn decode_exact<R: Record>(&self, input: &[u8]) -> Result<R> {
        let (record, consumed) = self.decode(input)?;
        if consumed != input.len() {
            return Err(CodecError::TrailingBytes(input.len() - consumed));
        }
        Ok(record)
    }

    /// Decode into an existing value.
    ///
    /// On success `target` holds the decoded record. On failure it is reset to
    /// `R::default()`; it never holds a partly decoded record.
    pub fn decode_in_place<R: Record>(&self, target: &mut R, input: &[u8]) -> Result<usize> {
        match self.decode(input) {
            Ok((record, consumed)) => {
                *target = record;
                Ok(consumed)
            }
            Err(e) => {
                *target = R::default();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{ArrayField, IntField, TextField};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Tag {
        weight: i16,
        label: String,
    }

    const WEIGHT: IntField<i16> = IntField::ranged("weight", 1, 99);
    const LABEL: TextField = TextField::required("label", 8);

    impl Record for Tag {
        const NAME: &'static str = "Tag";

        fn min_encoded_size(align: Alignment) -> usize {
            WEIGHT.size(align) + LABEL.min_size(align)
        }

        fn encoded_size(&self, align: Alignment) -> usize {
            WEIGHT.size(align) + LABEL.size(align, &self.label)
        }

        fn encode_fields(&self, cur: &mut WriteCursor<'_>) {
            WEIGHT.encode(cur, self.weight);
            LABEL.encode(cur, &self.label);
        }

        fn decode_fields(cur: &mut ReadCursor<'_>) -> Result<Self> {
            let weight = WEIGHT.decode(cur)?;
            let label = LABEL.decode(cur)?;
            Ok(Self { weight, label })
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Bundle {
        id: u32,
        tags: Vec<Tag>,
    }

    const ID: IntField<u32> = IntField::unchecked("id");
    const TAGS: ArrayField<Tag> = ArrayField::new("tags");

    impl Record for Bundle {
        const NAME: &'static str = "Bundle";

        fn min_encoded_size(align: Alignment) -> usize {
            ID.size(align) + TAGS.min_size(align)
        }

        fn encoded_size(&self, align: Alignment) -> usize {
            ID.size(align) + TAGS.size(align, &self.tags)
        }

        fn encode_fields(&self, cur: &mut WriteCursor<'_>) {
            ID.encode(cur, self.id);
            TAGS.encode(cur, &self.tags);
        }

        fn decode_fields(cur: &mut ReadCursor<'_>) -> Result<Self> {
            let id = ID.decode(cur)?;
            let tags = TAGS.decode(cur)?;
            Ok(Self { id, tags })
        }
    }

    fn bundle() -> Bundle {
        Bundle {
            id: 7,
            tags: vec![
                Tag {
                    weight: 3,
                    label: "red".into(),
                },
                Tag {
                    weight: 0,
                    label: "blue".into(),
                },
            ],
        }
    }

    #[test]
    fn test_roundtrip_with_each_alignment() {
        for bytes in [1usize, 2, 4, 8, 16] {
            let codec = RecordCodec::new(Alignment::new(bytes).unwrap());
            let encoded = codec.encode(&bundle()).unwrap();
            assert_eq!(encoded.len(), codec.encoded_size(&bundle()));
            assert_eq!(encoded.len() % bytes, 0);

            let (decoded, consumed) = codec.decode::<Bundle>(&encoded).unwrap();
            assert_eq!(decoded, bundle());
            assert_eq!(consumed, encoded.len());
        }
    }

    #[test]
    fn test_encode_into_leaves_tail_untouched() {
        let codec = RecordCodec::new(Alignment::new(8).unwrap());
        let required = codec.encoded_size(&bundle());
        let mut buf = vec![0xCCu8; required + 5];

        assert_eq!(codec.encode_into(&bundle(), &mut buf).unwrap(), required);
        assert_eq!(&buf[required..], &[0xCC; 5]);
        assert_eq!(&buf[..required], &codec.encode(&bundle()).unwrap()[..]);
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let codec = RecordCodec::default();
        let required = codec.encoded_size(&bundle());
        let mut buf = vec![0u8; required - 1];

        assert_eq!(
            codec.encode_into(&bundle(), &mut buf),
            Err(CodecError::BufferTooSmall {
                provided: required - 1,
                required
            })
        );
    }

    #[test]
    fn test_nested_failure_reports_path() {
        let codec = RecordCodec::new(Alignment::new(8).unwrap());
        let mut bad = bundle();
        bad.tags[1].weight = 100;

        let encoded = codec.encode(&bad).unwrap();
        let err = codec.decode::<Bundle>(&encoded).unwrap_err();
        assert_eq!(err.path(), "tags[1].weight");
        assert_eq!(
            err.root_cause(),
            &CodecError::OutOfRange {
                value: 100,
                min: 1,
                max: 99
            }
        );
    }

    #[test]
    fn test_count_above_ceiling_rejected_before_allocation() {
        let codec = RecordCodec::new(Alignment::new(8).unwrap());
        let mut encoded = codec.encode(&Bundle::default()).unwrap().to_vec();
        // id (8) then count (8)
        encoded[8..16].copy_from_slice(&u64::MAX.to_ne_bytes());

        let err = codec.decode::<Bundle>(&encoded).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CodecError::CountTooLarge { count: u64::MAX, ceiling: 0 }
        ));
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        let codec = RecordCodec::default();
        let mut encoded = codec.encode(&bundle()).unwrap().to_vec();
        encoded.extend_from_slice(&[0u8; 3]);

        let (_, consumed) = codec.decode::<Bundle>(&encoded).unwrap();
        assert_eq!(consumed, encoded.len() - 3);
        assert_eq!(
            codec.decode_exact::<Bundle>(&encoded),
            Err(CodecError::TrailingBytes(3))
        );
    }

    #[test]
    fn test_decode_in_place_resets_on_failure() {
        let codec = RecordCodec::default();
        let mut target = bundle();

        assert!(codec.decode_in_place(&mut target, &[1, 2, 3]).is_err());
        assert_eq!(target, Bundle::default());

        let encoded = codec.encode(&bundle()).unwrap();
        let used = codec.decode_in_place(&mut target, &encoded).unwrap();
        assert_eq!(used, encoded.len());
        assert_eq!(target, bundle());
    }

    #[test]
    fn test_empty_and_oversized_input() {
        let codec = RecordCodec::default().with_max_input_size(16);
        assert_eq!(codec.decode::<Bundle>(&[]), Err(CodecError::EmptyInput));
        assert_eq!(
            codec.decode::<Bundle>(&[0u8; 17]),
            Err(CodecError::InputTooLarge { size: 17, max: 16 })
        );
    }

    #[test]
    fn test_size_limit_applies_to_encode() {
        let unlimited = RecordCodec::new(Alignment::new(8).unwrap());
        assert_eq!(unlimited.max_input_size(), None);
        let size = unlimited.encoded_size(&bundle());

        let limited = unlimited.with_max_input_size(size - 1);
        assert_eq!(
            limited.encode(&bundle()),
            Err(CodecError::RecordTooLarge {
                size,
                max: size - 1
            })
        );
        let mut buf = vec![0u8; size];
        assert!(matches!(
            limited.encode_into(&bundle(), &mut buf),
            Err(CodecError::RecordTooLarge { .. })
        ));

        let exact = unlimited.with_max_input_size(size);
        let encoded = exact.encode(&bundle()).unwrap();
        assert_eq!(exact.decode_exact::<Bundle>(&encoded).unwrap(), bundle());
    }
}
