//! A student and their attendance status.

use crate::core::align::Alignment;
use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::field::{BoolField, EnumField, FloatField, IntField, TextField};
use crate::core::record::Record;
use crate::core::validate::WireEnum;
use crate::error::Result;

use super::{MAX_ALLOWED_AGE, MAX_PERSON_NAME_CHARS, MIN_ALLOWED_AGE};

/// How a person relates to the class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AttendanceType {
    #[default]
    Unknown = 0,
    /// Currently enrolled
    Enrolled,
    /// Trying to enroll
    Enrolling,
    Graduated,
    Expelled,
    /// Left voluntarily
    DroppedOut,
    /// Not currently associated with the college
    External,
}

impl AttendanceType {
    pub const ALL: [AttendanceType; 7] = [
        AttendanceType::Unknown,
        AttendanceType::Enrolled,
        AttendanceType::Enrolling,
        AttendanceType::Graduated,
        AttendanceType::Expelled,
        AttendanceType::DroppedOut,
        AttendanceType::External,
    ];
}

impl WireEnum for AttendanceType {
    const MIN: u32 = AttendanceType::Unknown as u32;
    const SENTINEL: u32 = AttendanceType::External as u32 + 1;

    fn ordinal(self) -> u32 {
        self as u32
    }

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(ordinal).ok()?).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Student {
    /// Age in years, or 0 if not known
    pub age: i32,
    /// Required
    pub given_name: String,
    pub second_name: String,
    pub third_name: String,
    pub attendance: AttendanceType,
    /// Currently suspended
    pub suspended: bool,
    pub performance_score: f64,
    /// Internal notes
    pub notes: String,
}

const AGE: IntField<i32> =
    IntField::ranged("age", MIN_ALLOWED_AGE as i64, MAX_ALLOWED_AGE as i64);
const GIVEN_NAME: TextField = TextField::required("given_name", MAX_PERSON_NAME_CHARS);
const SECOND_NAME: TextField = TextField::optional("second_name", MAX_PERSON_NAME_CHARS);
const THIRD_NAME: TextField = TextField::optional("third_name", MAX_PERSON_NAME_CHARS);
const ATTENDANCE: EnumField<AttendanceType> = EnumField::new("attendance");
const SUSPENDED: BoolField = BoolField::new("suspended");
const PERFORMANCE_SCORE: FloatField<f64> = FloatField::new("performance_score");
const NOTES: TextField = TextField::optional("notes", 0);

impl Student {
    pub fn new(age: i32, attendance: AttendanceType, given_name: impl Into<String>) -> Self {
        Self {
            age,
            attendance,
            given_name: given_name.into(),
            ..Self::default()
        }
    }

    pub fn with_second_name(mut self, name: impl Into<String>) -> Self {
        self.second_name = name.into();
        self
    }

    pub fn with_third_name(mut self, name: impl Into<String>) -> Self {
        self.third_name = name.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.performance_score = score;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_suspended(mut self, suspended: bool) -> Self {
        self.suspended = suspended;
        self
    }
}

impl Record for Student {
    const NAME: &'static str = "Student";

    fn min_encoded_size(align: Alignment) -> usize {
        AGE.size(align)
            + GIVEN_NAME.min_size(align)
            + SECOND_NAME.min_size(align)
            + THIRD_NAME.min_size(align)
            + ATTENDANCE.size(align)
            + SUSPENDED.size(align)
            + PERFORMANCE_SCORE.size(align)
            + NOTES.min_size(align)
    }

    fn encoded_size(&self, align: Alignment) -> usize {
        AGE.size(align)
            + GIVEN_NAME.size(align, &self.given_name)
            + SECOND_NAME.size(align, &self.second_name)
            + THIRD_NAME.size(align, &self.third_name)
            + ATTENDANCE.size(align)
            + SUSPENDED.size(align)
            + PERFORMANCE_SCORE.size(align)
            + NOTES.size(align, &self.notes)
    }

    fn encode_fields(&self, cur: &mut WriteCursor<'_>) {
        AGE.encode(cur, self.age);
        GIVEN_NAME.encode(cur, &self.given_name);
        SECOND_NAME.encode(cur, &self.second_name);
        THIRD_NAME.encode(cur, &self.third_name);
        ATTENDANCE.encode(cur, self.attendance);
        SUSPENDED.encode(cur, self.suspended);
        PERFORMANCE_SCORE.encode(cur, self.performance_score);
        NOTES.encode(cur, &self.notes);
    }

    fn decode_fields(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let age = AGE.decode(cur)?;
        let given_name = GIVEN_NAME.decode(cur)?;
        let second_name = SECOND_NAME.decode(cur)?;
        let third_name = THIRD_NAME.decode(cur)?;
        let attendance = ATTENDANCE.decode(cur)?;
        let suspended = SUSPENDED.decode(cur)?;
        let performance_score = PERFORMANCE_SCORE.decode(cur)?;
        let notes = NOTES.decode(cur)?;

        Ok(Self {
            age,
            given_name,
            second_name,
            third_name,
            attendance,
            suspended,
            performance_score,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordCodec;
    use crate::error::CodecError;

    fn codec() -> RecordCodec {
        RecordCodec::new(Alignment::new(8).unwrap())
    }

    #[test]
    fn test_min_size_with_eight_byte_alignment() {
        // age, 3 name prefixes, attendance, suspended, score, notes prefix
        assert_eq!(Student::min_encoded_size(Alignment::new(8).unwrap()), 8 * 8);
        assert_eq!(Student::min_encoded_size(Alignment::NONE), 4 + 8 * 3 + 4 + 1 + 8 + 8);
    }

    #[test]
    fn test_minimal_student_is_min_size() {
        let student = Student::new(0, AttendanceType::Unknown, "A");
        let align = Alignment::new(8).unwrap();
        assert_eq!(
            student.encoded_size(align),
            Student::min_encoded_size(align) + 8
        );
    }

    #[test]
    fn test_ordinal_mapping_covers_all_variants() {
        for (i, kind) in AttendanceType::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i as u32);
            assert_eq!(AttendanceType::from_ordinal(i as u32), Some(*kind));
        }
        assert_eq!(AttendanceType::SENTINEL, 7);
        assert_eq!(AttendanceType::from_ordinal(7), None);
    }

    #[test]
    fn test_missing_given_name_rejected() {
        let student = Student::new(30, AttendanceType::Enrolled, "");
        let bytes = codec().encode(&student).unwrap();
        let err = codec().decode::<Student>(&bytes).unwrap_err();
        assert_eq!(err.path(), "given_name");
        assert_eq!(err.root_cause(), &CodecError::EmptyString);
    }

    #[test]
    fn test_suspended_byte_two_rejected() {
        let student = Student::new(30, AttendanceType::Enrolled, "Ann").with_suspended(true);
        let mut bytes = codec().encode(&student).unwrap().to_vec();

        // age 8, three names (16 + 8 + 8), attendance 8
        let offset = 8 + 16 + 8 + 8 + 8;
        assert_eq!(bytes[offset], 1);
        bytes[offset] = 2;

        let err = codec().decode::<Student>(&bytes).unwrap_err();
        assert_eq!(err.path(), "suspended");
        assert_eq!(err.root_cause(), &CodecError::InvalidBool(2));
    }
}
