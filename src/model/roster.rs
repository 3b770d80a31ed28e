//! A class and the people associated with it.

use crate::core::align::Alignment;
use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::field::{ArrayField, IntField, TextField};
use crate::core::record::Record;
use crate::error::Result;

use super::student::{AttendanceType, Student};
use super::{MAX_ALLOWED_YEAR, MAX_CLASS_NAME_CHARS, MIN_ALLOWED_YEAR};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassRoster {
    /// Year the class was established, or 0 if not known
    pub year_established: i32,
    /// Required
    pub name: String,
    pub students: Vec<Student>,
    /// Internal notes
    pub notes: String,
}

impl ClassRoster {
    /// A populated five-student roster, used by the demo and benchmarks.
    pub fn sample() -> Self {
        Self {
            year_established: 2023,
            name: "Class of 2023".into(),
            notes: "My super fictional class.".into(),
            students: vec![
                Student::new(21, AttendanceType::Enrolled, "John")
                    .with_second_name("Doe")
                    .with_score(12.5)
                    .with_notes("Best student"),
                Student::new(19, AttendanceType::Enrolling, "Mary")
                    .with_second_name("Smith")
                    .with_score(13.75)
                    .with_notes("Will be attending in September"),
                Student::new(76, AttendanceType::Graduated, "Kareem")
                    .with_second_name("Abdul")
                    .with_third_name("Jabbar")
                    .with_score(125.44),
                Student::new(35, AttendanceType::External, "Rihanna")
                    .with_notes("Celebrity endorsement"),
                Student::new(62, AttendanceType::DroppedOut, "Unruly Kid")
                    .with_score(-5.0)
                    .with_notes("Never enroll him again!")
                    .with_suspended(true),
            ],
        }
    }
}

const YEAR_ESTABLISHED: IntField<i32> = IntField::ranged(
    "year_established",
    MIN_ALLOWED_YEAR as i64,
    MAX_ALLOWED_YEAR as i64,
);
const CLASS_NAME: TextField = TextField::required("name", MAX_CLASS_NAME_CHARS);
const STUDENTS: ArrayField<Student> = ArrayField::new("students");
const NOTES: TextField = TextField::optional("notes", 0);

impl Record for ClassRoster {
    const NAME: &'static str = "ClassRoster";

    fn min_encoded_size(align: Alignment) -> usize {
        YEAR_ESTABLISHED.size(align)
            + CLASS_NAME.min_size(align)
            + STUDENTS.min_size(align)
            + NOTES.min_size(align)
    }

    fn encoded_size(&self, align: Alignment) -> usize {
        YEAR_ESTABLISHED.size(align)
            + CLASS_NAME.size(align, &self.name)
            + STUDENTS.size(align, &self.students)
            + NOTES.size(align, &self.notes)
    }

    fn encode_fields(&self, cur: &mut WriteCursor<'_>) {
        YEAR_ESTABLISHED.encode(cur, self.year_established);
        CLASS_NAME.encode(cur, &self.name);
        STUDENTS.encode(cur, &self.students);
        NOTES.encode(cur, &self.notes);
    }

    fn decode_fields(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let year_established = YEAR_ESTABLISHED.decode(cur)?;
        let name = CLASS_NAME.decode(cur)?;
        let students = STUDENTS.decode(cur)?;
        let notes = NOTES.decode(cur)?;

        Ok(Self {
            year_established,
            name,
            students,
            notes,
        })
    }
}
