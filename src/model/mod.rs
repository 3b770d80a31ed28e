//! # Class Roster Records
//!
//! The record types carried by the codec: a class with its students.
//!
//! ## Limits
//! Numeric limits are inclusive, and `0` always means "not known". Name
//! limits count characters.

pub mod roster;
pub mod student;

pub use roster::ClassRoster;
pub use student::{AttendanceType, Student};

/// Youngest accepted student age
pub const MIN_ALLOWED_AGE: i32 = 10;

/// Oldest accepted student age
pub const MAX_ALLOWED_AGE: i32 = 200;

/// Earliest accepted founding year
pub const MIN_ALLOWED_YEAR: i32 = 1000;

/// Latest accepted founding year
pub const MAX_ALLOWED_YEAR: i32 = 2100;

/// Maximum length of a person's name
pub const MAX_PERSON_NAME_CHARS: usize = 1024;

/// Maximum length of a class name
pub const MAX_CLASS_NAME_CHARS: usize = 256;
