//! # record-wire
//!
//! A binary codec for nested, variable-length records that decodes untrusted
//! bytes without reading outside the input and rejects semantically invalid
//! values as it goes.
//!
//! ## Example
//! ```rust
//! use record_wire::model::{AttendanceType, ClassRoster, Student};
//! use record_wire::RecordCodec;
//!
//! let roster = ClassRoster {
//!     year_established: 2023,
//!     name: "Class of 2023".into(),
//!     students: vec![Student::new(21, AttendanceType::Enrolled, "John").with_second_name("Doe")],
//!     notes: "note".into(),
//! };
//!
//! let codec = RecordCodec::default();
//! let bytes = codec.encode(&roster).unwrap();
//! let (decoded, consumed) = codec.decode::<ClassRoster>(&bytes).unwrap();
//! assert_eq!(decoded, roster);
//! assert_eq!(consumed, bytes.len());
//! ```
//!
//! ## Modules
//! - [`core`](crate::core): alignment, cursors, scalar/string/record codecs and validation
//! - [`model`]: the class roster record types
//! - [`config`]: TOML and environment configuration
//! - [`error`]: the recoverable error type
//! - [`utils`]: logging setup

pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod utils;

pub use crate::core::align::Alignment;
pub use crate::core::record::{Record, RecordCodec};
pub use crate::error::{CodecError, Result};
