//! # Error Types
//!
//! Every recoverable failure of the codec is a [`CodecError`] value.
//!
//! ## Error Categories
//! - **Bounds**: truncated input, oversized counts or lengths, undersized destinations
//! - **Validation**: out-of-range numbers, bad enum ordinals, bad booleans,
//!   non-finite floats, empty or oversized strings
//! - **Framing**: empty input, oversized input, trailing bytes
//! - **Configuration**: invalid alignment, limits or logging settings
//!
//! Decode failures are wrapped in [`CodecError::Field`] and
//! [`CodecError::Element`] on their way out, so the error names the path to
//! the value that was rejected. [`CodecError::root_cause`] strips that context.
//!
//! Internal invariant violations are not represented here. They abort the
//! process through [`crate::core::invariant::invariant_violated`].
//!
//! ## Example Usage
//! ```rust
//! use record_wire::error::CodecError;
//! use record_wire::model::ClassRoster;
//! use record_wire::RecordCodec;
//!
//! let codec = RecordCodec::default();
//! match codec.decode::<ClassRoster>(&[0xFF; 3]) {
//!     Ok((roster, used)) => println!("decoded {} ({used} bytes)", roster.name),
//!     Err(e) => assert!(matches!(e.root_cause(), CodecError::Truncated { .. })),
//! }
//! ```

use thiserror::Error;

/// Static configuration error messages.
pub mod constants {
    pub const ERR_ALIGNMENT_ZERO: &str = "Alignment cannot be 0";
    pub const ERR_ALIGNMENT_NOT_POWER_OF_TWO: &str = "Alignment must be a power of two";
    pub const ERR_ALIGNMENT_TOO_LARGE: &str = "Alignment too large";
    pub const ERR_MAX_INPUT_ZERO: &str = "Max input size cannot be 0";
    pub const ERR_EMPTY_APP_NAME: &str = "Application name cannot be empty";
    pub const ERR_NO_LOG_OUTPUT: &str =
        "At least one logging output (console or file) must be enabled";
    pub const ERR_LOG_FILE_PATH_MISSING: &str =
        "log_file_path must be specified when log_to_file is true";
}

// CodecError is the error type for every codec and configuration operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("Value {value} outside allowed range {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("Enum ordinal {ordinal} outside {min}..{sentinel}")]
    InvalidOrdinal { ordinal: u32, min: u32, sentinel: u32 },

    #[error("Invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("Non-finite floating point value")]
    NonFinite,

    #[error("Required string is empty")]
    EmptyString,

    #[error("String of {chars} characters exceeds limit of {max}")]
    StringTooLong { chars: usize, max: usize },

    #[error("String is not valid UTF-8")]
    InvalidUtf8,

    #[error("Element count {count} exceeds ceiling of {ceiling} for the remaining input")]
    CountTooLarge { count: u64, ceiling: usize },

    #[error("Length prefix {0} does not fit in memory")]
    LengthOverflow(u64),

    #[error("Empty input")]
    EmptyInput,

    #[error("Input too large: {size} bytes (max {max})")]
    InputTooLarge { size: usize, max: usize },

    #[error("Record of {size} bytes exceeds the size limit of {max}")]
    RecordTooLarge { size: usize, max: usize },

    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),

    #[error("Destination buffer of {provided} bytes is smaller than the required {required}")]
    BufferTooSmall { provided: usize, required: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("field `{field}`: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<CodecError>,
    },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attach the name of the field being decoded.
    pub fn at_field(self, field: &'static str) -> Self {
        CodecError::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Attach the index of the array element being decoded.
    pub fn at_element(self, index: usize) -> Self {
        CodecError::Element {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, with field and element context removed.
    pub fn root_cause(&self) -> &CodecError {
        let mut current = self;
        while let CodecError::Field { source, .. } | CodecError::Element { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Dotted path to the rejected value, e.g. `students[2].age`.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut current = self;
        loop {
            match current {
                CodecError::Field { field, source } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(field);
                    current = source.as_ref();
                }
                CodecError::Element { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    current = source.as_ref();
                }
                _ => return path,
            }
        }
    }
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
