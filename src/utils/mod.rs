//! # Utility Modules
//!
//! Supporting utilities shared by the codec, its demo and its tests.
//!
//! ## Components
//! - **Logging**: `tracing` subscriber setup driven by [`crate::config::LoggingConfig`]

pub mod logging;

pub use logging::init_logging;
