//! Structured logging facility for protodiff
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! All output goes to stderr: when protodiff runs as a compiler plugin its
//! stdout is the plugin protocol channel.
//!
//! # Usage
//!
//! ```rust
//! use protodiff_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Quiet);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
