//! Error handling for protodiff-snapshot
//!
//! Wraps protodiff-core ExError with provider-specific helpers

use std::path::Path;

use protodiff_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a revision checkout error
pub fn checkout_failed(revision: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::RevisionCheckout)
        .with_op("checkout")
        .with_revision(revision)
        .with_message(format!("git checkout failed: {}", reason.trim()))
}

/// Create a schema compiler error
pub fn compiler_failed(revision: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::CompilerFailed)
        .with_op("compile")
        .with_revision(revision)
        .with_message(format!("protoc failed: {}", reason.trim()))
}

/// Create a descriptor decode error
pub fn decode_failed(what: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::InvalidDescriptor)
        .with_op("decode")
        .with_message(format!("failed to decode {}: {}", what, err))
}

/// Create a missing capture error
pub fn capture_missing(path: &Path) -> ExError {
    ExError::new(ExErrorKind::CaptureMissing)
        .with_op("capture")
        .with_path(path)
        .with_message("compiler produced no capture file")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
