use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diff::model::Report;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of every
/// failure protodiff can report. Each kind maps to a stable error code that
/// can be used for programmatic handling, testing, and CI log scraping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    /// Captured descriptor bytes could not be decoded
    InvalidDescriptor,

    // Snapshot acquisition
    /// The revision could not be materialised from source control
    RevisionCheckout,
    /// The schema compiler exited unsuccessfully or could not be spawned
    CompilerFailed,
    /// The compiler succeeded but the expected capture file was not written
    CaptureMissing,

    // Integration/IO
    Io,
    Serialization,
    Config,

    // Verdict
    /// The diff found at least one breaking change
    BreakingChange,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidDescriptor => "ERR_INVALID_DESCRIPTOR",
            ExErrorKind::RevisionCheckout => "ERR_REVISION_CHECKOUT",
            ExErrorKind::CompilerFailed => "ERR_COMPILER_FAILED",
            ExErrorKind::CaptureMissing => "ERR_CAPTURE_MISSING",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::BreakingChange => "ERR_BREAKING_CHANGE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context describing
/// where the failure happened (operation, revision, filesystem path).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    revision: Option<String>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            revision: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add source-control revision context
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the revision context, if any
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(revision) = &self.revision {
            write!(f, " (revision: {})", revision)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Aggregate verdict error returned by [`crate::diff::check_compatibility`]
///
/// Compatibility violations are not failures of the diff itself; they are its
/// output. This error exists so that "did the check pass" callers are forced
/// to treat a non-empty report as a failure. It owns the full report so no
/// problem is lost.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} breaking change(s) detected", .report.len())]
pub struct IncompatibleSchema {
    pub report: Report,
}

impl IncompatibleSchema {
    /// Number of problems in the report
    pub fn problem_count(&self) -> usize {
        self.report.len()
    }

    /// Take ownership of the report
    pub fn into_report(self) -> Report {
        self.report
    }
}

impl From<IncompatibleSchema> for ExError {
    fn from(err: IncompatibleSchema) -> Self {
        ExError::new(ExErrorKind::BreakingChange)
            .with_op("diff")
            .with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::Problem;

    #[test]
    fn test_codes_are_prefixed_and_distinct() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidDescriptor,
            ExErrorKind::RevisionCheckout,
            ExErrorKind::CompilerFailed,
            ExErrorKind::CaptureMissing,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Config,
            ExErrorKind::BreakingChange,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::RevisionCheckout)
            .with_op("checkout")
            .with_revision("abc123")
            .with_message("unknown revision");

        assert_eq!(
            err.to_string(),
            "[ERR_REVISION_CHECKOUT] in operation 'checkout': unknown revision (revision: abc123)"
        );
    }

    #[test]
    fn test_incompatible_schema_maps_to_breaking_change() {
        let report = Report::from(vec![
            Problem::RemovedMessage {
                message: "HelloRequest".to_string(),
            },
            Problem::RemovedEnum {
                name: "FOO".to_string(),
            },
        ]);
        let err = IncompatibleSchema { report };
        assert_eq!(err.problem_count(), 2);
        assert_eq!(err.to_string(), "2 breaking change(s) detected");

        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::BreakingChange);
        assert_eq!(ex.code(), "ERR_BREAKING_CHANGE");
        assert_eq!(ex.op(), Some("diff"));
    }
}
