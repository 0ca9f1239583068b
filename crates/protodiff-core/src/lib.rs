//! protodiff Core - schema compatibility kernel
//!
//! This crate provides the pure, in-memory half of protodiff:
//! - Schema snapshot model (files, messages, fields, enums, services)
//! - The compatibility diff engine and its closed problem taxonomy
//! - Report renderers (one-line text, Markdown summary, JSON)
//! - The canonical error facility shared by every crate in the workspace
//! - The structured logging facility
//!
//! Nothing here performs I/O; obtaining snapshots is the job of
//! `protodiff-snapshot`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;

pub use protodiff_core_types::schema;

// Re-export commonly used types
pub use diff::{check_compatibility, compute_diff, Problem, Report};
pub use errors::{ExError, ExErrorKind, IncompatibleSchema};
pub use model::{
    EnumDefinition, EnumValueDefinition, FieldDefinition, FieldLabel, FieldType, FileDefinition,
    MessageDefinition, MethodDefinition, SchemaSnapshot, ServiceDefinition,
};
