//! protodiff Snapshot - schema snapshot acquisition
//!
//! Provides:
//! - Conversion of compiler descriptors (`FileDescriptorSet`,
//!   `CodeGeneratorRequest`) into the protodiff schema model
//! - The capture shim run by `protoc` as a plugin
//! - Snapshot providers: compile a source-control revision, or load a
//!   pre-captured artifact from disk
//!
//! Every failure here is a collaborator error (`ExError`); none of them is
//! ever reported as a breaking change.

pub mod compiler;
pub mod descriptor;
pub mod echo;
pub mod errors;
pub mod git;
pub mod provider;

// Re-export key types
pub use descriptor::{snapshot_from_descriptor_set, snapshot_from_request};
pub use echo::{run_echo, CAPTURE_FILE_NAME};
pub use errors::Result;
pub use provider::{
    CaptureMode, CompilerProvider, FileProvider, ProviderConfig, Revision, SnapshotFormat,
    SnapshotProvider,
};
