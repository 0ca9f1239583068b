//! Snapshot providers
//!
//! A [`SnapshotProvider`] turns a [`Revision`] into a [`SchemaSnapshot`].
//! [`CompilerProvider`] compiles a source-control revision with `protoc`;
//! [`FileProvider`] loads an artifact that was captured earlier.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use protodiff_core::errors::ExError;
use protodiff_core::{log_op_end, log_op_error, log_op_start, SchemaSnapshot};

use crate::compiler;
use crate::descriptor::{
    decode_descriptor_set, decode_request, snapshot_from_descriptor_set, snapshot_from_request,
};
use crate::echo::decode_capture;
use crate::errors::{io_error, Result};
use crate::git::Worktree;

/// A schema revision as understood by a provider
///
/// For [`CompilerProvider`] this is a git revision (or [`Revision::WORKTREE`]);
/// for [`FileProvider`] it is the path of a captured artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// The working tree as it is on disk, without any checkout
    pub const WORKTREE: &'static str = "WORKTREE";

    pub fn new(revision: impl Into<String>) -> Self {
        Self(revision.into())
    }

    pub fn worktree() -> Self {
        Self::new(Self::WORKTREE)
    }

    pub fn is_worktree(&self) -> bool {
        self.0 == Self::WORKTREE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Revision {
    fn from(revision: &str) -> Self {
        Self::new(revision)
    }
}

impl From<String> for Revision {
    fn from(revision: String) -> Self {
        Self(revision)
    }
}

/// Obtain a schema snapshot for a revision
pub trait SnapshotProvider {
    /// Produce the snapshot for `revision`
    ///
    /// # Errors
    ///
    /// Any collaborator failure (checkout, compiler, capture, decoding, I/O).
    fn snapshot(&self, revision: &Revision) -> std::result::Result<SchemaSnapshot, ExError>;
}

/// Error returned when parsing an unknown mode or format name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    what: &'static str,
    value: String,
    expected: &'static str,
}

/// How the compiler's descriptor output is captured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureMode {
    /// Run protodiff itself as a `protoc` plugin
    #[default]
    Plugin,
    /// Use `protoc --descriptor_set_out`
    DescriptorSet,
}

impl CaptureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Plugin => "plugin",
            CaptureMode::DescriptorSet => "descriptor-set",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "plugin" => Ok(CaptureMode::Plugin),
            "descriptor-set" => Ok(CaptureMode::DescriptorSet),
            other => Err(UnknownVariant {
                what: "capture mode",
                value: other.to_string(),
                expected: "plugin, descriptor-set",
            }),
        }
    }
}

/// Resolved compiler configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Repository root; revisions are checked out from here
    pub repo: PathBuf,
    /// Compiler executable
    pub protoc: PathBuf,
    /// Include paths, relative to the checked-out tree unless absolute
    pub include: Vec<PathBuf>,
    /// Proto files to compile, relative to the checked-out tree
    pub files: Vec<PathBuf>,
    pub capture: CaptureMode,
    /// Plugin executable for [`CaptureMode::Plugin`]; defaults to the running binary
    pub shim: Option<PathBuf>,
}

impl ProviderConfig {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            repo: PathBuf::from("."),
            protoc: PathBuf::from("protoc"),
            include: Vec::new(),
            files: files.into_iter().map(Into::into).collect(),
            capture: CaptureMode::default(),
            shim: None,
        }
    }

    pub fn with_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_protoc(mut self, protoc: impl Into<PathBuf>) -> Self {
        self.protoc = protoc.into();
        self
    }

    pub fn with_include(mut self, include: impl Into<PathBuf>) -> Self {
        self.include.push(include.into());
        self
    }

    pub fn with_capture(mut self, capture: CaptureMode) -> Self {
        self.capture = capture;
        self
    }

    pub fn with_shim(mut self, shim: impl Into<PathBuf>) -> Self {
        self.shim = Some(shim.into());
        self
    }
}

/// Compiles a git revision with `protoc` and decodes the captured output
#[derive(Debug, Clone)]
pub struct CompilerProvider {
    config: ProviderConfig,
}

impl CompilerProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn shim(&self) -> Result<PathBuf> {
        match &self.config.shim {
            Some(shim) => Ok(shim.clone()),
            None => std::env::current_exe().map_err(|e| io_error("locate_shim", e)),
        }
    }

    fn snapshot_impl(&self, revision: &Revision) -> Result<SchemaSnapshot> {
        // `worktree` is declared after `scratch` so it is removed first
        let scratch = tempfile::Builder::new()
            .prefix("protodiff")
            .tempdir()
            .map_err(|e| io_error("create_temp_dir", e))?;
        let out_dir = scratch.path().join("out");
        std::fs::create_dir(&out_dir).map_err(|e| io_error("create_out_dir", e))?;

        let worktree = if revision.is_worktree() {
            None
        } else {
            Some(Worktree::add(
                &self.config.repo,
                revision.as_str(),
                &scratch.path().join("tree"),
            )?)
        };
        // Both roots name the same directory, so relative includes resolve alike
        let root = match &worktree {
            Some(worktree) => worktree.root(),
            None => self.config.repo.clone(),
        };

        let shim = self.shim()?;
        let capture = compiler::compile(&self.config, revision.as_str(), &root, &out_dir, &shim)?;
        let bytes = std::fs::read(&capture).map_err(|e| io_error("read_capture", e))?;

        let snapshot = match self.config.capture {
            CaptureMode::Plugin => {
                snapshot_from_request(&decode_request(&decode_capture(&bytes)?)?)
            }
            CaptureMode::DescriptorSet => {
                snapshot_from_descriptor_set(&decode_descriptor_set(&bytes)?)
            }
        };
        Ok(snapshot)
    }
}

impl SnapshotProvider for CompilerProvider {
    fn snapshot(&self, revision: &Revision) -> Result<SchemaSnapshot> {
        log_op_start!(
            "snapshot",
            revision = revision.as_str(),
            capture_mode = self.config.capture.as_str()
        );
        let start = std::time::Instant::now();

        let snapshot = self.snapshot_impl(revision).map_err(|e| {
            let e = if e.revision().is_none() {
                e.with_revision(revision.as_str())
            } else {
                e
            };
            log_op_error!(
                "snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                revision = revision.as_str()
            );
            e
        })?;

        log_op_end!(
            "snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            revision = revision.as_str(),
            file_count = snapshot.len()
        );

        Ok(snapshot)
    }
}

/// Encoding of a captured artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotFormat {
    /// Detect from content
    #[default]
    Auto,
    /// Binary `FileDescriptorSet`, as written by `protoc -o`
    DescriptorSet,
    /// Binary `CodeGeneratorRequest`
    Request,
    /// Base64 `CodeGeneratorRequest`, as written by the capture shim
    Capture,
}

impl SnapshotFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFormat::Auto => "auto",
            SnapshotFormat::DescriptorSet => "descriptor-set",
            SnapshotFormat::Request => "request",
            SnapshotFormat::Capture => "capture",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapshotFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(SnapshotFormat::Auto),
            "descriptor-set" => Ok(SnapshotFormat::DescriptorSet),
            "request" => Ok(SnapshotFormat::Request),
            "capture" => Ok(SnapshotFormat::Capture),
            other => Err(UnknownVariant {
                what: "snapshot format",
                value: other.to_string(),
                expected: "auto, descriptor-set, request, capture",
            }),
        }
    }
}

/// Loads snapshots from captured artifacts; the revision is a file path
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProvider {
    format: SnapshotFormat,
}

impl FileProvider {
    pub fn new(format: SnapshotFormat) -> Self {
        Self { format }
    }

    /// Decode artifact bytes according to the configured format
    pub fn decode(&self, bytes: &[u8]) -> Result<SchemaSnapshot> {
        match self.format {
            SnapshotFormat::DescriptorSet => {
                Ok(snapshot_from_descriptor_set(&decode_descriptor_set(bytes)?))
            }
            SnapshotFormat::Request => Ok(snapshot_from_request(&decode_request(bytes)?)),
            SnapshotFormat::Capture => {
                Ok(snapshot_from_request(&decode_request(&decode_capture(bytes)?)?))
            }
            SnapshotFormat::Auto => detect(bytes),
        }
    }

    fn load(&self, path: &Path) -> Result<SchemaSnapshot> {
        let bytes = std::fs::read(path).map_err(|e| io_error("read_snapshot", e).with_path(path))?;
        self.decode(&bytes).map_err(|e| e.with_path(path))
    }
}

fn looks_like_base64(bytes: &[u8]) -> bool {
    !bytes.is_empty()
        && bytes.iter().all(|b| {
            b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=' | b'\n' | b'\r')
        })
}

/// Try the capture encoding, then a request, then a descriptor set.
///
/// A descriptor set decodes as a request with no proto files, so a request
/// only wins when it actually carries files.
fn detect(bytes: &[u8]) -> Result<SchemaSnapshot> {
    if looks_like_base64(bytes) {
        if let Ok(request) = decode_capture(bytes).and_then(|raw| decode_request(&raw)) {
            return Ok(snapshot_from_request(&request));
        }
    }
    if let Ok(request) = decode_request(bytes) {
        if !request.proto_file.is_empty() {
            return Ok(snapshot_from_request(&request));
        }
    }
    Ok(snapshot_from_descriptor_set(&decode_descriptor_set(bytes)?))
}

impl SnapshotProvider for FileProvider {
    fn snapshot(&self, revision: &Revision) -> Result<SchemaSnapshot> {
        log_op_start!(
            "snapshot",
            revision = revision.as_str(),
            snapshot_format = self.format.as_str()
        );
        let start = std::time::Instant::now();

        let snapshot = self.load(Path::new(revision.as_str())).map_err(|e| {
            log_op_error!(
                "snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                revision = revision.as_str()
            );
            e
        })?;

        log_op_end!(
            "snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            revision = revision.as_str(),
            file_count = snapshot.len()
        );

        Ok(snapshot)
    }
}
