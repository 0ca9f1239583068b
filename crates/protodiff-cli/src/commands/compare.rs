//! Compare command
//!
//! Usage: protodiff compare PREVIOUS CURRENT [--input auto|descriptor-set|request|capture]
//!
//! Diffs two schema artifacts captured earlier, e.g. with `protoc -o` or by
//! the echo plugin. No compiler or repository is needed.

use clap::Args;
use std::path::PathBuf;

use protodiff_core::logging_facility::{self, Profile};
use protodiff_core::Report;
use protodiff_snapshot::{FileProvider, Revision, SnapshotFormat};

use crate::commands::diff::diff_revisions;
use crate::commands::{render, OutputFormat};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Artifact holding the previous schema
    pub previous: PathBuf,

    /// Artifact holding the current schema
    pub current: PathBuf,

    /// Encoding of both artifacts
    #[arg(long, default_value = "auto")]
    pub input: SnapshotFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute compare command
pub fn execute(
    args: CompareArgs,
    log: Option<Profile>,
) -> Result<Report, Box<dyn std::error::Error>> {
    logging_facility::init(log.unwrap_or(Profile::Quiet));

    let provider = FileProvider::new(args.input);
    let report = diff_revisions(
        &provider,
        &Revision::new(args.previous.to_string_lossy()),
        &Revision::new(args.current.to_string_lossy()),
    )?;

    print!("{}", render(&report, args.format)?);
    Ok(report)
}
