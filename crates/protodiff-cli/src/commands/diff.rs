//! Diff command
//!
//! Usage: protodiff diff [--from REV] [--to REV] [-I DIR]... PROTO...
//!
//! Compiles the proto files at two revisions and reports every breaking
//! change between them.

use clap::Args;
use std::path::PathBuf;

use protodiff_core::errors::{ExError, ExErrorKind};
use protodiff_core::logging_facility::{self, Profile};
use protodiff_core::{compute_diff, log_op_end, log_op_error, log_op_start, Report};
use protodiff_snapshot::{CaptureMode, CompilerProvider, Revision, SnapshotProvider};

use crate::commands::{render, OutputFormat};
use crate::config::{self, CliOverrides};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Proto files to compare, relative to the include paths
    pub files: Vec<PathBuf>,

    /// Revision holding the previous schema
    #[arg(long, env = "PROTODIFF_FROM", default_value = "HEAD")]
    pub from: String,

    /// Revision holding the current schema (WORKTREE for uncommitted files)
    #[arg(long, env = "PROTODIFF_TO", default_value = Revision::WORKTREE)]
    pub to: String,

    /// Include path passed to protoc (repeatable)
    #[arg(short = 'I', long = "include")]
    pub include: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How protoc's descriptor output is captured
    #[arg(long)]
    pub capture: Option<CaptureMode>,

    /// Path to the protoc executable
    #[arg(long, env = "PROTOC")]
    pub protoc: Option<PathBuf>,

    /// Repository root
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Config file (default: <repo>/protodiff.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(
    args: DiffArgs,
    log: Option<Profile>,
) -> Result<Report, Box<dyn std::error::Error>> {
    let file_config =
        config::load_or_default(&args.repo, args.config.as_deref()).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(format!("{:#}", e))
        })?;
    let merged = config::merge(
        &args.repo,
        file_config,
        CliOverrides {
            protoc: args.protoc,
            include: args.include,
            files: args.files,
            capture: args.capture,
            format: args.format,
            profile: log,
        },
    );
    logging_facility::init(merged.profile);

    if merged.provider.files.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("diff")
            .with_message("no proto files given; pass PROTO... or set [compiler] files")
            .into());
    }

    let from = Revision::new(args.from);
    let to = Revision::new(args.to);
    let provider = CompilerProvider::new(merged.provider);
    let report = diff_revisions(&provider, &from, &to)?;

    print!("{}", render(&report, merged.format)?);
    Ok(report)
}

/// Acquire both snapshots and diff them
pub fn diff_revisions(
    provider: &dyn SnapshotProvider,
    from: &Revision,
    to: &Revision,
) -> Result<Report, ExError> {
    log_op_start!("diff", from = from.as_str(), to = to.as_str());
    let start = std::time::Instant::now();

    let report = diff_revisions_impl(provider, from, to).map_err(|e| {
        log_op_error!(
            "diff",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        problem_count = report.len()
    );

    Ok(report)
}

fn diff_revisions_impl(
    provider: &dyn SnapshotProvider,
    from: &Revision,
    to: &Revision,
) -> Result<Report, ExError> {
    let previous = provider.snapshot(from)?;
    let current = provider.snapshot(to)?;
    Ok(compute_diff(&previous, &current))
}
