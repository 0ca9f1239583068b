//! Schema compiler invocation
//!
//! Runs `protoc` over a source tree and returns the path of the captured
//! descriptor output.

use std::path::{Path, PathBuf};
use std::process::Command;

use protodiff_core::{log_op_end, log_op_error, log_op_start};

use crate::echo::CAPTURE_FILE_NAME;
use crate::errors::{capture_missing, compiler_failed, Result};
use crate::provider::{CaptureMode, ProviderConfig};

/// Name of the descriptor set written in `DescriptorSet` mode
pub const DESCRIPTOR_SET_FILE_NAME: &str = "descriptor.pb";

/// Build the `protoc` invocation for one source tree
///
/// Relative include paths and proto files resolve against `root`. With no
/// include path configured, `root` itself is the include path.
pub fn protoc_command(
    config: &ProviderConfig,
    root: &Path,
    out_dir: &Path,
    shim: &Path,
) -> Command {
    let mut cmd = Command::new(&config.protoc);
    cmd.current_dir(root);

    if config.include.is_empty() {
        cmd.arg("-I").arg(".");
    }
    for include in &config.include {
        cmd.arg("-I").arg(include);
    }

    match config.capture {
        CaptureMode::Plugin => {
            let mut plugin = std::ffi::OsString::from("--plugin=protoc-gen-echo=");
            plugin.push(shim);
            let mut out = std::ffi::OsString::from("--echo_out=");
            out.push(out_dir);
            cmd.arg(plugin).arg(out);
        }
        CaptureMode::DescriptorSet => {
            let mut out = std::ffi::OsString::from("--descriptor_set_out=");
            out.push(out_dir.join(DESCRIPTOR_SET_FILE_NAME));
            cmd.arg(out);
        }
    }

    cmd.args(&config.files);
    cmd
}

/// Path of the file the compiler is expected to write for `mode`
pub fn capture_path(mode: CaptureMode, out_dir: &Path) -> PathBuf {
    match mode {
        CaptureMode::Plugin => out_dir.join(CAPTURE_FILE_NAME),
        CaptureMode::DescriptorSet => out_dir.join(DESCRIPTOR_SET_FILE_NAME),
    }
}

/// Compile the configured proto files found under `root`
///
/// # Errors
///
/// - `CompilerFailed` - protoc could not be spawned or exited unsuccessfully
/// - `CaptureMissing` - protoc succeeded but wrote no capture file
pub fn compile(
    config: &ProviderConfig,
    revision: &str,
    root: &Path,
    out_dir: &Path,
    shim: &Path,
) -> Result<PathBuf> {
    log_op_start!("compile", revision = revision, capture_mode = %config.capture);
    let start = std::time::Instant::now();

    let result = compile_impl(config, revision, root, out_dir, shim).map_err(|e| {
        log_op_error!(
            "compile",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            revision = revision
        );
        e
    })?;

    log_op_end!(
        "compile",
        duration_ms = start.elapsed().as_millis() as u64,
        revision = revision
    );

    Ok(result)
}

fn compile_impl(
    config: &ProviderConfig,
    revision: &str,
    root: &Path,
    out_dir: &Path,
    shim: &Path,
) -> Result<PathBuf> {
    let output = protoc_command(config, root, out_dir, shim)
        .output()
        .map_err(|e| {
            compiler_failed(
                revision,
                &format!("failed to run {}: {}", config.protoc.display(), e),
            )
        })?;

    if !output.status.success() {
        return Err(compiler_failed(
            revision,
            &String::from_utf8_lossy(&output.stderr),
        ));
    }

    let capture = capture_path(config.capture, out_dir);
    if !capture.is_file() {
        return Err(capture_missing(&capture).with_revision(revision));
    }
    Ok(capture)
}

/// Check whether the configured compiler can be executed
pub fn protoc_available(protoc: &Path) -> bool {
    Command::new(protoc)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
