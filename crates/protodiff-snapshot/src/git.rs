//! Source-control checkout
//!
//! Revisions are materialised as detached worktrees so the caller's
//! checkout, index and current branch are never touched.

use std::path::{Path, PathBuf};
use std::process::Command;

use protodiff_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{checkout_failed, Result};

/// A detached worktree that is removed when dropped
#[derive(Debug)]
pub struct Worktree {
    repo: PathBuf,
    path: PathBuf,
    prefix: PathBuf,
}

impl Worktree {
    /// Check out `revision` of `repo` into `path`
    ///
    /// `path` must not exist yet, or be an empty directory.
    pub fn add(repo: &Path, revision: &str, path: &Path) -> Result<Self> {
        log_op_start!("checkout", revision = revision);
        let start = std::time::Instant::now();

        let prefix = add_impl(repo, revision, path).map_err(|e| {
            log_op_error!(
                "checkout",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                revision = revision
            );
            e
        })?;

        log_op_end!(
            "checkout",
            duration_ms = start.elapsed().as_millis() as u64,
            revision = revision
        );

        Ok(Self {
            repo: repo.to_path_buf(),
            path: path.to_path_buf(),
            prefix,
        })
    }

    /// Top level of the checked-out tree
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory of the checked-out tree that corresponds to `repo`
    ///
    /// Equal to [`Worktree::path`] unless `repo` is a subdirectory of its
    /// repository.
    pub fn root(&self) -> PathBuf {
        self.path.join(&self.prefix)
    }
}

/// Path of `repo` relative to the top level of its repository
pub fn show_prefix(repo: &Path, revision: &str) -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["rev-parse", "--show-prefix"])
        .output()
        .map_err(|e| checkout_failed(revision, &format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        return Err(checkout_failed(
            revision,
            &String::from_utf8_lossy(&output.stderr),
        ));
    }
    let prefix = String::from_utf8_lossy(&output.stdout);
    Ok(PathBuf::from(prefix.trim_end_matches(['\n', '\r', '/'])))
}

fn add_impl(repo: &Path, revision: &str, path: &Path) -> Result<PathBuf> {
    let prefix = show_prefix(repo, revision)?;

    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["worktree", "add", "--detach"])
        .arg(path)
        .arg(revision)
        .output()
        .map_err(|e| checkout_failed(revision, &format!("failed to run git: {}", e)))?;

    if !output.status.success() {
        return Err(checkout_failed(
            revision,
            &String::from_utf8_lossy(&output.stderr),
        ));
    }
    Ok(prefix)
}

impl Drop for Worktree {
    fn drop(&mut self) {
        let removed = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["worktree", "remove", "--force"])
            .arg(&self.path)
            .output();

        match removed {
            Ok(output) if output.status.success() => {}
            Ok(output) => tracing::warn!(
                component = module_path!(),
                op = "checkout_cleanup",
                path = %self.path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "failed to remove worktree"
            ),
            Err(e) => tracing::warn!(
                component = module_path!(),
                op = "checkout_cleanup",
                path = %self.path.display(),
                error = %e,
                "failed to run git"
            ),
        }
    }
}

/// Check whether `git` can be executed
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
