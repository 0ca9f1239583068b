//! Schema compatibility diff engine.
//!
//! Compares two schema snapshots and produces an ordered report of the
//! changes that would break producers or consumers built against the
//! previous snapshot.
//!
//! ## Entry point
//!
//! ```ignore
//! use protodiff_core::diff::{compute_diff, render_text};
//!
//! let report = compute_diff(&previous, &current);
//! print!("{}", render_text(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce an identical, identically
//!   ordered report.
//! - **Additions are compatible**: entities that exist only in `current`
//!   never produce a problem.
//! - **No fail-fast**: every problem across the whole traversal is reported.
//! - **Purity**: no I/O, no logging, no shared state; inputs are borrowed
//!   immutably.

pub mod engine;
pub mod model;
pub mod render;

pub use engine::{check_compatibility, compute_diff};
pub use model::{Problem, Report};
pub use render::{render_human_summary, render_json, render_text};
