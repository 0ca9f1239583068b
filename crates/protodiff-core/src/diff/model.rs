//! Compatibility diff output types.
//!
//! `Problem` is a closed set: every variant is a breaking change and there
//! are no severity tiers. All types implement
//! `Debug, Clone, Serialize, Deserialize, PartialEq`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{FieldLabel, FieldType};

/// A single breaking change between two schema snapshots.
///
/// Each variant stores only the identifying names and old/new values needed
/// for its one-line rendering (see the `Display` impl).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Problem {
    /// A file present in the previous snapshot is gone
    RemovedFile { file: String },

    /// A message was removed (or renamed) within its file
    RemovedMessage { message: String },

    /// No field carries this field's number any more
    RemovedField { field: String },

    /// Same field number, different wire type
    ChangedFieldType {
        field: String,
        old: FieldType,
        new: FieldType,
    },

    /// Same field number, different label (e.g. singular to repeated)
    ChangedFieldLabel {
        field: String,
        old: FieldLabel,
        new: FieldLabel,
    },

    /// An enum was removed (or renamed) within its file
    RemovedEnum { name: String },

    /// A previously valid enum number no longer exists
    RemovedEnumValue { name: String },

    /// An enum constant kept its name but now resolves to a different number
    ChangeEnumValue { name: String, old: i32, new: i32 },

    /// A service was removed (or renamed) within its file
    RemovedService { name: String },

    /// A method was removed (or renamed) within its service
    RemovedServiceMethod { name: String },

    /// A method's input or output type name changed
    ChangedService {
        method: String,
        old: String,
        new: String,
    },

    /// A method's client or server streaming flag flipped
    ChangedServiceStreaming { method: String },

    /// A file's package identifier changed
    ChangedPackage { old: String, new: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::RemovedFile { file } => write!(f, "removed file {}", file),
            Problem::RemovedMessage { message } => write!(f, "removed message {}", message),
            Problem::RemovedField { field } => write!(f, "removed field {}", field),
            Problem::ChangedFieldType { field, old, new } => {
                write!(f, "changed types for field {}: {} -> {}", field, old, new)
            }
            Problem::ChangedFieldLabel { field, old, new } => {
                write!(f, "changed label for field {}: {} -> {}", field, old, new)
            }
            Problem::RemovedEnum { name } => write!(f, "removed enum {}", name),
            Problem::RemovedEnumValue { name } => write!(f, "removed enum value {}", name),
            Problem::ChangeEnumValue { name, old, new } => {
                write!(f, "changed enum value {} from {} to {}", name, old, new)
            }
            Problem::RemovedService { name } => write!(f, "removed service {}", name),
            Problem::RemovedServiceMethod { name } => {
                write!(f, "removed service method {}", name)
            }
            Problem::ChangedService { method, old, new } => {
                write!(f, "changed types for service {}: {} -> {}", method, old, new)
            }
            Problem::ChangedServiceStreaming { method } => {
                write!(f, "changed service streaming {}", method)
            }
            Problem::ChangedPackage { old, new } => {
                write!(f, "changed package from {} to {}", old, new)
            }
        }
    }
}

/// The emission-ordered list of problems found by one diff.
///
/// An empty report means the current snapshot is backward compatible with the
/// previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    /// Problems in traversal order
    pub problems: Vec<Problem>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem
    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    /// Check if no breaking change was found
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Number of problems
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Iterate problems in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }
}

impl From<Vec<Problem>> for Report {
    fn from(problems: Vec<Problem>) -> Self {
        Self { problems }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Problem;
    type IntoIter = std::slice::Iter<'a, Problem>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}
