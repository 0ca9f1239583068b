use serde::{Deserialize, Serialize};

use crate::model::FileDefinition;

/// Schema Snapshot - the decoded form of one revision of a schema
///
/// A snapshot is the set of files the schema compiler produced for a single
/// revision. File names are unique within a snapshot and files keep the order
/// in which the compiler emitted them, which is the order the diff engine
/// walks them in.
///
/// Snapshots are never mutated once produced; the diff engine only borrows
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// File definitions in compiler emission order
    pub files: Vec<FileDefinition>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file definition (builder style)
    pub fn with_file(mut self, file: FileDefinition) -> Self {
        self.files.push(file);
        self
    }

    /// Look up a file by name
    pub fn file(&self, name: &str) -> Option<&FileDefinition> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Number of files in the snapshot
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the snapshot holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_lookup_by_name() {
        let snapshot = SchemaSnapshot::new()
            .with_file(FileDefinition::new("a.proto", "pkg.a"))
            .with_file(FileDefinition::new("b.proto", "pkg.b"));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.file("b.proto").map(|f| f.package.as_str()),
            Some("pkg.b")
        );
        assert!(snapshot.file("c.proto").is_none());
    }

    #[test]
    fn test_new_snapshot_is_empty() {
        assert!(SchemaSnapshot::new().is_empty());
    }
}
