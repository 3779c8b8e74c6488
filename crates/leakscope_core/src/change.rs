//! Commit and file-change value types.
//!
//! Both types are plain owned records created once during traversal and
//! never mutated afterwards. A [`FileChange`] references its [`Commit`] by
//! hash only; there is no back-pointer.

use serde::Serialize;

/// Metadata for one visited commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Full hex object hash, unique within a scan run.
    pub commit_hash: String,
    /// Complete commit message, decoded lossily.
    pub message: String,
    /// Author name from the commit signature.
    pub author: String,
}

/// The textual diff of one file within one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Path of the file within the repository.
    pub file_path: String,
    /// Hash of the commit this change belongs to.
    pub commit_hash: String,
    /// Unified diff text for this file.
    pub diff_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_serializes_with_report_field_names() {
        let commit = Commit {
            commit_hash: "abc123".to_owned(),
            message: "initial".to_owned(),
            author: "Ada".to_owned(),
        };

        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["commit_hash"], "abc123");
        assert_eq!(json["message"], "initial");
        assert_eq!(json["author"], "Ada");
    }

    #[test]
    fn file_change_serializes_with_report_field_names() {
        let change = FileChange {
            file_path: "src/config.rs".to_owned(),
            commit_hash: "abc123".to_owned(),
            diff_content: "+secret".to_owned(),
        };

        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["file_path"], "src/config.rs");
        assert_eq!(json["commit_hash"], "abc123");
        assert_eq!(json["diff_content"], "+secret");
    }
}
