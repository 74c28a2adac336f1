//! Line-level change report between two texts

use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::fmt;

/// Kind of a line-level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Equal,
    Insert,
    Delete,
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    pub kind: ChangeKind,
    /// Line text without its terminator
    pub line: String,
    /// Zero-based line number in the original text
    pub old_index: Option<usize>,
    /// Zero-based line number in the new text
    pub new_index: Option<usize>,
}

impl fmt::Display for LineChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            ChangeKind::Equal => ' ',
            ChangeKind::Insert => '+',
            ChangeKind::Delete => '-',
        };
        write!(f, "{sign} {}", self.line)
    }
}

/// Result of comparing a document before and after editing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeReport {
    pub changes: Vec<LineChange>,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f32,
}

impl ChangeReport {
    /// Compute the report using the `similar` crate's line diff.
    pub fn compute(before: &str, after: &str) -> Self {
        let text_diff = TextDiff::from_lines(before, after);

        let changes = text_diff
            .iter_all_changes()
            .map(|change| LineChange {
                kind: match change.tag() {
                    ChangeTag::Equal => ChangeKind::Equal,
                    ChangeTag::Insert => ChangeKind::Insert,
                    ChangeTag::Delete => ChangeKind::Delete,
                },
                line: change.value().trim_end_matches(['\n', '\r']).to_string(),
                old_index: change.old_index(),
                new_index: change.new_index(),
            })
            .collect();

        Self {
            changes,
            similarity: text_diff.ratio(),
        }
    }

    /// Inserted and deleted lines, in diff order.
    pub fn edits(&self) -> impl Iterator<Item = &LineChange> {
        self.changes.iter().filter(|c| c.kind != ChangeKind::Equal)
    }

    pub fn is_unchanged(&self) -> bool {
        self.edits().next().is_none()
    }

    pub fn insertions(&self) -> usize {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Insert).count()
    }

    pub fn deletions(&self) -> usize {
        self.changes.iter().filter(|c| c.kind == ChangeKind::Delete).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        let report = ChangeReport::compute("a\nb\n", "a\nb\n");
        assert!(report.is_unchanged());
        assert_eq!(report.similarity, 1.0);
        assert_eq!(report.changes.len(), 2);
    }

    #[test]
    fn test_replaced_line() {
        let report = ChangeReport::compute("a\nimage: x\n", "a\n# image: x\n");
        let edits: Vec<String> = report.edits().map(ToString::to_string).collect();
        assert_eq!(edits, vec!["- image: x", "+ # image: x"]);
        assert_eq!(report.insertions(), 1);
        assert_eq!(report.deletions(), 1);
    }

    #[test]
    fn test_indices() {
        let report = ChangeReport::compute("a\nb\n", "a\nc\n");
        let deleted = report.edits().find(|c| c.kind == ChangeKind::Delete).unwrap();
        assert_eq!(deleted.old_index, Some(1));
        assert_eq!(deleted.new_index, None);
    }
}
