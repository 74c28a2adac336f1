//! Edit type for document modification.

use serde::Serialize;
use std::ops::Range;

/// A byte-span replacement applied to a document's working copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// Byte range replaced in the source the edit was computed against.
    pub span: Range<usize>,
    /// Text that was there before.
    pub old_content: String,
    /// Replacement text.
    pub new_content: String,
}

impl Edit {
    /// Apply the edit to `source`.
    pub fn apply(&self, source: &str) -> String {
        let mut result =
            String::with_capacity(source.len() - self.span.len() + self.new_content.len());
        result.push_str(&source[..self.span.start]);
        result.push_str(&self.new_content);
        result.push_str(&source[self.span.end..]);
        result
    }
}
