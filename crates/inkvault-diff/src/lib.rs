//! Line-level diff engine for chapter history.
//!
//! Computes a minimal edit script between two texts using the Myers
//! shortest-edit-script algorithm over lines. The output is a flat op
//! sequence that losslessly describes the old -> new transformation:
//! replaying `equal` + `delete` lines reproduces the old text, and
//! `equal` + `insert` lines reproduce the new text.
//!
//! The engine is pure and synchronous; it does no I/O and holds no state.

mod myers;

pub use myers::diff_lines;

use serde::{Deserialize, Serialize};

/// One line-level edit instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "line", rename_all = "lowercase")]
pub enum DiffOp {
    /// Line present in both texts.
    Equal(String),
    /// Line added in the new text.
    Insert(String),
    /// Line removed from the old text.
    Delete(String),
}

impl DiffOp {
    /// The line of text this op carries.
    pub fn line(&self) -> &str {
        match self {
            DiffOp::Equal(line) | DiffOp::Insert(line) | DiffOp::Delete(line) => line,
        }
    }
}

/// Split a text into lines for diffing.
///
/// `\r\n` and bare `\r` are collapsed to `\n` first. An empty string yields
/// zero lines, not one empty line.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split('\n').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_empty_yields_no_lines() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn split_normalizes_line_endings() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_keeps_trailing_empty_line() {
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
    }

    #[test]
    fn op_line_accessor() {
        assert_eq!(DiffOp::Equal("x".into()).line(), "x");
        assert_eq!(DiffOp::Insert("y".into()).line(), "y");
        assert_eq!(DiffOp::Delete("z".into()).line(), "z");
    }
}
