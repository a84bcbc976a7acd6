//! Diff data structures for the compare view.

use serde::Serialize;

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content, without the trailing newline.
    pub text: String,
    /// 1-based line number in the original text (for Unchanged and Removed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<usize>,
    /// 1-based line number in the modified text (for Unchanged and Added).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<usize>,
}

impl DiffLine {
    /// Create a line present in both texts.
    pub fn unchanged(text: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: LineKind::Unchanged,
            text: text.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a line only present in the modified text.
    pub fn added(text: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: LineKind::Added,
            text: text.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a line only present in the original text.
    pub fn removed(text: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: LineKind::Removed,
            text: text.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// Get the line number to display (prefers new_line, falls back to old_line).
    pub fn display_line_number(&self) -> Option<usize> {
        self.new_line.or(self.old_line)
    }

    /// Whether this line belongs to the original text.
    pub fn in_original(&self) -> bool {
        self.kind != LineKind::Added
    }

    /// Whether this line belongs to the modified text.
    pub fn in_modified(&self) -> bool {
        self.kind != LineKind::Removed
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    /// Line present in both texts.
    Unchanged,
    /// Line only in the modified text (+).
    Added,
    /// Line only in the original text (-).
    Removed,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Unchanged => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
        }
    }
}

/// Per-kind line counts of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    /// Count lines per kind.
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line.kind {
                LineKind::Added => stats.added += 1,
                LineKind::Removed => stats.removed += 1,
                LineKind::Unchanged => stats.unchanged += 1,
            }
            stats
        })
    }

    /// Whether any line was added or removed.
    pub fn has_changes(&self) -> bool {
        self.added + self.removed > 0
    }
}
