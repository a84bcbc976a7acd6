//! LCS-based line diff.

use crate::model::{DiffLine, DiffStats, LineKind};

/// Split a text buffer into lines on `\n`.
///
/// An absent or empty buffer has zero lines. Any other text keeps every
/// segment, so `"a\n"` yields `["a", ""]`.
pub fn split_lines(text: Option<&str>) -> Vec<&str> {
    match text {
        None | Some("") => Vec::new(),
        Some(text) => text.split('\n').collect(),
    }
}

/// Compute the ordered line diff from `original` to `modified`.
///
/// Equal lines at both cursors are emitted as unchanged. Otherwise an
/// insertion is preferred whenever skipping the modified line keeps at least
/// as long a common subsequence as skipping the original line, which groups
/// pure insertions and pure deletions instead of interleaving them.
pub fn diff_lines(original: Option<&str>, modified: Option<&str>) -> Vec<DiffLine> {
    let old = split_lines(original);
    let new = split_lines(modified);

    // Equal lines at the cursors are always consumed together, so a shared
    // prefix can be emitted before the table is built.
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = Vec::with_capacity(old.len().max(new.len()));
    for (idx, line) in old[..prefix].iter().enumerate() {
        out.push(DiffLine::unchanged(*line, idx + 1, idx + 1));
    }

    let a = &old[prefix..];
    let b = &new[prefix..];
    let table = LcsTable::build(a, b);
    let (m, n) = (a.len(), b.len());
    let (mut i, mut j) = (0, 0);

    while i < m || j < n {
        if i < m && j < n && a[i] == b[j] {
            out.push(DiffLine::unchanged(a[i], prefix + i + 1, prefix + j + 1));
            i += 1;
            j += 1;
        } else if j < n && (i == m || table.get(i, j + 1) >= table.get(i + 1, j)) {
            out.push(DiffLine::added(b[j], prefix + j + 1));
            j += 1;
        } else {
            out.push(DiffLine::removed(a[i], prefix + i + 1));
            i += 1;
        }
    }

    log::trace!(
        "diffed {} original / {} modified lines ({} shared prefix): {:?}",
        old.len(),
        new.len(),
        prefix,
        DiffStats::from_lines(&out)
    );
    out
}

/// Whether the diff contains at least one added or removed line.
pub fn has_changes(lines: &[DiffLine]) -> bool {
    lines.iter().any(|l| l.kind != LineKind::Unchanged)
}

/// Whether the "analyze" action should be enabled for a compare buffer.
///
/// Requires a non-blank compare buffer and at least one changed line.
pub fn can_analyze(compare_buffer: &str, lines: &[DiffLine]) -> bool {
    !compare_buffer.trim().is_empty() && has_changes(lines)
}

/// Rebuild the original text from a diff.
pub fn original_text(lines: &[DiffLine]) -> String {
    join(lines.iter().filter(|l| l.in_original()))
}

/// Rebuild the modified text from a diff.
pub fn modified_text(lines: &[DiffLine]) -> String {
    join(lines.iter().filter(|l| l.in_modified()))
}

fn join<'a>(lines: impl Iterator<Item = &'a DiffLine>) -> String {
    lines.map(|l| l.text.as_str()).collect::<Vec<_>>().join("\n")
}

/// Suffix LCS lengths: `get(i, j)` is the LCS of `a[i..]` and `b[j..]`.
struct LcsTable {
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(a: &[&str], b: &[&str]) -> Self {
        let cols = b.len() + 1;
        let mut cells = vec![0u32; (a.len() + 1) * cols];
        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                cells[i * cols + j] = if a[i] == b[j] {
                    1 + cells[(i + 1) * cols + j + 1]
                } else {
                    cells[(i + 1) * cols + j].max(cells[i * cols + j + 1])
                };
            }
        }
        Self { cols, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shape(lines: &[DiffLine]) -> Vec<(LineKind, &str)> {
        lines.iter().map(|l| (l.kind, l.text.as_str())).collect()
    }

    #[test]
    fn test_insertion_in_the_middle() {
        let lines = diff_lines(Some("a\nb\nc"), Some("a\nb\nX\nc"));
        assert_eq!(
            shape(&lines),
            vec![
                (LineKind::Unchanged, "a"),
                (LineKind::Unchanged, "b"),
                (LineKind::Added, "X"),
                (LineKind::Unchanged, "c"),
            ]
        );
    }

    #[test]
    fn test_removal_in_the_middle() {
        let lines = diff_lines(Some("1\n2\n3"), Some("1\n3"));
        assert_eq!(
            shape(&lines),
            vec![
                (LineKind::Unchanged, "1"),
                (LineKind::Removed, "2"),
                (LineKind::Unchanged, "3"),
            ]
        );
    }

    #[test]
    fn test_replacement_surfaces_insertion_first() {
        let lines = diff_lines(Some("a"), Some("b"));
        assert_eq!(
            shape(&lines),
            vec![(LineKind::Added, "b"), (LineKind::Removed, "a")]
        );
    }

    #[test]
    fn test_line_numbers() {
        let lines = diff_lines(Some("a\nb\nc"), Some("a\nX\nc"));
        assert_eq!(lines[0], DiffLine::unchanged("a", 1, 1));
        assert_eq!(lines[1], DiffLine::added("X", 2));
        assert_eq!(lines[2], DiffLine::removed("b", 2));
        assert_eq!(lines[3], DiffLine::unchanged("c", 3, 3));
    }

    #[test]
    fn test_empty_inputs_have_no_lines() {
        assert!(diff_lines(Some(""), Some("")).is_empty());
        assert!(diff_lines(None, None).is_empty());
        assert!(diff_lines(None, Some("")).is_empty());
    }

    #[test]
    fn test_one_side_empty() {
        let lines = diff_lines(None, Some("x\ny"));
        assert_eq!(
            shape(&lines),
            vec![(LineKind::Added, "x"), (LineKind::Added, "y")]
        );

        let lines = diff_lines(Some("x\ny"), Some(""));
        assert_eq!(
            shape(&lines),
            vec![(LineKind::Removed, "x"), (LineKind::Removed, "y")]
        );
    }

    #[test]
    fn test_trailing_newline_is_a_line() {
        let lines = diff_lines(Some("a"), Some("a\n"));
        assert_eq!(
            shape(&lines),
            vec![(LineKind::Unchanged, "a"), (LineKind::Added, "")]
        );
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines(None).is_empty());
        assert!(split_lines(Some("")).is_empty());
        assert_eq!(split_lines(Some("a\n\nb")), vec!["a", "", "b"]);
    }

    #[test]
    fn test_can_analyze() {
        let changed = diff_lines(Some("a"), Some("a\nb"));
        assert!(can_analyze("a\nb", &changed));

        let same = diff_lines(Some("a"), Some("a"));
        assert!(!can_analyze("a", &same));

        let cleared = diff_lines(Some("a"), Some("   "));
        assert!(has_changes(&cleared));
        assert!(!can_analyze("   ", &cleared));
    }

    #[test]
    fn test_reconstruction() {
        let original = "fn main() {\n    run();\n}\n";
        let modified = "fn main() {\n    setup();\n    run();\n}\n";
        let lines = diff_lines(Some(original), Some(modified));
        assert_eq!(original_text(&lines), original);
        assert_eq!(modified_text(&lines), modified);
    }
}
