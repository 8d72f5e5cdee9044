//! Deterministic merge formatting.
//!
//! Joins an ordered list of files into one output: each file gets a
//! comment-style header derived from its name, bodies are separated by a
//! fixed two-blank-line gap. Same input, same bytes out — the formatter
//! performs no validation and no reordering.

pub mod style;

use tracing::debug;

use codemerge_shared::MergeItem;

pub use style::{CommentStyle, is_supported, style_for};

/// Separator emitted between consecutive files (two blank lines).
const FILE_SEPARATOR: &str = "\n\n\n";

/// Concatenate files in input order with per-file headers.
///
/// Each item contributes `header + content`; every item except the last is
/// followed by [`FILE_SEPARATOR`]. An empty input produces an empty string.
/// Inputs are assumed to be already normalized and validated upstream.
pub fn merge(items: &[MergeItem]) -> String {
    let capacity: usize = items
        .iter()
        .map(|i| i.filename.len() + i.content.len() + 16)
        .sum();
    let mut out = String::with_capacity(capacity);

    for (i, item) in items.iter().enumerate() {
        out.push_str(&style_for(&item.filename).header(&item.filename));
        out.push_str(&item.content);
        if i + 1 < items.len() {
            out.push_str(FILE_SEPARATOR);
        }
    }

    debug!(files = items.len(), bytes = out.len(), "merged output built");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(filename: &str, content: &str) -> MergeItem {
        MergeItem {
            filename: filename.into(),
            content: content.into(),
        }
    }

    #[test]
    fn merge_empty_is_empty() {
        assert_eq!(merge(&[]), "");
    }

    #[test]
    fn merge_single_has_no_trailing_separator() {
        let out = merge(&[item("main.go", "package main\n")]);
        assert_eq!(out, "// main.go\n\npackage main\n");
    }

    #[test]
    fn merge_two_files_exact_bytes() {
        let out = merge(&[item("a.md", "X"), item("b.css", "Y")]);
        assert_eq!(out, "<!-- a.md -->\n\nX\n\n\n/*b.css*/\n\nY");
    }

    #[test]
    fn merge_preserves_input_order() {
        let out = merge(&[
            item("z.txt", "last alphabetically"),
            item("a.txt", "first alphabetically"),
        ]);
        let z_pos = out.find("z.txt").unwrap();
        let a_pos = out.find("a.txt").unwrap();
        assert!(z_pos < a_pos);
    }

    #[test]
    fn merge_is_deterministic() {
        let items = [
            item("Dockerfile", "FROM scratch\n"),
            item("setup.py", "import os\n"),
            item("index.html", "<html></html>"),
        ];
        assert_eq!(merge(&items), merge(&items));
    }

    #[test]
    fn merge_mixed_styles() {
        let out = merge(&[
            item("Makefile", "all:\n\ttrue"),
            item("style.css", "body{}"),
        ]);
        assert_eq!(out, "# Makefile\n\nall:\n\ttrue\n\n\n/*style.css*/\n\nbody{}");
    }
}
