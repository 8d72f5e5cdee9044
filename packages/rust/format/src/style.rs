//! Filename → comment-style mapping and the supported-extension set.

use std::path::Path;

/// File extensions accepted for upload (leading dot omitted).
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "md", "txt", "yaml", "yml", "json", "cpp", "go", "py", "html", "css", "js", "sh",
];

/// Extensionless base names accepted for upload.
const SUPPORTED_BASENAMES: &[&str] = &["dockerfile", "makefile"];

/// The header/footer token pair used to delimit a merged file's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Prefix-only comment: `PREFIX filename`.
    Line(&'static str),
    /// Delimited comment. `spaced` controls whether the filename gets
    /// surrounding spaces: `<!-- a.md -->` but `/*b.css*/`.
    Block {
        open: &'static str,
        close: &'static str,
        spaced: bool,
    },
}

impl CommentStyle {
    /// Render the header line for one merged file, including the blank
    /// line that separates it from the file body.
    ///
    /// The spacing asymmetry between styles is a fixed output contract:
    /// downstream consumers match on these exact header shapes.
    pub fn header(&self, filename: &str) -> String {
        match self {
            Self::Line(prefix) => format!("{prefix} {filename}\n\n"),
            Self::Block {
                open,
                close,
                spaced: true,
            } => format!("{open} {filename} {close}\n\n"),
            Self::Block {
                open,
                close,
                spaced: false,
            } => format!("{open}{filename}{close}\n\n"),
        }
    }
}

/// Pick the comment style for a filename.
///
/// Special-cased base names (`dockerfile`, `makefile`) win over the
/// extension table; unmapped extensions fall back to `#`.
pub fn style_for(filename: &str) -> CommentStyle {
    if is_special_basename(filename) {
        return CommentStyle::Line("#");
    }

    match extension_of(filename).as_deref() {
        Some("md") | Some("html") => CommentStyle::Block {
            open: "<!--",
            close: "-->",
            spaced: true,
        },
        Some("css") => CommentStyle::Block {
            open: "/*",
            close: "*/",
            spaced: false,
        },
        Some("js") | Some("go") | Some("cpp") | Some("java") | Some("json") => {
            CommentStyle::Line("//")
        }
        _ => CommentStyle::Line("#"),
    }
}

/// Whether a filename is accepted for upload at all.
pub fn is_supported(filename: &str) -> bool {
    match extension_of(filename).as_deref() {
        Some(ext) => SUPPORTED_EXTENSIONS.contains(&ext),
        None => is_special_basename(filename),
    }
}

/// Lower-cased extension without the dot, if any.
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn is_special_basename(filename: &str) -> bool {
    Path::new(filename)
        .file_name()
        .and_then(|b| b.to_str())
        .map(str::to_lowercase)
        .is_some_and(|base| SUPPORTED_BASENAMES.contains(&base.as_str()))
}
