//! Text-vs-binary validation for normalized content.

/// Control characters tolerated inside text content.
const ALLOWED_CONTROLS: [char; 4] = ['\t', '\n', '\r', '\u{0C}'];

/// Decide whether normalized content can be treated as text.
///
/// A character passes if it is not a control character, is whitespace, or
/// is a control on the explicit allow-list (tab, line feed, carriage
/// return, form feed). Any other control — an embedded NUL in particular —
/// marks the content as binary.
///
/// This runs strictly on normalized `&str`, never on raw bytes: before
/// decoding there is no meaningful per-character view to check.
pub fn is_text(content: &str) -> bool {
    content
        .chars()
        .all(|c| !c.is_control() || c.is_whitespace() || ALLOWED_CONTROLS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_accepted() {
        assert!(is_text("fn main() {}\n"));
        assert!(is_text("строка текста"));
        assert!(is_text(""));
    }

    #[test]
    fn allowed_controls_accepted() {
        assert!(is_text("col1\tcol2\r\nrow2\u{0C}page2"));
    }

    #[test]
    fn nul_byte_rejected() {
        assert!(!is_text("before\0after"));
        assert!(!is_text("\0"));
    }

    #[test]
    fn stray_controls_rejected() {
        assert!(!is_text("bell\u{07}"));
        assert!(!is_text("escape\u{1B}[0m"));
        assert!(!is_text("backspace\u{08}"));
        // Non-whitespace C1 range counts too.
        assert!(!is_text("c1\u{9D}"));
    }

    #[test]
    fn whitespace_controls_accepted() {
        // NEL (U+0085) is a control but also Unicode whitespace.
        assert!(is_text("line one\u{85}line two"));
    }
}
