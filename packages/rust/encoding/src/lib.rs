//! Encoding normalization for uploaded byte streams.
//!
//! Uploads arrive as raw bytes in whatever encoding the client's editor
//! produced. [`normalize`] converts them to UTF-8: valid UTF-8 passes
//! through unchanged, anything else is run through a fixed list of legacy
//! decodings. [`validate::is_text`] then decides whether the normalized
//! text is acceptable at all.

pub mod validate;

use encoding_rs::{Encoding, ISO_8859_5, KOI8_R, UTF_16BE, UTF_16LE, WINDOWS_1251, WINDOWS_1252};
use tracing::debug;

use codemerge_shared::{CodeMergeError, Result};

pub use validate::is_text;

/// Candidate decodings tried, in order, when input is not already UTF-8.
///
/// UTF-16 variants must come before the single-byte code pages: a
/// single-byte decoder maps nearly every byte to *something*, so trying
/// it first would mask a correct multi-byte interpretation. ISO-8859-1
/// is carried by windows-1252 — the WHATWG encoding standard folds that
/// label into windows-1252.
fn legacy_encodings() -> [&'static Encoding; 6] {
    [
        UTF_16LE,
        UTF_16BE,
        WINDOWS_1251,
        WINDOWS_1252,
        ISO_8859_5,
        KOI8_R,
    ]
}

/// Convert raw bytes to UTF-8 text.
///
/// Already-valid UTF-8 is returned unchanged (the common case). Otherwise
/// each legacy encoding is attempted in order and the first clean decode
/// wins. Returns [`CodeMergeError::EncodingUnrecognized`] if no candidate
/// decodes without errors — a wrong guess is never silently accepted.
pub fn normalize(bytes: &[u8]) -> Result<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_owned());
    }

    for encoding in legacy_encodings() {
        let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
        if !had_errors {
            debug!(encoding = encoding.name(), len = bytes.len(), "decoded legacy input");
            return Ok(text.into_owned());
        }
    }

    Err(CodeMergeError::EncodingUnrecognized)
}
