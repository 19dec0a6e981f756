//! MIME decoding utilities.
//!
//! Base64 and Quoted-Printable body decoding plus charset conversion.
//! Header text on the wire is hostile; everything here is lenient and
//! total: malformed input degrades to the raw bytes rather than failing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::{Encoding, UTF_8};

use crate::error::Result;

/// Decodes Base64 data, ignoring embedded whitespace.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(cleaned).map_err(Into::into)
}

/// Decodes Quoted-Printable bytes (RFC 2045), leniently.
///
/// Soft line breaks (`=\r\n` or `=\n`) are removed. A malformed escape
/// (`=` not followed by two hex digits) is passed through literally instead
/// of aborting, since real mail contains plenty of them.
#[must_use]
pub fn decode_quoted_printable(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let b = data[i];
        if b != b'=' {
            out.push(b);
            i += 1;
            continue;
        }

        // Soft line break.
        if data.get(i + 1) == Some(&b'\r') && data.get(i + 2) == Some(&b'\n') {
            i += 3;
            continue;
        }
        if data.get(i + 1) == Some(&b'\n') {
            i += 2;
            continue;
        }

        // Hex escape.
        if let (Some(&hi), Some(&lo)) = (data.get(i + 1), data.get(i + 2))
            && let (Some(hi), Some(lo)) = (hex_value(hi), hex_value(lo))
        {
            out.push(hi << 4 | lo);
            i += 3;
            continue;
        }

        // Malformed escape, keep the '=' as-is.
        out.push(b'=');
        i += 1;
    }

    out
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Converts bytes to a string using the named charset.
///
/// Unknown charset labels fall back to UTF-8; undecodable sequences become
/// replacement characters. This never fails, matching how mail readers must
/// treat charset declarations they cannot honor.
#[must_use]
pub fn decode_charset(bytes: &[u8], charset: &str) -> String {
    let encoding = Encoding::for_label(charset.as_bytes()).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base64_with_line_breaks() {
        let decoded = decode_base64("SGVsbG8s\r\nIFdvcmxkIQ==").unwrap();
        assert_eq!(decoded, b"Hello, World!");
    }

    #[test]
    fn base64_invalid_is_an_error() {
        assert!(decode_base64("not base64!!!").is_err());
    }

    #[test]
    fn quoted_printable_plain_passthrough() {
        assert_eq!(decode_quoted_printable(b"Hello, World!"), b"Hello, World!");
    }

    #[test]
    fn quoted_printable_hex_escapes() {
        assert_eq!(decode_quoted_printable(b"H=C3=A9llo"), "Héllo".as_bytes());
        assert_eq!(decode_quoted_printable(b"a=3Db"), b"a=b");
    }

    #[test]
    fn quoted_printable_soft_line_breaks() {
        assert_eq!(decode_quoted_printable(b"Hello=\r\nWorld"), b"HelloWorld");
        assert_eq!(decode_quoted_printable(b"Hello=\nWorld"), b"HelloWorld");
    }

    #[test]
    fn quoted_printable_malformed_escape_kept_literal() {
        assert_eq!(decode_quoted_printable(b"100=zz"), b"100=zz");
        assert_eq!(decode_quoted_printable(b"trailing="), b"trailing=");
    }

    #[test]
    fn charset_known_labels() {
        assert_eq!(decode_charset("Héllo".as_bytes(), "utf-8"), "Héllo");
        assert_eq!(decode_charset(&[0x48, 0xE9], "iso-8859-1"), "Hé");
    }

    #[test]
    fn charset_unknown_label_falls_back_to_utf8() {
        assert_eq!(decode_charset(b"plain", "x-no-such-charset"), "plain");
    }

    #[test]
    fn charset_invalid_utf8_is_lossy() {
        let text = decode_charset(&[0x48, 0xFF, 0x49], "utf-8");
        assert!(text.starts_with('H'));
        assert!(text.ends_with('I'));
        assert!(text.contains('\u{FFFD}'));
    }
}
