//! MIME header handling.
//!
//! Header parsing with continuation-line unfolding, plus RFC 2047
//! encoded-word decoding for display text.

use std::collections::HashMap;

use crate::encoding::{decode_base64, decode_charset, decode_quoted_printable};

/// Collection of email headers.
///
/// Lookup is case-insensitive; names are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    headers: HashMap<String, Vec<String>>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        self.headers.entry(name).or_default().push(value.into());
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|v| v.first().map(String::as_str))
    }

    /// Gets the first value for a header with encoded words decoded.
    #[must_use]
    pub fn get_decoded(&self, name: &str) -> Option<String> {
        self.get(name).map(decode_header_text)
    }

    /// Parses headers from raw text.
    ///
    /// Continuation lines (leading space or tab) are unfolded into the
    /// preceding header. Lines without a colon are skipped; mail in the
    /// wild contains them and a bad line must not lose the rest.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut headers = Self::new();
        let mut current_name: Option<String> = None;
        let mut current_value = String::new();

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                if current_name.is_some() {
                    current_value.push(' ');
                    current_value.push_str(line.trim());
                }
            } else {
                if let Some(name) = current_name.take() {
                    headers.add(name, current_value.trim().to_string());
                    current_value.clear();
                }

                if let Some((name, value)) = line.split_once(':') {
                    current_name = Some(name.trim().to_string());
                    current_value = value.trim().to_string();
                }
            }
        }

        if let Some(name) = current_name {
            headers.add(name, current_value.trim().to_string());
        }

        headers
    }
}

/// Decodes RFC 2047 encoded words within a header value.
///
/// Encoded words (`=?charset?B|Q?text?=`) anywhere in the value are replaced
/// with their decoded text; surrounding plain text is kept. Whitespace
/// between two adjacent encoded words is deleted per RFC 2047 §6.2.
/// A word that fails to decode is left as raw text, so this never fails.
#[must_use]
pub fn decode_header_text(value: &str) -> String {
    let mut out = String::new();
    let mut rest = value;
    let mut last_was_encoded = false;

    while let Some(start) = rest.find("=?") {
        let before = &rest[..start];

        if let Some((decoded, consumed)) = parse_encoded_word(&rest[start..]) {
            let gap_is_fold = last_was_encoded
                && !before.is_empty()
                && before.chars().all(char::is_whitespace);
            if !gap_is_fold {
                out.push_str(before);
            }
            out.push_str(&decoded);
            last_was_encoded = true;
            rest = &rest[start + consumed..];
        } else {
            out.push_str(&rest[..start + 2]);
            last_was_encoded = false;
            rest = &rest[start + 2..];
        }
    }

    out.push_str(rest);
    out
}

/// Parses one encoded word at the start of the input.
///
/// Returns the decoded text and the number of bytes consumed, or `None`
/// if the input is not a well-formed encoded word.
fn parse_encoded_word(input: &str) -> Option<(String, usize)> {
    let inner = input.strip_prefix("=?")?;
    let charset_end = inner.find('?')?;
    let charset = &inner[..charset_end];

    let after_charset = &inner[charset_end + 1..];
    let enc_end = after_charset.find('?')?;
    let encoding = &after_charset[..enc_end];

    let after_enc = &after_charset[enc_end + 1..];
    let text_end = after_enc.find("?=")?;
    let text = &after_enc[..text_end];

    let bytes = match encoding {
        "B" | "b" => decode_base64(text).ok()?,
        "Q" | "q" => decode_quoted_printable(text.replace('_', " ").as_bytes()),
        _ => return None,
    };

    let consumed = 2 + charset_end + 1 + enc_end + 1 + text_end + 2;
    Some((decode_charset(&bytes, charset), consumed))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_and_lookup() {
        let text = concat!(
            "From: sender@example.com\r\n",
            "Subject: Test Message\r\n",
            "Content-Type: text/plain;\r\n",
            " charset=utf-8\r\n",
            "\r\n",
            "body is not parsed here\r\n"
        );

        let headers = Headers::parse(text);
        assert_eq!(headers.get("From"), Some("sender@example.com"));
        assert_eq!(headers.get("subject"), Some("Test Message"));
        assert_eq!(
            headers.get("Content-Type"),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(headers.get("X-Missing"), None);
    }

    #[test]
    fn parse_skips_junk_lines() {
        let headers = Headers::parse("garbage without colon\r\nSubject: ok\r\n");
        assert_eq!(headers.get("Subject"), Some("ok"));
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(decode_header_text("Weekly report"), "Weekly report");
    }

    #[test]
    fn base64_word() {
        assert_eq!(decode_header_text("=?UTF-8?B?SGVsbG8=?="), "Hello");
    }

    #[test]
    fn q_encoded_word_with_underscores() {
        assert_eq!(
            decode_header_text("=?utf-8?Q?H=C3=A9llo_World?="),
            "Héllo World"
        );
    }

    #[test]
    fn mixed_plain_and_encoded() {
        assert_eq!(
            decode_header_text("Re: =?UTF-8?B?SGVsbG8=?= there"),
            "Re: Hello there"
        );
    }

    #[test]
    fn whitespace_between_adjacent_words_is_deleted() {
        assert_eq!(
            decode_header_text("=?UTF-8?B?SGVs?= =?UTF-8?B?bG8=?="),
            "Hello"
        );
    }

    #[test]
    fn whitespace_before_plain_text_is_kept() {
        assert_eq!(
            decode_header_text("=?UTF-8?B?SGVsbG8=?= world"),
            "Hello world"
        );
    }

    #[test]
    fn latin1_charset() {
        // "caf=E9" in iso-8859-1
        assert_eq!(decode_header_text("=?iso-8859-1?Q?caf=E9?="), "café");
    }

    #[test]
    fn malformed_word_kept_raw() {
        assert_eq!(decode_header_text("=?UTF-8?X?bogus?="), "=?UTF-8?X?bogus?=");
        assert_eq!(decode_header_text("=?broken"), "=?broken");
    }

    #[test]
    fn decoded_subject_via_headers() {
        let headers = Headers::parse("Subject: =?UTF-8?B?SGVsbG8=?=\r\n");
        assert_eq!(headers.get_decoded("Subject").unwrap(), "Hello");
    }

    proptest! {
        #[test]
        fn decode_header_text_never_panics(s in "\\PC*") {
            let _ = decode_header_text(&s);
        }

        #[test]
        fn header_parse_never_panics(s in "\\PC*") {
            let _ = Headers::parse(&s);
        }
    }
}
