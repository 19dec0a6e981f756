//! MIME message structure and parsing.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64, decode_charset, decode_quoted_printable};
use crate::header::Headers;

/// Recursion limit for nested multiparts. Anything deeper is treated as an
/// opaque leaf rather than recursed into.
const MAX_DEPTH: usize = 16;

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit binary.
    EightBit,
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
    /// Binary (no encoding).
    Binary,
}

impl TransferEncoding {
    /// Parses transfer encoding from string. Unknown values map to 7bit.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "8bit" => Self::EightBit,
            "base64" => Self::Base64,
            "quoted-printable" => Self::QuotedPrintable,
            "binary" => Self::Binary,
            _ => Self::SevenBit,
        }
    }
}

/// Body of a MIME part.
///
/// A part is either a leaf carrying raw (still transfer-encoded) bytes, or
/// a container of sub-parts. The variant is decided by the part's own
/// Content-Type, never by inspecting the payload.
#[derive(Debug, Clone)]
pub enum Body {
    /// Raw leaf content.
    Leaf(Vec<u8>),
    /// Nested sub-parts of a multipart container.
    Multipart(Vec<Part>),
}

/// A parsed MIME part (the whole message is the root part).
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body.
    pub body: Body,
}

impl Part {
    /// Parses a raw message (or part) into its MIME structure.
    ///
    /// Parsing is total: malformed input degrades to a leaf holding the raw
    /// bytes rather than failing. A multipart whose boundary never matches
    /// becomes a leaf of its own body.
    #[must_use]
    pub fn parse(raw: &[u8]) -> Self {
        Self::parse_at_depth(raw, 0)
    }

    fn parse_at_depth(raw: &[u8], depth: usize) -> Self {
        let (header_block, body) = split_header_body(raw);
        let headers = Headers::parse(&String::from_utf8_lossy(header_block));

        let content_type = content_type_of(&headers);
        if depth < MAX_DEPTH
            && content_type.is_multipart()
            && let Some(boundary) = content_type.boundary()
        {
            let chunks = split_multipart(body, boundary);
            if !chunks.is_empty() {
                let parts = chunks
                    .into_iter()
                    .map(|chunk| Self::parse_at_depth(chunk, depth + 1))
                    .collect();
                return Self {
                    headers,
                    body: Body::Multipart(parts),
                };
            }
        }

        Self {
            headers,
            body: Body::Leaf(body.to_vec()),
        }
    }

    /// Gets the content type, defaulting to text/plain when absent or
    /// malformed.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        content_type_of(&self.headers)
    }

    /// Gets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.headers
            .get("content-transfer-encoding")
            .map_or(TransferEncoding::SevenBit, TransferEncoding::parse)
    }

    /// Decodes a leaf body according to its transfer encoding.
    ///
    /// Returns `None` for multipart containers. Base64 that fails to decode
    /// falls back to the raw bytes.
    #[must_use]
    pub fn decode_body(&self) -> Option<Vec<u8>> {
        let Body::Leaf(bytes) = &self.body else {
            return None;
        };

        let decoded = match self.transfer_encoding() {
            TransferEncoding::Base64 => decode_base64(&String::from_utf8_lossy(bytes))
                .unwrap_or_else(|_| bytes.clone()),
            TransferEncoding::QuotedPrintable => decode_quoted_printable(bytes),
            _ => bytes.clone(),
        };

        Some(decoded)
    }

    /// Finds the first text/plain leaf, depth-first, and returns its decoded
    /// text.
    ///
    /// This matches reader behavior: in a multipart/alternative the plain
    /// variant wins, and in nested structures the first plain leaf in
    /// document order is shown.
    #[must_use]
    pub fn plain_text(&self) -> Option<String> {
        match &self.body {
            Body::Leaf(_) => {
                let ct = self.content_type();
                if !ct.is_text_plain() {
                    return None;
                }
                let decoded = self.decode_body()?;
                let charset = ct.charset().unwrap_or("utf-8").to_string();
                Some(decode_charset(&decoded, &charset))
            }
            Body::Multipart(parts) => parts.iter().find_map(Self::plain_text),
        }
    }

    /// Returns the message's displayable body text.
    ///
    /// A non-multipart message yields its sole payload whatever its content
    /// type; a multipart message yields its first text/plain leaf, or the
    /// empty string when it has none.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.body {
            Body::Leaf(_) => {
                let decoded = self.decode_body().unwrap_or_default();
                let charset = self.content_type().charset().unwrap_or("utf-8").to_string();
                decode_charset(&decoded, &charset)
            }
            Body::Multipart(_) => self.plain_text().unwrap_or_default(),
        }
    }
}

fn content_type_of(headers: &Headers) -> ContentType {
    headers
        .get("content-type")
        .and_then(|value| ContentType::parse(value).ok())
        .unwrap_or_else(ContentType::text_plain)
}

/// Splits raw bytes at the first blank line into header block and body.
fn split_header_body(raw: &[u8]) -> (&[u8], &[u8]) {
    if let Some(pos) = find_subslice(raw, b"\r\n\r\n") {
        (&raw[..pos], &raw[pos + 4..])
    } else if let Some(pos) = find_subslice(raw, b"\n\n") {
        (&raw[..pos], &raw[pos + 2..])
    } else {
        (raw, &[])
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits a multipart body on its boundary into raw part chunks.
///
/// The preamble (before the first delimiter) and epilogue (after the
/// closing delimiter) are discarded.
fn split_multipart<'a>(body: &'a [u8], boundary: &str) -> Vec<&'a [u8]> {
    let delim = format!("--{boundary}");
    let mut parts = Vec::new();
    let mut current_start: Option<usize> = None;
    let mut pos = 0;

    while pos < body.len() {
        let line_end = body[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(body.len(), |i| pos + i + 1);

        let line = String::from_utf8_lossy(&body[pos..line_end]);
        let line = line.trim_end();

        let is_delimiter = line
            .strip_prefix(delim.as_str())
            .is_some_and(|rest| rest.is_empty() || rest == "--");

        if is_delimiter {
            if let Some(start) = current_start.take() {
                parts.push(trim_trailing_newline(&body[start..pos]));
            }
            if line.ends_with("--") {
                return parts;
            }
            current_start = Some(line_end);
        }

        pos = line_end;
    }

    // Missing closing delimiter: take what we have.
    if let Some(start) = current_start {
        parts.push(trim_trailing_newline(&body[start..]));
    }
    parts
}

fn trim_trailing_newline(chunk: &[u8]) -> &[u8] {
    chunk
        .strip_suffix(b"\r\n")
        .or_else(|| chunk.strip_suffix(b"\n"))
        .unwrap_or(chunk)
}
