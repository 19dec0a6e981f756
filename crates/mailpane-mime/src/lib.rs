//! # mailpane-mime
//!
//! MIME parsing and decoding for displaying mail: header parsing with
//! RFC 2047 encoded-word support, multipart body traversal, transfer
//! encoding and charset decoding, and Date header normalization.
//!
//! Everything here is lenient by construction. Mail on the wire is
//! frequently malformed, and a display pipeline must degrade to raw text
//! rather than refuse to render a message.
//!
//! ## Quick Start
//!
//! ```
//! use mailpane_mime::{Part, decode_header_text, normalize_date};
//!
//! let raw = b"From: =?UTF-8?B?QWxpY2U=?= <alice@example.com>\r\n\
//!             Subject: Hello\r\n\
//!             Date: Tue, 01 Jul 2025 10:52:37 +0200\r\n\
//!             Content-Type: text/plain\r\n\
//!             \r\n\
//!             Hi there";
//!
//! let message = Part::parse(raw);
//! let from = message.headers.get_decoded("from").unwrap_or_default();
//! assert_eq!(from, "Alice <alice@example.com>");
//!
//! let date = normalize_date(message.headers.get("date").unwrap_or(""));
//! assert_eq!(date, "2025-07-01 10:52");
//!
//! assert_eq!(message.plain_text().as_deref(), Some("Hi there"));
//! # let _ = decode_header_text("=?UTF-8?B?SGVsbG8=?=");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod date;
mod error;
mod header;
mod message;

pub mod encoding;

pub use content_type::ContentType;
pub use date::normalize_date;
pub use error::{Error, Result};
pub use header::{Headers, decode_header_text};
pub use message::{Body, Part, TransferEncoding};
