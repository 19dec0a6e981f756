//! Newest-first pagination index over mailbox identifiers.

use mailpane_imap::SeqId;
use mailpane_mime::{Headers, Part, normalize_date};

/// Rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Placeholder shown when a header is absent.
const UNKNOWN_FIELD: &str = "(unknown)";

/// Decoded header row for the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSummary {
    /// Message identifier within the current selection.
    pub id: SeqId,
    /// Decoded sender.
    pub from: String,
    /// Decoded subject.
    pub subject: String,
    /// Normalized date.
    pub date: String,
}

/// Decoded full message for the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDetail {
    /// Message identifier within the current selection.
    pub id: SeqId,
    /// Decoded sender.
    pub from: String,
    /// Decoded subject.
    pub subject: String,
    /// Normalized date.
    pub date: String,
    /// Plain text body.
    pub body: String,
}

/// Newest-first ordering of the selected mailbox.
///
/// The server lists identifiers oldest-first; the index stores them reversed
/// so that page 0 always shows the most recent messages. The order is a pure
/// snapshot: it only changes when rebuilt from a fresh listing.
#[derive(Debug, Clone, Default)]
pub struct MailboxOrder {
    ids: Vec<SeqId>,
    page_size: usize,
}

impl MailboxOrder {
    /// Builds an index from identifiers in server order (oldest first).
    #[must_use]
    pub fn from_server_order(mut ids: Vec<SeqId>, page_size: usize) -> Self {
        ids.reverse();
        Self {
            ids,
            page_size: page_size.max(1),
        }
    }

    /// Total number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the mailbox is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All identifiers, newest first.
    #[must_use]
    pub fn ids(&self) -> &[SeqId] {
        &self.ids
    }

    /// Number of pages. An empty mailbox still has one (empty) page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.ids.len().div_ceil(self.page_size).max(1)
    }

    /// Clamps a requested page number to the valid range.
    #[must_use]
    pub fn clamp_page(&self, page: usize) -> usize {
        page.min(self.page_count() - 1)
    }

    /// Identifiers on the given page, newest first.
    ///
    /// Out-of-range pages are clamped to the last page rather than
    /// returning nothing.
    #[must_use]
    pub fn page_ids(&self, page: usize) -> &[SeqId] {
        let page = self.clamp_page(page);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(self.ids.len());
        self.ids.get(start..end).unwrap_or(&[])
    }
}

/// Builds a list row from raw header bytes.
///
/// Headers are decoded per RFC 2047 and the date is normalized. Missing
/// headers render as a placeholder instead of an empty cell.
#[must_use]
pub fn build_summary(id: SeqId, raw_headers: &[u8]) -> HeaderSummary {
    let headers = Headers::parse(&String::from_utf8_lossy(raw_headers));
    HeaderSummary {
        id,
        from: decoded_or_unknown(&headers, "from"),
        subject: decoded_or_unknown(&headers, "subject"),
        date: normalize_date(headers.get("date").unwrap_or("")),
    }
}

/// Builds a detail view from a raw full message.
///
/// The body is the first text/plain part of a multipart message, the sole
/// payload of a single-part one, or empty.
#[must_use]
pub fn build_detail(id: SeqId, raw_message: &[u8]) -> MessageDetail {
    let message = Part::parse(raw_message);
    let body = message.display_text();

    MessageDetail {
        id,
        from: decoded_or_unknown(&message.headers, "from"),
        subject: decoded_or_unknown(&message.headers, "subject"),
        date: normalize_date(message.headers.get("date").unwrap_or("")),
        body,
    }
}

fn decoded_or_unknown(headers: &Headers, name: &str) -> String {
    headers
        .get_decoded(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}
