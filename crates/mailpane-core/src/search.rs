//! Full-mailbox content search with supersession.
//!
//! A search walks every message, newest first, fetching and decoding each
//! one. That can take a long while, so each search carries a ticket from a
//! shared generation counter; starting a new search invalidates every older
//! ticket, and a superseded search stops at the next message boundary and
//! discards its partial results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use mailpane_imap::SeqId;
use mailpane_mime::{Part, normalize_date};
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::index::HeaderSummary;
use crate::source::MessageSource;

/// Issues search tickets and invalidates older ones.
#[derive(Debug, Clone, Default)]
pub struct SearchSupervisor {
    generation: Arc<AtomicU64>,
}

impl SearchSupervisor {
    /// Creates a supervisor with no searches issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search generation, invalidating all earlier tickets.
    #[must_use]
    pub fn begin(&self) -> SearchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            generation,
            counter: Arc::clone(&self.generation),
        }
    }
}

/// Permission to keep running one particular search.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl SearchTicket {
    /// Returns true while no newer search has started.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }
}

/// Runs a query over the given identifiers, newest first.
///
/// The source lock is taken and released per message, so page loads and
/// detail fetches interleave with a long scan at round-trip granularity
/// instead of waiting for the whole mailbox.
///
/// Returns `Ok(None)` if the ticket went stale mid-scan. Messages that fail
/// to fetch are skipped with a warning; transport failures abort the search.
///
/// # Errors
///
/// Propagates non-fetch errors from the source.
pub async fn run_search<S: MessageSource>(
    source: &Mutex<S>,
    ids: &[SeqId],
    query: &str,
    ticket: &SearchTicket,
) -> Result<Option<Vec<HeaderSummary>>> {
    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    for &id in ids {
        if !ticket.is_current() {
            tracing::debug!(query, "search superseded, stopping");
            return Ok(None);
        }

        let fetched = {
            let mut source = source.lock().await;
            source.fetch_full(id).await
        };
        let raw = match fetched {
            Ok(raw) => raw,
            Err(Error::Fetch { id, reason }) => {
                tracing::warn!(id, %reason, "skipping unfetchable message in search");
                continue;
            }
            Err(e) => return Err(e),
        };

        let message = Part::parse(&raw);
        let from = message.headers.get_decoded("from").unwrap_or_default();
        let subject = message.headers.get_decoded("subject").unwrap_or_default();
        let body = message.display_text();

        if contains_ignore_case(&from, &needle)
            || contains_ignore_case(&subject, &needle)
            || contains_ignore_case(&body, &needle)
        {
            matches.push(HeaderSummary {
                id,
                from,
                subject,
                date: normalize_date(message.headers.get("date").unwrap_or("")),
            });
        }
    }

    if ticket.is_current() {
        Ok(Some(matches))
    } else {
        Ok(None)
    }
}

/// Case-insensitive substring match; the needle is already lowercased.
fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
