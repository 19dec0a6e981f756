//! The mailbox session engine.
//!
//! Coordinates the message source, the pagination index, and searches, and
//! reports everything it does through the event channel. The engine is
//! cheaply cloneable; all clones share one connection behind a lock that is
//! held for a single round trip at a time, so a long-running search and an
//! interactive page load interleave instead of queueing whole operations.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mailpane_imap::SeqId;
use tokio::sync::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::event::{Activity, EngineEvent, EventSender, PageView};
use crate::index::{DEFAULT_PAGE_SIZE, MailboxOrder, build_detail, build_summary};
use crate::search::{SearchSupervisor, run_search};
use crate::source::MessageSource;

/// Mailbox session engine over a message source.
pub struct Engine<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    source: Mutex<S>,
    order: RwLock<MailboxOrder>,
    page: AtomicUsize,
    page_size: usize,
    events: EventSender,
    searches: SearchSupervisor,
}

impl<S: MessageSource> Engine<S> {
    /// Creates an engine with the default page size.
    #[must_use]
    pub fn new(source: S, events: EventSender) -> Self {
        Self::with_page_size(source, events, DEFAULT_PAGE_SIZE)
    }

    /// Creates an engine with a custom page size (minimum 1).
    #[must_use]
    pub fn with_page_size(source: S, events: EventSender, page_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                source: Mutex::new(source),
                order: RwLock::new(MailboxOrder::default()),
                page: AtomicUsize::new(0),
                page_size: page_size.max(1),
                events,
                searches: SearchSupervisor::new(),
            }),
        }
    }

    /// Zero-based page currently shown.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.inner.page.load(Ordering::SeqCst)
    }

    /// Rebuilds the mailbox listing and shows the newest page.
    ///
    /// # Errors
    ///
    /// Propagates listing and transport failures; per-message fetch failures
    /// only drop the affected rows.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.events.emit(EngineEvent::Busy(Activity::LoadPage));
        let result = self.refresh_inner().await;
        self.inner.events.emit(EngineEvent::Idle(Activity::LoadPage));
        self.report(&result);
        result
    }

    async fn refresh_inner(&self) -> Result<()> {
        let ids = {
            let mut source = self.inner.source.lock().await;
            source.list_all().await?
        };

        // A rebuilt order invalidates any search still scanning the old one.
        let _ = self.inner.searches.begin();

        let order = MailboxOrder::from_server_order(ids, self.inner.page_size);
        self.inner.events.emit(EngineEvent::MailboxLoaded {
            total: order.len(),
            page_count: order.page_count(),
        });

        *self.inner.order.write().await = order;
        self.inner.page.store(0, Ordering::SeqCst);
        self.load_page(0).await
    }

    /// Shows a specific page (clamped to the valid range).
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn goto_page(&self, page: usize) -> Result<()> {
        self.show_page(page).await
    }

    /// Shows the next (older) page. Already on the last page is a no-op:
    /// nothing is fetched or emitted.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn next_page(&self) -> Result<()> {
        let current = self.current_page();
        let target = {
            let order = self.inner.order.read().await;
            order.clamp_page(current.saturating_add(1))
        };
        if target == current {
            return Ok(());
        }
        self.show_page(target).await
    }

    /// Shows the previous (newer) page. Already on the first page is a
    /// no-op: nothing is fetched or emitted.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn prev_page(&self) -> Result<()> {
        let current = self.current_page();
        if current == 0 {
            return Ok(());
        }
        self.show_page(current - 1).await
    }

    /// Re-renders the current page.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub async fn load_current_page(&self) -> Result<()> {
        self.show_page(self.current_page()).await
    }

    async fn show_page(&self, target: usize) -> Result<()> {
        self.inner.events.emit(EngineEvent::Busy(Activity::LoadPage));
        let result = async {
            let page = self.inner.order.read().await.clamp_page(target);
            self.inner.page.store(page, Ordering::SeqCst);
            self.load_page(page).await
        }
        .await;
        self.inner.events.emit(EngineEvent::Idle(Activity::LoadPage));
        self.report(&result);
        result
    }

    /// Fetches and emits the rows of one (already clamped) page.
    async fn load_page(&self, page: usize) -> Result<()> {
        let (ids, page_count) = {
            let order = self.inner.order.read().await;
            (order.page_ids(page).to_vec(), order.page_count())
        };

        let mut rows = Vec::with_capacity(ids.len());
        for id in ids {
            // Lock per fetch so a running search and a page load interleave
            // between round trips rather than queueing whole operations.
            let fetched = {
                let mut source = self.inner.source.lock().await;
                source.fetch_headers(id).await
            };
            match fetched {
                Ok(raw) => rows.push(build_summary(id, &raw)),
                Err(Error::Fetch { id, reason }) => {
                    tracing::warn!(id, %reason, "skipping unfetchable message");
                }
                Err(e) => return Err(e),
            }
        }

        self.inner.events.emit(EngineEvent::Page(PageView {
            page,
            page_count,
            rows,
        }));
        Ok(())
    }

    /// Fetches one full message and emits its detail view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the message cannot be retrieved.
    pub async fn open_detail(&self, id: SeqId) -> Result<()> {
        self.inner
            .events
            .emit(EngineEvent::Busy(Activity::OpenMessage));
        let result = async {
            let raw = {
                let mut source = self.inner.source.lock().await;
                source.fetch_full(id).await?
            };
            self.inner
                .events
                .emit(EngineEvent::Detail(build_detail(id, &raw)));
            Ok(())
        }
        .await;
        self.inner
            .events
            .emit(EngineEvent::Idle(Activity::OpenMessage));
        self.report(&result);
        result
    }

    /// Searches the whole mailbox for a query, newest first.
    ///
    /// Starting a search supersedes any search still running: the older one
    /// stops at its next message boundary and emits nothing. A blank query
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; unfetchable messages are skipped.
    pub async fn search(&self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            self.inner.events.status("Empty search query ignored");
            return Ok(());
        }

        // Issued before the first await so that a newer search invalidates
        // this one even while it is still waiting for the connection.
        let ticket = self.inner.searches.begin();

        self.inner.events.emit(EngineEvent::Busy(Activity::Search));
        let result = async {
            let ids = self.inner.order.read().await.ids().to_vec();
            let outcome = run_search(&self.inner.source, &ids, query, &ticket).await?;

            // A search that started after the final scan check would
            // otherwise see these stale results land behind its own.
            if let Some(matches) = outcome
                && ticket.is_current()
            {
                self.inner
                    .events
                    .status(format!("{} matches for \"{query}\"", matches.len()));
                self.inner
                    .events
                    .emit(EngineEvent::SearchFinished { matches });
            }
            Ok(())
        }
        .await;
        self.inner.events.emit(EngineEvent::Idle(Activity::Search));
        self.report(&result);
        result
    }

    /// Ends the session. Failures are absorbed; the session is over either
    /// way.
    pub async fn shutdown(&self) {
        let mut source = self.inner.source.lock().await;
        if let Err(e) = source.close().await {
            tracing::debug!(error = %e, "logout failed");
        }
        self.inner.events.status("Logged out");
    }

    fn report(&self, result: &Result<()>) {
        if let Err(e) = result {
            self.inner.events.status(e.to_string());
        }
    }
}
