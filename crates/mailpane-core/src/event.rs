//! Events emitted toward the presentation layer.
//!
//! The engine never draws anything; it reports what it is doing through an
//! unbounded channel and the surface renders from that. Busy/idle pairs
//! bracket every long-running activity so the surface can disable inputs
//! while work is in flight.

use tokio::sync::mpsc;

use crate::index::{HeaderSummary, MessageDetail};

/// A long-running engine activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Connecting, logging in and selecting the mailbox.
    Login,
    /// Listing the mailbox or loading a page of headers.
    LoadPage,
    /// Fetching one full message.
    OpenMessage,
    /// Scanning the whole mailbox for a query.
    Search,
}

/// One page of the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Zero-based page number.
    pub page: usize,
    /// Total page count.
    pub page_count: usize,
    /// Rows on this page, newest first.
    pub rows: Vec<HeaderSummary>,
}

/// Events from the engine to the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// An activity started.
    Busy(Activity),
    /// An activity finished (successfully or not).
    Idle(Activity),
    /// The mailbox listing was (re)built.
    MailboxLoaded {
        /// Total messages in the mailbox.
        total: usize,
        /// Total page count.
        page_count: usize,
    },
    /// A page of the message list is ready.
    Page(PageView),
    /// A full message is ready.
    Detail(MessageDetail),
    /// A search ran to completion without being superseded.
    SearchFinished {
        /// Matching rows, newest first.
        matches: Vec<HeaderSummary>,
    },
    /// Human-readable status text (progress or error).
    Status(String),
}

/// Sending half of the event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EventSender {
    /// Emits one event. A disconnected surface is not an error; the engine
    /// keeps working and the event is dropped.
    pub fn emit(&self, event: EngineEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("event dropped, surface disconnected");
        }
    }

    /// Emits a status line.
    pub fn status(&self, text: impl Into<String>) {
        self.emit(EngineEvent::Status(text.into()));
    }
}

/// Creates the event channel between engine and surface.
#[must_use]
pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<EngineEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (tx, mut rx) = event_channel();
        tx.emit(EngineEvent::Busy(Activity::Login));
        tx.status("connecting");
        tx.emit(EngineEvent::Idle(Activity::Login));

        assert_eq!(rx.recv().await.unwrap(), EngineEvent::Busy(Activity::Login));
        assert_eq!(
            rx.recv().await.unwrap(),
            EngineEvent::Status("connecting".into())
        );
        assert_eq!(rx.recv().await.unwrap(), EngineEvent::Idle(Activity::Login));
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic() {
        let (tx, rx) = event_channel();
        drop(rx);
        tx.status("nobody listening");
    }
}
