//! Message source abstraction over the wire protocol.
//!
//! The engine talks to the mailbox through [`MessageSource`] so that
//! pagination and search logic can be driven by a scripted source in tests.
//! The one production implementation wraps the selected-state IMAP client.

use std::future::Future;

use mailpane_imap::client::Selected;
use mailpane_imap::{Client, FetchSpec, ImapStream, SeqId};

use crate::error::{Error, Result};

/// Operations the engine needs from a selected mailbox.
pub trait MessageSource: Send + 'static {
    /// Lists every message identifier in server order (oldest first).
    fn list_all(&mut self) -> impl Future<Output = Result<Vec<SeqId>>> + Send;

    /// Fetches the FROM, SUBJECT and DATE header fields of one message.
    fn fetch_headers(&mut self, id: SeqId) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Fetches one full raw message.
    fn fetch_full(&mut self, id: SeqId) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Ends the session. Further calls fail.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Production source backed by the IMAP client.
pub struct ImapSource {
    client: Option<Client<ImapStream, Selected>>,
}

impl ImapSource {
    /// Wraps a selected-state client.
    #[must_use]
    pub fn new(client: Client<ImapStream, Selected>) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn client(&mut self) -> Result<&mut Client<ImapStream, Selected>> {
        self.client
            .as_mut()
            .ok_or_else(|| Error::Transport("session already closed".to_string()))
    }
}

impl MessageSource for ImapSource {
    async fn list_all(&mut self) -> Result<Vec<SeqId>> {
        self.client()?.search_all().await.map_err(Into::into)
    }

    async fn fetch_headers(&mut self, id: SeqId) -> Result<Vec<u8>> {
        self.client()?
            .fetch(id, FetchSpec::Headers)
            .await
            .map_err(|e| fetch_error(id, &e))
    }

    async fn fetch_full(&mut self, id: SeqId) -> Result<Vec<u8>> {
        self.client()?
            .fetch(id, FetchSpec::Full)
            .await
            .map_err(|e| fetch_error(id, &e))
    }

    async fn close(&mut self) -> Result<()> {
        match self.client.take() {
            Some(client) => client.logout().await.map_err(Into::into),
            None => Ok(()),
        }
    }
}

/// Maps a per-message fetch failure.
///
/// `NO`, `BAD` and missing-data replies become the skippable
/// [`Error::Fetch`]; connection-level failures keep their transport
/// classification so callers abort instead of skipping the rest of a page.
fn fetch_error(id: SeqId, e: &mailpane_imap::Error) -> Error {
    use mailpane_imap::Error as Imap;
    match e {
        Imap::No(reason) | Imap::Bad(reason) | Imap::Protocol(reason) => Error::Fetch {
            id: id.get(),
            reason: reason.clone(),
        },
        other => Error::Transport(other.to_string()),
    }
}
