//! Implementation for the selected state.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::Selected;
use crate::command::Command;
use crate::response::{extract_fetch_payload, parse_search};
use crate::types::{FetchSpec, SeqId};
use crate::{Error, Result};

impl<S> Client<S, Selected>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Lists every message in the mailbox via `SEARCH ALL`.
    ///
    /// Identifiers are returned in server order (ascending arrival position).
    pub async fn search_all(&mut self) -> Result<Vec<SeqId>> {
        let tag = self.tag_gen.next();
        let cmd = Command::SearchAll.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let mut ids = Vec::new();

        for response in &responses {
            if let Some(found) = parse_search(response) {
                ids.extend(found);
            }
        }

        Self::check_tagged_ok(&responses, &tag)?;
        tracing::debug!(count = ids.len(), "mailbox listing complete");
        Ok(ids)
    }

    /// Fetches a section of a single message.
    ///
    /// Both fetch shapes use `BODY.PEEK`, so this never marks the message
    /// as seen. A message whose section is `NIL` or that the server declines
    /// to return yields a protocol error; callers treat per-message fetch
    /// failures as skippable.
    pub async fn fetch(&mut self, id: SeqId, spec: FetchSpec) -> Result<Vec<u8>> {
        let tag = self.tag_gen.next();
        let cmd = Command::Fetch { id, spec }.serialize(&tag);
        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let payload = responses.iter().find_map(|r| extract_fetch_payload(r));
        Self::check_tagged_ok(&responses, &tag)?;

        payload.ok_or_else(|| Error::Protocol(format!("no FETCH data for message {id}")))
    }
}
