//! Implementation for the authenticated state.

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, Selected};
use crate::Result;
use crate::command::Command;
use crate::response::parse_exists;

impl<S> Client<S, Authenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Selects a mailbox, transitioning to the selected state.
    ///
    /// Returns the client along with the message count from the untagged
    /// `EXISTS` response (0 if the server omitted it).
    pub async fn select(mut self, mailbox: &str) -> Result<(Client<S, Selected>, u32)> {
        tracing::debug!(mailbox, "selecting mailbox");

        let tag = self.tag_gen.next();
        let cmd = Command::Select {
            mailbox: mailbox.to_string(),
        }
        .serialize(&tag);

        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        let exists = responses.iter().find_map(|r| parse_exists(r)).unwrap_or(0);
        Self::check_tagged_ok(&responses, &tag)?;

        Ok((self.transition(), exists))
    }
}
