//! Implementation for the not-authenticated state.

use std::marker::PhantomData;

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, NotAuthenticated};
use crate::command::{Command, TagGenerator};
use crate::connection::framed::FramedStream;
use crate::{Error, Result};

impl<S> Client<S, NotAuthenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a client from a freshly established stream.
    ///
    /// Consumes the server greeting. A `* BYE` greeting means the server is
    /// refusing service; anything other than `* OK` is a protocol error.
    /// `* PREAUTH` is deliberately rejected since callers always log in with
    /// credentials.
    pub async fn from_stream(stream: S) -> Result<Self> {
        let mut framed = FramedStream::new(stream);
        let greeting = framed.read_response().await?;
        let text = String::from_utf8_lossy(&greeting);
        let text = text.trim_end();

        if let Some(rest) = text.strip_prefix("* BYE") {
            return Err(Error::Bye(rest.trim_start().to_string()));
        }
        if !text.starts_with("* OK") {
            return Err(Error::Protocol(format!("unexpected greeting: {text}")));
        }

        Ok(Self {
            stream: framed,
            tag_gen: TagGenerator::default(),
            _state: PhantomData,
        })
    }

    /// Authenticates with LOGIN, transitioning to the authenticated state.
    ///
    /// On failure the connection is consumed; callers reconnect to retry.
    pub async fn login(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<S, Authenticated>> {
        tracing::debug!(username, "logging in");

        let tag = self.tag_gen.next();
        let cmd = Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        }
        .serialize(&tag);

        self.stream.write_command(&cmd).await?;

        let responses = self.read_until_tagged(&tag).await?;
        Self::check_tagged_ok(&responses, &tag)?;

        Ok(self.transition())
    }
}
