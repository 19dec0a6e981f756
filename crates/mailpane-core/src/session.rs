//! Session establishment: resolve, connect, log in, select.

use std::time::Duration;

use mailpane_imap::{Client, Config};

use crate::error::{Error, Result};
use crate::event::{Activity, EngineEvent, EventSender};
use crate::settings::SettingsResolver;
use crate::source::ImapSource;

/// Parameters for opening a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mailbox to select after login.
    pub mailbox: String,
    /// Time allowed for connection establishment.
    pub connect_timeout: Duration,
    /// Time allowed for the LOGIN round trip.
    pub login_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mailbox: "INBOX".to_string(),
            connect_timeout: Duration::from_secs(30),
            login_timeout: Duration::from_secs(30),
        }
    }
}

/// Opens a session for the given address.
///
/// Emits busy/idle events around the whole login flow and a status line on
/// failure, so the surface never has to inspect the error to keep its
/// controls consistent.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] when the address's domain has no
/// provider entry, [`Error::Auth`] when the server rejects the credentials,
/// and [`Error::Transport`] / [`Error::Protocol`] for connection and server
/// faults.
pub async fn open(
    resolver: &SettingsResolver,
    email: &str,
    password: &str,
    config: &SessionConfig,
    events: &EventSender,
) -> Result<ImapSource> {
    events.emit(EngineEvent::Busy(Activity::Login));
    let result = open_inner(resolver, email, password, config, events).await;
    events.emit(EngineEvent::Idle(Activity::Login));

    if let Err(e) = &result {
        events.status(e.to_string());
    }
    result
}

async fn open_inner(
    resolver: &SettingsResolver,
    email: &str,
    password: &str,
    config: &SessionConfig,
    events: &EventSender,
) -> Result<ImapSource> {
    let account = resolver.resolve(email)?;
    tracing::info!(host = %account.host, port = account.port, "opening session");

    events.status(format!("Connecting to {}...", account.host));
    let mut imap_config = Config::new(account.host.clone(), account.port, account.security);
    imap_config.connect_timeout = config.connect_timeout;

    let stream = mailpane_imap::connect(&imap_config).await?;
    let client = Client::from_stream(stream).await?;

    events.status("Logging in...");
    let login = client.login(&account.login_name, password);
    let client = tokio::time::timeout(config.login_timeout, login)
        .await
        .map_err(|_| Error::Transport(format!("login timed out after {:?}", config.login_timeout)))?
        .map_err(|e| match e {
            mailpane_imap::Error::No(reason) => Error::Auth(reason),
            other => other.into(),
        })?;

    let (client, exists) = client.select(&config.mailbox).await?;
    tracing::info!(mailbox = %config.mailbox, exists, "mailbox selected");
    events.status(format!("{} selected, {exists} messages", config.mailbox));

    Ok(ImapSource::new(client))
}
