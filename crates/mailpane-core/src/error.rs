//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No provider settings cover the given mail domain.
    #[error("No provider settings for domain: {0}")]
    ConfigNotFound(String),

    /// Provider settings are present but unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connecting to or talking with the server failed.
    #[error("Connection failed: {0}")]
    Transport(String),

    /// The server rejected the credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The server sent something the engine could not work with.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A single message could not be fetched.
    ///
    /// This is the only recoverable failure in the engine: a bad message is
    /// skipped, it never aborts the page or search that asked for it.
    #[error("Fetch failed for message {id}: {reason}")]
    Fetch {
        /// Sequence number of the message.
        id: u32,
        /// Server-reported reason.
        reason: String,
    },

    /// Reading the settings file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("Settings parse error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<mailpane_imap::Error> for Error {
    /// Default classification for protocol-layer failures.
    ///
    /// Login code maps `NO` to [`Error::Auth`] itself and per-message fetch
    /// failures become [`Error::Fetch`] at the source layer; everything that
    /// reaches this impl is either a transport fault or a server reply the
    /// engine cannot interpret.
    fn from(e: mailpane_imap::Error) -> Self {
        use mailpane_imap::Error as Imap;
        match e {
            Imap::Io(_) | Imap::Tls(_) | Imap::InvalidDnsName(_) | Imap::Timeout(_) => {
                Self::Transport(e.to_string())
            }
            Imap::Bye(text) => Self::Transport(format!("server closed the session: {text}")),
            Imap::No(text) | Imap::Bad(text) | Imap::Protocol(text) => Self::Protocol(text),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
