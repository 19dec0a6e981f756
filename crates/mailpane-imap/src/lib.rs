//! # mailpane-imap
//!
//! A small async IMAP client library covering the commands a mailbox session
//! engine needs: LOGIN, SELECT, SEARCH ALL, single-message FETCH, NOOP and
//! LOGOUT.
//!
//! ## Features
//!
//! - **Type-state connection management**: compile-time enforcement of valid
//!   state transitions (`NotAuthenticated` → `Authenticated` → `Selected`)
//! - **TLS via rustls**: secure connections without an OpenSSL dependency
//! - **Literal-aware framing**: `{n}\r\n` literals are inlined transparently
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailpane_imap::{Client, Config, FetchSpec, Security};
//!
//! #[tokio::main]
//! async fn main() -> mailpane_imap::Result<()> {
//!     let config = Config::new("imap.example.com", 993, Security::Tls);
//!     let stream = mailpane_imap::connection::connect(&config).await?;
//!
//!     let client = Client::from_stream(stream).await?;
//!     let client = client.login("user@example.com", "password").await?;
//!     let (mut client, exists) = client.select("INBOX").await?;
//!     println!("Messages: {exists}");
//!
//!     let ids = client.search_all().await?;
//!     if let Some(&newest) = ids.last() {
//!         let headers = client.fetch(newest, FetchSpec::Headers).await?;
//!         println!("{}", String::from_utf8_lossy(&headers));
//!     }
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`]: type-state client connection
//! - [`command`]: command builders and the tag generator
//! - [`connection`]: transport streams, framing, and configuration
//! - [`response`]: minimal response parsing
//! - [`types`]: core protocol types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod command;
pub mod connection;
mod error;
pub mod response;
pub mod types;

pub use client::{Authenticated, Client, NotAuthenticated, Selected};
pub use command::{Command, TagGenerator};
pub use connection::{Config, FramedStream, ImapStream, Security, connect};
pub use error::{Error, Result};
pub use response::TaggedResponse;
pub use types::{FetchSpec, SeqId, Status};
