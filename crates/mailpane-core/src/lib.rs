//! # mailpane-core
//!
//! The mailbox session engine: everything between the wire protocol and a
//! presentation surface.
//!
//! This crate provides:
//! - Provider settings resolution (domain to host/port/security/login name)
//! - Session establishment with timeouts and error classification
//! - A newest-first pagination index over the selected mailbox
//! - Header and body decoding for display
//! - Cancellable full-mailbox content search
//!
//! The engine owns no UI. It emits [`EngineEvent`]s over a channel and the
//! surface renders them; commands flow the other way as method calls on a
//! cloned [`Engine`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod engine;
mod error;
pub mod event;
pub mod index;
pub mod search;
pub mod session;
pub mod settings;
pub mod source;

pub use engine::Engine;
pub use error::{Error, Result};
pub use event::{Activity, EngineEvent, EventSender, PageView, event_channel};
pub use index::{DEFAULT_PAGE_SIZE, HeaderSummary, MailboxOrder, MessageDetail};
pub use search::{SearchSupervisor, SearchTicket};
pub use session::SessionConfig;
pub use settings::{ProviderSettings, ResolvedAccount, SettingsResolver};
pub use source::{ImapSource, MessageSource};
