//! Connection handling: transport streams, framing, and configuration.

pub mod config;
pub mod framed;
pub mod stream;

pub use self::config::{Config, Security, connect};
pub use self::framed::FramedStream;
pub use self::stream::ImapStream;
