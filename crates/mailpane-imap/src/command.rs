//! IMAP command builder.
//!
//! Serialization for the small command set the session engine speaks:
//! LOGIN, SELECT, SEARCH ALL, FETCH, NOOP and LOGOUT.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::{FetchSpec, SeqId};

/// IMAP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// LOGIN command.
    Login {
        /// Username.
        username: String,
        /// Password.
        password: String,
    },
    /// SELECT command.
    Select {
        /// Mailbox to select.
        mailbox: String,
    },
    /// Unconditional `SEARCH ALL` over the selected mailbox.
    SearchAll,
    /// FETCH of a single message by sequence number.
    Fetch {
        /// Message to fetch.
        id: SeqId,
        /// Portion of the message to retrieve.
        spec: FetchSpec,
    },
    /// NOOP command (keepalive).
    Noop,
    /// LOGOUT command.
    Logout,
}

impl Command {
    /// Serializes the command to bytes with the given tag, CRLF-terminated.
    #[must_use]
    pub fn serialize(&self, tag: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(tag.as_bytes());
        buf.push(b' ');

        match self {
            Self::Login { username, password } => {
                buf.extend_from_slice(b"LOGIN ");
                write_astring(&mut buf, username);
                buf.push(b' ');
                write_astring(&mut buf, password);
            }
            Self::Select { mailbox } => {
                buf.extend_from_slice(b"SELECT ");
                write_astring(&mut buf, mailbox);
            }
            Self::SearchAll => buf.extend_from_slice(b"SEARCH ALL"),
            Self::Fetch { id, spec } => {
                buf.extend_from_slice(format!("FETCH {id} ").as_bytes());
                buf.extend_from_slice(spec.as_attribute().as_bytes());
            }
            Self::Noop => buf.extend_from_slice(b"NOOP"),
            Self::Logout => buf.extend_from_slice(b"LOGOUT"),
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}

/// Writes an astring (atom or quoted string).
fn write_astring(buf: &mut Vec<u8>, s: &str) {
    if s.is_empty() || s.bytes().any(needs_quoting) {
        buf.push(b'"');
        for b in s.bytes() {
            if b == b'"' || b == b'\\' {
                buf.push(b'\\');
            }
            buf.push(b);
        }
        buf.push(b'"');
    } else {
        buf.extend_from_slice(s.as_bytes());
    }
}

/// Returns true if the byte needs quoting.
const fn needs_quoting(b: u8) -> bool {
    matches!(b, b' ' | b'"' | b'\\' | b'(' | b')' | b'{' | b'%' | b'*') || b < 0x20 || b == 0x7F
}

/// Tag generator for IMAP commands.
///
/// Generates unique sequential tags in the format "A0000", "A0001", etc.
#[derive(Debug)]
pub struct TagGenerator {
    counter: AtomicU32,
    prefix: char,
}

impl TagGenerator {
    /// Creates a new tag generator with the given prefix.
    #[must_use]
    pub const fn new(prefix: char) -> Self {
        Self {
            counter: AtomicU32::new(0),
            prefix,
        }
    }

    /// Generates the next tag.
    #[must_use]
    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{:04}", self.prefix, n)
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new('A')
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tag_generation_is_sequential() {
        let tags = TagGenerator::default();
        assert_eq!(tags.next(), "A0000");
        assert_eq!(tags.next(), "A0001");
        assert_eq!(tags.next(), "A0002");
    }

    #[test]
    fn login_quotes_when_needed() {
        let cmd = Command::Login {
            username: "user@example.com".into(),
            password: "open sesame".into(),
        };
        assert_eq!(
            cmd.serialize("A0000"),
            b"A0000 LOGIN user@example.com \"open sesame\"\r\n"
        );
    }

    #[test]
    fn login_escapes_quotes_and_backslashes() {
        let cmd = Command::Login {
            username: "user".into(),
            password: "p\"a\\ss".into(),
        };
        assert_eq!(
            cmd.serialize("A0001"),
            b"A0001 LOGIN user \"p\\\"a\\\\ss\"\r\n"
        );
    }

    #[test]
    fn select_inbox() {
        let cmd = Command::Select {
            mailbox: "INBOX".into(),
        };
        assert_eq!(cmd.serialize("A0002"), b"A0002 SELECT INBOX\r\n");
    }

    #[test]
    fn fetch_header_fields() {
        let cmd = Command::Fetch {
            id: SeqId::new(17).unwrap(),
            spec: FetchSpec::Headers,
        };
        assert_eq!(
            cmd.serialize("A0003"),
            b"A0003 FETCH 17 BODY.PEEK[HEADER.FIELDS (FROM SUBJECT DATE)]\r\n"
        );
    }

    #[test]
    fn fetch_full_message() {
        let cmd = Command::Fetch {
            id: SeqId::new(3).unwrap(),
            spec: FetchSpec::Full,
        };
        assert_eq!(cmd.serialize("A0004"), b"A0004 FETCH 3 BODY.PEEK[]\r\n");
    }

    #[test]
    fn search_all() {
        assert_eq!(Command::SearchAll.serialize("A0005"), b"A0005 SEARCH ALL\r\n");
    }

    #[test]
    fn logout() {
        assert_eq!(Command::Logout.serialize("A0006"), b"A0006 LOGOUT\r\n");
    }
}
