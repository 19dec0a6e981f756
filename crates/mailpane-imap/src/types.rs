//! Core IMAP types used by the mailbox session engine.

use std::num::NonZeroU32;

/// Message sequence number within the selected mailbox.
///
/// Sequence numbers are assigned by the server starting from 1 and are only
/// meaningful for the lifetime of the selection. They carry no chronological
/// meaning; callers must not assume a higher number means a newer date, only
/// a later arrival position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeqId(pub NonZeroU32);

impl SeqId {
    /// Creates a new sequence identifier.
    ///
    /// Returns `None` if the value is 0 (sequence numbers start at 1).
    #[must_use]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Self)
    }

    /// Returns the underlying value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for SeqId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which portion of a message a FETCH should retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSpec {
    /// Only the FROM, SUBJECT and DATE header fields (list rows).
    Headers,
    /// The entire raw message (detail view and content search).
    Full,
}

impl FetchSpec {
    /// Returns the IMAP fetch attribute for this spec.
    ///
    /// Both use `BODY.PEEK` so fetching never sets `\Seen`.
    #[must_use]
    pub const fn as_attribute(self) -> &'static str {
        match self {
            Self::Headers => "BODY.PEEK[HEADER.FIELDS (FROM SUBJECT DATE)]",
            Self::Full => "BODY.PEEK[]",
        }
    }
}

/// Status of a tagged server response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command completed successfully.
    Ok,
    /// Command failed (operational error).
    No,
    /// Command was rejected (protocol error).
    Bad,
    /// Server is closing the connection.
    Bye,
}

impl Status {
    /// Returns true if the status indicates success.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seq_id_rejects_zero() {
        assert!(SeqId::new(0).is_none());
        assert_eq!(SeqId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn seq_id_display() {
        let id = SeqId::new(42).unwrap();
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn fetch_spec_attributes() {
        assert_eq!(
            FetchSpec::Headers.as_attribute(),
            "BODY.PEEK[HEADER.FIELDS (FROM SUBJECT DATE)]"
        );
        assert_eq!(FetchSpec::Full.as_attribute(), "BODY.PEEK[]");
    }
}
