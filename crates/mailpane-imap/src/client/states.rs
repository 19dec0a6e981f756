//! Marker types for the client's type-state.

/// Connection established, greeting consumed, not yet logged in.
#[derive(Debug)]
pub struct NotAuthenticated;

/// Logged in, no mailbox selected.
#[derive(Debug)]
pub struct Authenticated;

/// A mailbox is selected and message operations are available.
#[derive(Debug)]
pub struct Selected;
