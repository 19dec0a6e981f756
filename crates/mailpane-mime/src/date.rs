//! Date header normalization.

use chrono::DateTime;

/// Display format for normalized dates.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Normalizes an RFC 2822 Date header for display.
///
/// Parses dates like `Tue, 01 Jul 2025 10:52:37 +0200` and reformats them
/// as `2025-07-01 10:52`, keeping the message's own timezone offset. Raw
/// text that does not parse is returned trimmed, not discarded; a readable
/// but odd date beats an empty column.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    parse(trimmed).map_or_else(|| trimmed.to_string(), |dt| dt.format(DISPLAY_FORMAT).to_string())
}

fn parse(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt);
    }
    // Retry without a trailing comment, e.g. "... +0000 (UTC)".
    if let Some(start) = value.rfind('(')
        && value.ends_with(')')
    {
        return DateTime::parse_from_rfc2822(value[..start].trim_end()).ok();
    }
    None
}
