//! Minimal IMAP response parsing.
//!
//! The engine only needs four shapes out of the server's replies: the tagged
//! completion line, untagged `SEARCH` identifier lists, untagged `EXISTS`
//! counts, and the payload of a single-message FETCH (literal, quoted string
//! or NIL). Everything else on the wire is read and ignored.

use crate::types::{SeqId, Status};

/// A parsed tagged completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResponse {
    /// Completion status.
    pub status: Status,
    /// Human-readable text after the status word.
    pub text: String,
}

/// Parses a tagged response line if it matches the given tag.
///
/// Returns `None` for untagged lines or lines belonging to another command.
#[must_use]
pub fn parse_tagged(line: &[u8], tag: &str) -> Option<TaggedResponse> {
    let rest = line.strip_prefix(tag.as_bytes())?.strip_prefix(b" ")?;
    let rest = String::from_utf8_lossy(rest);
    let rest = rest.trim_end_matches(['\r', '\n']);

    let (word, text) = rest.split_once(' ').unwrap_or((rest, ""));
    let status = match word.to_ascii_uppercase().as_str() {
        "OK" => Status::Ok,
        "NO" => Status::No,
        "BAD" => Status::Bad,
        "BYE" => Status::Bye,
        _ => return None,
    };

    Some(TaggedResponse {
        status,
        text: text.to_string(),
    })
}

/// Parses an untagged `* SEARCH n n n ...` line into sequence identifiers.
///
/// Returns `None` if the line is not a SEARCH response. Zero or otherwise
/// malformed numbers are skipped; servers should not send them but a bad
/// token must not poison the rest of the listing.
#[must_use]
pub fn parse_search(line: &[u8]) -> Option<Vec<SeqId>> {
    let text = String::from_utf8_lossy(line);
    let rest = text.strip_prefix("* ")?;
    let (keyword, ids) = rest
        .trim_end()
        .split_once(' ')
        .unwrap_or((rest.trim_end(), ""));
    if !keyword.eq_ignore_ascii_case("SEARCH") {
        return None;
    }

    Some(
        ids.split_ascii_whitespace()
            .filter_map(|tok| tok.parse::<u32>().ok())
            .filter_map(SeqId::new)
            .collect(),
    )
}

/// Parses an untagged `* n EXISTS` line into the message count.
#[must_use]
pub fn parse_exists(line: &[u8]) -> Option<u32> {
    let text = String::from_utf8_lossy(line);
    let rest = text.strip_prefix("* ")?;
    let (num, keyword) = rest.trim_end().split_once(' ')?;
    if keyword.eq_ignore_ascii_case("EXISTS") {
        num.parse().ok()
    } else {
        None
    }
}

/// Extracts the data payload from an untagged FETCH response.
///
/// A FETCH response carries its section data either as a literal
/// (`{n}\r\n<n bytes>`), as a quoted string, or as `NIL`. The framed reader
/// hands us the full response with any literal bytes inlined after the
/// `{n}\r\n` marker, so extraction is a scan for the first of those forms
/// after the section specification.
#[must_use]
pub fn extract_fetch_payload(response: &[u8]) -> Option<Vec<u8>> {
    if !is_fetch_response(response) {
        return None;
    }

    // Literal form: everything between `{n}\r\n` and the trailing `)`.
    if let Some(open) = response.iter().position(|&b| b == b'{') {
        let close = open + response[open..].iter().position(|&b| b == b'}')?;
        let len: usize = std::str::from_utf8(&response[open + 1..close])
            .ok()?
            .parse()
            .ok()?;
        let start = close + 3; // skip "}\r\n"
        if response.len() >= start + len {
            return Some(response[start..start + len].to_vec());
        }
        return None;
    }

    // Quoted-string form, e.g. `* 1 FETCH (BODY[] "short body")`.
    if let Some(open) = response.iter().position(|&b| b == b'"') {
        let mut out = Vec::new();
        let mut escaped = false;
        for &b in &response[open + 1..] {
            if escaped {
                out.push(b);
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                return Some(out);
            } else {
                out.push(b);
            }
        }
        return None;
    }

    // NIL (message exists but the section is empty) decodes as no payload.
    None
}

/// Returns true if the response is an untagged FETCH data line.
fn is_fetch_response(response: &[u8]) -> bool {
    let text = String::from_utf8_lossy(response);
    let Some(rest) = text.strip_prefix("* ") else {
        return false;
    };
    rest.split_ascii_whitespace()
        .nth(1)
        .is_some_and(|w| w.eq_ignore_ascii_case("FETCH"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tagged_ok() {
        let resp = parse_tagged(b"A0001 OK LOGIN completed\r\n", "A0001").unwrap();
        assert_eq!(resp.status, Status::Ok);
        assert_eq!(resp.text, "LOGIN completed");
    }

    #[test]
    fn tagged_no() {
        let resp = parse_tagged(b"A0002 NO [AUTHENTICATIONFAILED] bad creds\r\n", "A0002").unwrap();
        assert_eq!(resp.status, Status::No);
        assert!(resp.text.contains("AUTHENTICATIONFAILED"));
    }

    #[test]
    fn tagged_ignores_other_tags() {
        assert!(parse_tagged(b"A0001 OK done\r\n", "A0002").is_none());
        assert!(parse_tagged(b"* OK greeting\r\n", "A0001").is_none());
    }

    #[test]
    fn search_identifiers_in_server_order() {
        let ids = parse_search(b"* SEARCH 1 2 5 44\r\n").unwrap();
        let values: Vec<u32> = ids.iter().map(|id| id.get()).collect();
        assert_eq!(values, vec![1, 2, 5, 44]);
    }

    #[test]
    fn search_empty_mailbox() {
        let ids = parse_search(b"* SEARCH\r\n").unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn search_rejects_non_search_lines() {
        assert!(parse_search(b"* 3 EXISTS\r\n").is_none());
        assert!(parse_search(b"A0001 OK SEARCH completed\r\n").is_none());
        assert!(parse_search(b"* SEARCHFOO 1 2\r\n").is_none());
    }

    #[test]
    fn search_keyword_matches_any_case() {
        let ids = parse_search(b"* Search 7 9\r\n").unwrap();
        let values: Vec<u32> = ids.iter().map(|id| id.get()).collect();
        assert_eq!(values, vec![7, 9]);
    }

    #[test]
    fn exists_count() {
        assert_eq!(parse_exists(b"* 23 EXISTS\r\n"), Some(23));
        assert_eq!(parse_exists(b"* 0 EXISTS\r\n"), Some(0));
        assert_eq!(parse_exists(b"* 23 RECENT\r\n"), None);
    }

    #[test]
    fn fetch_literal_payload() {
        let resp = b"* 12 FETCH (BODY[] {5}\r\nhello)\r\n";
        assert_eq!(extract_fetch_payload(resp).unwrap(), b"hello");
    }

    #[test]
    fn fetch_quoted_payload() {
        let resp = b"* 3 FETCH (BODY[] \"hi \\\"there\\\"\")\r\n";
        assert_eq!(extract_fetch_payload(resp).unwrap(), b"hi \"there\"");
    }

    #[test]
    fn fetch_nil_payload() {
        let resp = b"* 3 FETCH (BODY[] NIL)\r\n";
        assert!(extract_fetch_payload(resp).is_none());
    }

    #[test]
    fn fetch_ignores_non_fetch_lines() {
        assert!(extract_fetch_payload(b"* SEARCH 1 2 3\r\n").is_none());
        assert!(extract_fetch_payload(b"A0001 OK done\r\n").is_none());
    }

    #[test]
    fn fetch_truncated_literal_is_rejected() {
        let resp = b"* 12 FETCH (BODY[] {50}\r\nshort)\r\n";
        assert!(extract_fetch_payload(resp).is_none());
    }
}
