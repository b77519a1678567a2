//! `Link` header parsing for hub and topic discovery.
//!
//! Publishers advertise their hub and the canonical topic URL with
//! [RFC 8288] web links:
//!
//! ```text
//! Link: <https://hub.example/>; rel="hub", <https://pub.example/feed>; rel="self"
//! ```
//!
//! # Examples
//!
//! ```
//! use websub_client::protocol::parse_link_header;
//!
//! let links = parse_link_header(r#"<https://hub.example/>; rel="hub", <https://pub.example/feed>; rel=self"#).unwrap();
//! assert_eq!(links.len(), 2);
//! assert!(links[0].has_rel("hub"));
//! assert_eq!(links[1].target, "https://pub.example/feed");
//! ```
//!
//! [RFC 8288]: https://datatracker.ietf.org/doc/html/rfc8288

use crate::error::{Result, WebSubError};

/// One link from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Link target, as written between `<` and `>`
    pub target: String,
    /// Relation types, lowercased
    pub rels: Vec<String>,
}

impl Link {
    /// Whether the link carries relation `rel` (case-insensitive).
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }
}

/// Parse a `Link` header value into its links.
///
/// An empty value yields no links.
///
/// # Errors
///
/// Returns [`WebSubError::HeaderParse`] when a link target is not enclosed in `<...>`.
pub fn parse_link_header(value: &str) -> Result<Vec<Link>> {
    let mut links = Vec::new();
    let mut rest = value.trim();

    while !rest.is_empty() {
        let target_start = rest.strip_prefix('<').ok_or_else(|| invalid(value))?;
        let close = target_start.find('>').ok_or_else(|| invalid(value))?;
        let target = target_start[..close].trim().to_string();

        let (params, remainder) = split_top_level(&target_start[close + 1..], ',');

        let mut rels = Vec::new();
        let mut params = params;
        while !params.is_empty() {
            let (param, next) = split_top_level(params, ';');
            params = next;

            let (name, val) = match param.split_once('=') {
                Some((name, val)) => (name.trim(), val.trim().trim_matches('"')),
                None => (param.trim(), ""),
            };
            if name.eq_ignore_ascii_case("rel") {
                rels.extend(val.split_whitespace().map(str::to_ascii_lowercase));
            }
        }

        links.push(Link { target, rels });
        rest = remainder.trim_start();
    }

    Ok(links)
}

/// Split at the first `sep` that is not inside a quoted string.
fn split_top_level(s: &str, sep: char) -> (&str, &str) {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == sep && !quoted => return (&s[..i], &s[i + 1..]),
            _ => {}
        }
    }
    (s, "")
}

fn invalid(value: &str) -> WebSubError {
    WebSubError::HeaderParse(format!("Invalid Link header: {}", value))
}
