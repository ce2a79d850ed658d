//! Link header parsing (RFC 5988 style)
//!
//! Format: `Link: <https://host/api/v2/zones?page=2>; rel="next", <...>; rel="last"`

use std::fmt;

/// Pagination role of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    First,
    Last,
    Prev,
    Next,
}

impl LinkRelation {
    /// Parse a `rel` value; unknown relations yield `None`
    pub fn from_rel(rel: &str) -> Option<Self> {
        match rel {
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            "prev" | "previous" => Some(Self::Prev),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    /// The `rel` value as it appears in the header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL tagged with its pagination role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationLink {
    pub relation: LinkRelation,
    /// Absolute or relative URL, exactly as sent by the server
    pub url: String,
}

/// Parse a Link header into its recognised relation links
///
/// Segments with fewer than two `;`-separated parts, or without a `rel=`
/// parameter, are skipped. Unknown relations are ignored. Never fails.
pub fn parse_link_header(header: &str) -> Vec<PaginationLink> {
    let mut links = Vec::new();

    for segment in header.split(',') {
        let parts: Vec<&str> = segment.split(';').map(str::trim).collect();
        if parts.len() < 2 {
            continue;
        }

        let url = parts[0].trim_start_matches('<').trim_end_matches('>');
        if url.is_empty() {
            continue;
        }

        let relation = parts[1..]
            .iter()
            .filter_map(|p| p.strip_prefix("rel="))
            .map(|rel| rel.trim_matches('"').trim_matches('\''))
            .find_map(LinkRelation::from_rel);

        if let Some(relation) = relation {
            links.push(PaginationLink {
                relation,
                url: url.to_string(),
            });
        }
    }

    links
}

/// First link with the given relation
pub fn find_link(links: &[PaginationLink], relation: LinkRelation) -> Option<&PaginationLink> {
    links.iter().find(|link| link.relation == relation)
}
