//! Remote URL modeling and local name derivation.
//!
//! A [`RemoteUrl`] is one discovered image reference: the canonical parsed URL
//! plus every literal spelling it was found under. Names and payload encodings
//! are derived from it deterministically.

mod encode;
mod name;
mod slug;

pub use encode::{encode_chars, encode_slashes, percent_decode, ESCAPED_SLASH};
pub use name::{derive_local_name, derive_local_name_with, encoded_remote_link, NameStyle};
pub use slug::slugify;

use url::Url;

/// A remote image reference discovered in one scan.
///
/// Two references are the same entity iff their hrefs are equal; the literal
/// substrings they were extracted from are kept so rewrites can match the
/// text exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    url: Url,
    literals: Vec<String>,
}

impl RemoteUrl {
    /// An empty query or fragment (`a.png?`, `a.png#`) is dropped from the
    /// href; the literal keeps it.
    pub fn new(mut url: Url, literal: impl Into<String>) -> Self {
        if url.query() == Some("") {
            url.set_query(None);
        }
        if url.fragment() == Some("") {
            url.set_fragment(None);
        }
        Self {
            url,
            literals: vec![literal.into()],
        }
    }

    /// Parses a literal as found in HTML.
    pub fn parse(literal: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(literal)?, literal))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Canonical absolute form; the identity used for dedup and caching.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Literal substrings this URL was extracted from, first-seen first.
    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    pub(crate) fn add_literal(&mut self, literal: String) {
        if !self.literals.contains(&literal) {
            self.literals.push(literal);
        }
    }
}

/// Ordered-unique set of [`RemoteUrl`]s keyed by href.
#[derive(Debug, Default)]
pub struct UrlSet {
    urls: Vec<RemoteUrl>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `candidate`, or merges its literals into the entry with the same href.
    /// Returns true if it was new.
    pub fn insert(&mut self, candidate: RemoteUrl) -> bool {
        match self.urls.iter_mut().find(|u| u.href() == candidate.href()) {
            Some(existing) => {
                for literal in candidate.literals {
                    existing.add_literal(literal);
                }
                false
            }
            None => {
                self.urls.push(candidate);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_vec(self) -> Vec<RemoteUrl> {
        self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_is_canonical() {
        let u = RemoteUrl::parse("HTTP://CDN.Example.com:80/a b.png").unwrap();
        assert_eq!(u.href(), "http://cdn.example.com/a%20b.png");
        assert_eq!(u.literals(), ["HTTP://CDN.Example.com:80/a b.png"]);
    }

    #[test]
    fn empty_query_and_fragment_are_dropped() {
        let u = RemoteUrl::parse("http://x.com/a.png?").unwrap();
        assert_eq!(u.href(), "http://x.com/a.png");
        assert_eq!(u.literals(), ["http://x.com/a.png?"]);
        assert_eq!(RemoteUrl::parse("http://x.com/a.png#").unwrap().href(), "http://x.com/a.png");
        assert_eq!(
            RemoteUrl::parse("http://x.com/a.png?#").unwrap().href(),
            "http://x.com/a.png"
        );
    }

    #[test]
    fn parse_failure() {
        assert!(RemoteUrl::parse("http://exa mple.com/a.png").is_err());
    }

    #[test]
    fn set_dedups_by_href_and_keeps_order() {
        let mut set = UrlSet::new();
        assert!(set.insert(RemoteUrl::parse("http://x.com/b.png").unwrap()));
        assert!(set.insert(RemoteUrl::parse("http://x.com/a.png").unwrap()));
        assert!(!set.insert(RemoteUrl::parse("HTTP://X.COM/b.png").unwrap()));
        assert!(!set.insert(RemoteUrl::parse("http://x.com/b.png").unwrap()));
        assert_eq!(set.len(), 2);

        let urls = set.into_vec();
        assert_eq!(urls[0].href(), "http://x.com/b.png");
        assert_eq!(urls[1].href(), "http://x.com/a.png");
        assert_eq!(urls[0].literals(), ["http://x.com/b.png", "HTTP://X.COM/b.png"]);
    }
}
