//! Local asset name derivation from a remote image URL.

use sha2::{Digest, Sha256};
use url::{Position, Url};

use super::encode::{encode_chars, encode_slashes, percent_decode};
use super::slug::slugify;

/// Stem used when the URL path slugifies to nothing (e.g. `/.png`).
const DEFAULT_STEM: &str = "image";

/// Marker between the path slug and the query slug.
const QUERY_MARKER: &str = "-searchparams-";

/// Number of hex digits kept from the query hash.
const QUERY_HASH_LEN: usize = 8;

/// How query strings are folded into asset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// `<stem>-searchparams-<query-slug>.<ext>`
    #[default]
    Plain,
    /// Like `Plain`, plus `-<sha256(query)[..8]>` so queries that slugify alike stay distinct.
    QueryHash,
}

/// Derives the local file name for `url`.
///
/// The result is lowercase, limited to `[a-z0-9_.-]`, keeps the image
/// extension, and differs for URLs that differ only by query string.
///
/// # Examples
///
/// - `http://cdn.example.com/foo bar.PNG` → `foo-bar.png`
/// - `https://cdn.example.com/img/a.jpg?w=100` → `img-a-searchparams-w-100.jpg`
pub fn derive_local_name(url: &Url) -> String {
    derive_local_name_with(url, NameStyle::Plain)
}

/// Like [`derive_local_name`] with an explicit [`NameStyle`].
pub fn derive_local_name_with(url: &Url, style: NameStyle) -> String {
    let source = path_and_fragment(url);
    let (stem, ext) = split_extension(&source);

    let mut name = slugify(stem);
    if name.is_empty() {
        name.push_str(DEFAULT_STEM);
    }

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        name.push_str(QUERY_MARKER);
        name.push_str(slugify(query).trim_matches('-'));
        if style == NameStyle::QueryHash {
            let digest = hex::encode(Sha256::digest(query.as_bytes()));
            name.push('-');
            name.push_str(&digest[..QUERY_HASH_LEN]);
        }
    }

    let ext = ext.map(slugify).unwrap_or_default();
    let ext = ext.trim_matches('-');
    if !ext.is_empty() {
        name.push('.');
        name.push_str(ext);
    }
    name
}

/// Percent-decoded path, plus `#fragment` when present.
fn path_and_fragment(url: &Url) -> String {
    let mut source = percent_decode(url.path());
    if let Some(fragment) = url.fragment() {
        source.push('#');
        source.push_str(&percent_decode(fragment));
    }
    source
}

/// Splits at the last `.`; no extension if the tail would span a `/`.
fn split_extension(source: &str) -> (&str, Option<&str>) {
    match source.rfind('.') {
        Some(i) if !source[i + 1..].contains('/') => (&source[..i], Some(&source[i + 1..])),
        _ => (source, None),
    }
}

/// The remote URL as it appears in payload text: everything before the
/// extension passed through [`encode_chars`] and [`encode_slashes`], then the
/// extension verbatim.
///
/// Only defined for URLs without query or fragment and with an extension in
/// the path; other URLs are matched by their captured literals alone.
pub fn encoded_remote_link(url: &Url) -> Option<String> {
    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }
    let href = &url[..Position::AfterPath];
    let path_start = href.len() - url.path().len();
    let dot = href.rfind('.').filter(|&i| i > path_start)?;
    let (stem, ext) = href.split_at(dot);
    if ext.contains('/') {
        return None;
    }
    Some(format!("{}{}", encode_slashes(&encode_chars(stem)), ext))
}
