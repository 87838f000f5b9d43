//! URL extraction from serialized page-state payloads.
//!
//! Payload literals are JavaScript string contents: slashes may be written as
//! `\u002F` or `\/`, and the match can pick up a trailing backslash from an
//! escaped closing quote.

use anyhow::{Context, Result};
use url::Url;

use crate::url_model::{percent_decode, RemoteUrl, UrlSet};

use super::{ImagePatterns, W3_MARKER};

/// Finds every image URL in `payload`, deduplicated by href. Each result keeps
/// the raw matched text (trailing backslashes stripped) as its literal.
pub fn extract_payload_urls(payload: &str, patterns: &ImagePatterns) -> Vec<RemoteUrl> {
    let mut set = UrlSet::new();

    for m in patterns.payload().find_iter(payload) {
        let literal = m.as_str().trim_end_matches('\\');
        if literal.contains(W3_MARKER) {
            continue;
        }
        let decoded = match decode_payload_literal(literal) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(literal, error = %format!("{:#}", e), "skipping undecodable payload URL");
                continue;
            }
        };
        if decoded.contains(W3_MARKER) {
            continue;
        }
        match Url::parse(&decoded) {
            Ok(url) => {
                set.insert(RemoteUrl::new(url, literal));
            }
            Err(e) => {
                tracing::warn!(literal, error = %e, "skipping unparsable payload URL");
            }
        }
    }

    set.into_vec()
}

/// Decodes a payload literal: JSON string escapes first, then percent escapes.
pub fn decode_payload_literal(literal: &str) -> Result<String> {
    let unescaped: String = serde_json::from_str(&format!("\"{}\"", literal))
        .context("invalid string escape")?;
    Ok(percent_decode(&unescaped))
}
