//! Serialized page-state rewriting.
//!
//! Payload text stores paths with `\u002F` slashes and some characters
//! percent-escaped, so both the searched remote form and the local path are
//! written in that encoding.

use crate::downloader::LocalAsset;
use crate::url_model::{encode_chars, encode_slashes, encoded_remote_link};

use super::{apply_substitutions_bounded, Rewritten, Substitution};

/// Encoded local reference: `encode_slashes(encode_chars(router + public + "/"))`
/// followed by the encoded local name.
pub fn payload_replacement(router_prefix: &str, public_prefix: &str, local_name: &str) -> String {
    let base = format!("{}{}/", router_prefix, public_prefix);
    format!(
        "{}{}",
        encode_slashes(&encode_chars(&base)),
        encode_chars(local_name)
    )
}

/// True when `next` cannot continue a payload URL literal: end of text, a
/// closing quote, an escape backslash, a `|` or whitespace.
pub fn ends_payload_reference(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(c) => c == '"' || c == '\\' || c == '|' || c.is_whitespace(),
    }
}

/// Replaces every payload occurrence of a downloaded image with its encoded
/// local path. Searches for the literals the payload extractor captured and,
/// for URLs without query or fragment, the canonical encoded remote link.
/// An occurrence that runs on into a longer URL is left alone.
pub fn rewrite_payload(
    payload: &str,
    assets: &[LocalAsset],
    router_prefix: &str,
    public_prefix: &str,
) -> Rewritten {
    let mut subs = Vec::new();
    for asset in assets {
        let replacement = payload_replacement(router_prefix, public_prefix, &asset.local_name);
        for literal in asset.remote.literals() {
            subs.push(Substitution {
                needle: literal.clone(),
                replacement: replacement.clone(),
            });
        }
        if let Some(encoded) = encoded_remote_link(asset.remote.url()) {
            subs.push(Substitution {
                needle: encoded,
                replacement,
            });
        }
    }
    apply_substitutions_bounded(payload, subs, ends_payload_reference)
}
