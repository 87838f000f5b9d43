//! Image URL discovery in generated HTML and serialized payload text.
//!
//! Each extractor returns an ordered-unique list of [`RemoteUrl`]s (dedup by
//! href, first-seen order). Literals that fail to decode or parse are skipped
//! with a warning; one bad match never aborts the scan.

mod html;
mod patterns;
mod payload;

pub use html::extract_html_urls;
pub use patterns::{ImagePatterns, PatternError};
pub use payload::{decode_payload_literal, extract_payload_urls};

/// SVG namespace URIs look like image URLs but are never downloadable.
pub const W3_MARKER: &str = "http://www.w3.org/";
