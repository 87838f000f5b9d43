//! Filesystem-safe slugs for local asset names.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Slugifies `text` for use in a local asset name.
///
/// - Lowercases, applies NFD and drops combining marks (`Café` → `cafe`)
/// - Trims surrounding whitespace and removes the first `/`
/// - Replaces every run of characters outside `[a-z0-9_]` with a single `-`
///
/// Leading and trailing hyphens are kept; callers trim where needed.
pub fn slugify(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let trimmed = lowered.trim().replacen('/', "", 1);

    let mut out = String::with_capacity(trimmed.len());
    let mut prev_hyphen = false;

    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            out.push('-');
            prev_hyphen = true;
        }
    }

    out
}
