//! Text rewriting: remote image references → local asset paths.
//!
//! Both rewriters are a pure fold. They collect (needle, replacement) pairs for
//! successfully downloaded assets only, drop duplicate needles (first wins),
//! and apply the pairs longest-needle-first in one pass. The result does not
//! depend on the order in which fetches completed.

mod html;
mod payload;

pub use html::rewrite_html;
pub use payload::{ends_payload_reference, payload_replacement, rewrite_payload};

/// A literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub needle: String,
    pub replacement: String,
}

/// Rewritten text and the number of occurrences replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    pub replaced: usize,
}

/// Applies `subs` to `text`: duplicate needles are dropped (first wins) and
/// longer needles go first so a needle that is a prefix of another cannot cut
/// into it.
pub fn apply_substitutions(text: &str, subs: Vec<Substitution>) -> Rewritten {
    apply_substitutions_bounded(text, subs, |_| true)
}

/// Like [`apply_substitutions`], but an occurrence is only replaced when
/// `ends_reference` accepts the character right after it (`None` at end of
/// text). Keeps `/a.png` from matching inside `/a.png?w=1`.
pub fn apply_substitutions_bounded(
    text: &str,
    subs: Vec<Substitution>,
    ends_reference: impl Fn(Option<char>) -> bool,
) -> Rewritten {
    let mut unique: Vec<Substitution> = Vec::with_capacity(subs.len());
    for sub in subs {
        if !sub.needle.is_empty() && !unique.iter().any(|u| u.needle == sub.needle) {
            unique.push(sub);
        }
    }
    // Stable: equal lengths keep first-seen order.
    unique.sort_by(|a, b| b.needle.len().cmp(&a.needle.len()));

    let mut text = text.to_string();
    let mut replaced = 0;
    for sub in &unique {
        let (next, count) = replace_bounded(&text, sub, &ends_reference);
        if count > 0 {
            text = next;
            replaced += count;
        }
    }
    Rewritten { text, replaced }
}

fn replace_bounded(
    text: &str,
    sub: &Substitution,
    ends_reference: &impl Fn(Option<char>) -> bool,
) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;
    for (start, _) in text.match_indices(sub.needle.as_str()) {
        let end = start + sub.needle.len();
        if !ends_reference(text[end..].chars().next()) {
            continue;
        }
        out.push_str(&text[last..start]);
        out.push_str(&sub.replacement);
        last = end;
        count += 1;
    }
    out.push_str(&text[last..]);
    (out, count)
}
