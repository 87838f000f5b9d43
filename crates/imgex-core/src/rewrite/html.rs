//! HTML rewriting.

use crate::downloader::LocalAsset;

use super::{apply_substitutions, Rewritten, Substitution};

/// Replaces every quoted reference to a downloaded image (`"<href>"` and the
/// quoted literal spellings it was found under) with `"<public_prefix>/<local_name>"`.
pub fn rewrite_html(html: &str, assets: &[LocalAsset], public_prefix: &str) -> Rewritten {
    let mut subs = Vec::new();
    for asset in assets {
        let replacement = format!("\"{}/{}\"", public_prefix, asset.local_name);
        let href = asset.remote.href();
        subs.push(Substitution {
            needle: format!("\"{}\"", href),
            replacement: replacement.clone(),
        });
        for literal in asset.remote.literals() {
            if literal != href {
                subs.push(Substitution {
                    needle: format!("\"{}\"", literal),
                    replacement: replacement.clone(),
                });
            }
        }
    }
    apply_substitutions(html, subs)
}
