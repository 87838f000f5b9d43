//! URL extraction from rendered HTML.

use crate::url_model::{RemoteUrl, UrlSet};

use super::{ImagePatterns, W3_MARKER};

/// Finds every absolute image URL in `html`, deduplicated by href.
pub fn extract_html_urls(html: &str, patterns: &ImagePatterns) -> Vec<RemoteUrl> {
    let mut set = UrlSet::new();

    for m in patterns.html().find_iter(html) {
        let literal = m.as_str();
        if literal.contains(W3_MARKER) {
            continue;
        }
        match RemoteUrl::parse(literal) {
            Ok(url) => {
                set.insert(url);
            }
            Err(e) => {
                tracing::warn!(literal, error = %e, "skipping unparsable image URL");
            }
        }
    }

    set.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ImagePatterns {
        ImagePatterns::new(&["jpg", "jpeg", "png", "svg"]).unwrap()
    }

    fn hrefs(urls: &[RemoteUrl]) -> Vec<&str> {
        urls.iter().map(|u| u.href()).collect()
    }

    #[test]
    fn finds_quoted_urls_in_order() {
        let html = r#"<img src="https://cdn.x.com/b.png"><img src="http://cdn.x.com/a.jpg">"#;
        let urls = extract_html_urls(html, &patterns());
        assert_eq!(hrefs(&urls), vec!["https://cdn.x.com/b.png", "http://cdn.x.com/a.jpg"]);
    }

    #[test]
    fn skips_svg_namespace() {
        let html = r#"<svg xmlns="http://www.w3.org/2000/svg"><image href="http://www.w3.org/2000/svg.png"/></svg>"#;
        assert!(extract_html_urls(html, &patterns()).is_empty());
    }

    #[test]
    fn dedups_by_href() {
        let html = r#"<img src="http://x.com/a.png"><img src="HTTP://X.COM:80/a.png"><img src="http://x.com/a.png">"#;
        let urls = extract_html_urls(html, &patterns());
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].literals(), ["http://x.com/a.png", "HTTP://X.COM:80/a.png"]);
    }

    #[test]
    fn empty_query_is_same_image() {
        let html = r#"<img src="http://x.com/a.png"><img src="http://x.com/a.png?">"#;
        let urls = extract_html_urls(html, &patterns());
        assert_eq!(hrefs(&urls), vec!["http://x.com/a.png"]);
        assert_eq!(urls[0].literals(), ["http://x.com/a.png", "http://x.com/a.png?"]);
    }

    #[test]
    fn unparsable_literal_is_skipped() {
        let html = r#"<img src="http://exa mple.com/a.png"><img src="http://x.com/ok.png">"#;
        let urls = extract_html_urls(html, &patterns());
        assert_eq!(hrefs(&urls), vec!["http://x.com/ok.png"]);
    }

    #[test]
    fn keeps_query_strings() {
        let html = r#"<img src="https://x.com/a.jpeg?w=10"><img src="https://x.com/a.jpeg?w=20">"#;
        let urls = extract_html_urls(html, &patterns());
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].url().query(), Some("w=10"));
    }

    #[test]
    fn ignores_other_extensions() {
        let html = r#"<a href="https://x.com/doc.pdf">doc</a><script src="https://x.com/app.js"></script>"#;
        assert!(extract_html_urls(html, &patterns()).is_empty());
    }
}
