//! Image URL patterns compiled from the configured extensions.

use regex::Regex;

/// Error building [`ImagePatterns`].
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("no image extensions configured")]
    NoExtensions,
    #[error("invalid image pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Compiled matchers for both text containers.
///
/// Both match an absolute `http(s):` URL whose body runs up to a literal
/// `.<ext>`, followed by anything up to the next `"`, `|` or whitespace. The
/// payload variant also admits `\` so `\u002F`-escaped slashes match.
#[derive(Debug, Clone)]
pub struct ImagePatterns {
    html: Regex,
    payload: Regex,
}

impl ImagePatterns {
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self, PatternError> {
        let alternation = extensions
            .iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        if alternation.is_empty() {
            return Err(PatternError::NoExtensions);
        }

        let html = Regex::new(&format!(
            r#"(?i)https?:[/|.\w\s%:~-]*\.(?:{alternation})[^"|\s]*"#
        ))?;
        let payload = Regex::new(&format!(
            r#"(?i)https?:[\\/|.\w\s%:~-]*\.(?:{alternation})[^"|\s]*"#
        ))?;
        Ok(Self { html, payload })
    }

    pub fn html(&self) -> &Regex {
        &self.html
    }

    pub fn payload(&self) -> &Regex {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_matches(p: &ImagePatterns, text: &str) -> Vec<String> {
        p.html().find_iter(text).map(|m| m.as_str().to_string()).collect()
    }

    #[test]
    fn empty_extensions_rejected() {
        let none: [&str; 0] = [];
        assert!(matches!(ImagePatterns::new(&none), Err(PatternError::NoExtensions)));
        assert!(matches!(ImagePatterns::new(&["", " ."]), Err(PatternError::NoExtensions)));
    }

    #[test]
    fn extension_dot_is_literal() {
        let p = ImagePatterns::new(&["png"]).unwrap();
        assert!(html_matches(&p, r#"<a href="http://x.com/imagepng">"#).is_empty());
        assert_eq!(
            html_matches(&p, r#"<img src="http://x.com/a.png">"#),
            vec!["http://x.com/a.png"]
        );
    }

    #[test]
    fn case_insensitive_and_trailing_query() {
        let p = ImagePatterns::new(&[".PNG"]).unwrap();
        assert_eq!(
            html_matches(&p, r#"<img src="HTTPS://x.com/A.Png?w=1&h=2#f">"#),
            vec!["HTTPS://x.com/A.Png?w=1&h=2#f"]
        );
    }

    #[test]
    fn spaces_inside_url_body() {
        let p = ImagePatterns::new(&["png"]).unwrap();
        assert_eq!(
            html_matches(&p, r#"<img src="http://x.com/foo bar.png">"#),
            vec!["http://x.com/foo bar.png"]
        );
    }

    #[test]
    fn srcset_entries_split_on_comma() {
        let p = ImagePatterns::new(&["jpg"]).unwrap();
        assert_eq!(
            html_matches(&p, r#"srcset="http://x.com/a.jpg 1x, http://x.com/b.jpg 2x""#),
            vec!["http://x.com/a.jpg", "http://x.com/b.jpg"]
        );
    }

    #[test]
    fn payload_admits_backslashes() {
        let p = ImagePatterns::new(&["jpg"]).unwrap();
        let text = "{src:\"http:\\u002F\\u002Fcdn.x.com\\u002Fa.jpg\"}";
        let m: Vec<_> = p.payload().find_iter(text).map(|m| m.as_str()).collect();
        assert_eq!(m, vec!["http:\\u002F\\u002Fcdn.x.com\\u002Fa.jpg"]);
        assert!(p.html().find(text).is_none());
    }
}
