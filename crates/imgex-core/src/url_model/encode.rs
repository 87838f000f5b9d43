//! Character and slash encoding for serialized page-state payloads.
//!
//! Payload files store URLs with a handful of characters percent-escaped and
//! every `/` written as the JavaScript escape `\u002F`. These helpers produce
//! that form so a rewrite can search for it as a literal substring.

/// Unicode escape for `/` as it appears in serialized payloads.
pub const ESCAPED_SLASH: &str = "\\u002F";

/// Percent-escapes the characters that are unsafe for literal matching inside
/// payload text: `% ! @ ^ # $ & ( ) = + , ; ' [ { ] }`.
///
/// Single pass, so a `%` introduced by an escape is never escaped again.
pub fn encode_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match escape_for(c) {
            Some(esc) => out.push_str(esc),
            None => out.push(c),
        }
    }
    out
}

fn escape_for(c: char) -> Option<&'static str> {
    let esc = match c {
        '%' => "%25",
        '!' => "%21",
        '@' => "%40",
        '^' => "%5E",
        '#' => "%23",
        '$' => "%24",
        '&' => "%26",
        '(' => "%28",
        ')' => "%29",
        '=' => "%3D",
        '+' => "%2B",
        ',' => "%2C",
        ';' => "%3B",
        '\'' => "%27",
        '[' => "%5B",
        '{' => "%7B",
        ']' => "%5D",
        '}' => "%7D",
        _ => return None,
    };
    Some(esc)
}

/// Replaces every `/` with `\u002F`.
pub fn encode_slashes(input: &str) -> String {
    input.replace('/', ESCAPED_SLASH)
}

/// Percent-decodes `input`. Malformed escapes are kept as-is and invalid UTF-8
/// is replaced lossily.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
