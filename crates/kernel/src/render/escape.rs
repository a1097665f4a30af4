//! Context-aware escaping for generated HTML.

use url::Url;

/// Escape text for an HTML text node.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape text for a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_html(s).replace('`', "&#x60;")
}

/// Escape a URL for an `href`/`src` attribute.
///
/// Absolute URLs must use http or https; anything else (e.g. `javascript:`)
/// yields an empty string. Relative URLs pass through escaped.
pub fn escape_url(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => escape_attr(url.as_str()),
        Ok(_) => String::new(),
        Err(url::ParseError::RelativeUrlWithoutBase) if !trimmed.contains(':') => {
            escape_attr(trimmed)
        }
        Err(_) => String::new(),
    }
}

/// Sanitize rich HTML (item bodies and excerpts) against an allow-list.
pub fn sanitize_html(input: &str) -> String {
    ammonia::clean(input)
}
