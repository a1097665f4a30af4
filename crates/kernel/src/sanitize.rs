//! Input sanitization for admin submissions.
//!
//! Slugs, URL segments and text labels arrive from form posts and query
//! strings; every value is normalized here before it is validated or stored.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[allow(clippy::expect_used)]
static DASH_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("dash pattern is valid"));

#[allow(clippy::expect_used)]
static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("alnum pattern is valid"));

/// Normalize a storage key: lowercase ASCII letters, digits, `_` and `-`.
pub fn sanitize_key(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Normalize a URL path segment ("Our Work!" becomes "our-work").
pub fn sanitize_title(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    let lowered = stripped.to_lowercase();
    let spaced: String = lowered
        .chars()
        .map(|c| if c.is_whitespace() || c == '.' { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect();
    DASH_RUN_RE
        .replace_all(&spaced, "-")
        .trim_matches('-')
        .to_string()
}

/// Normalize a single-line text field: tags stripped, control characters
/// removed, whitespace collapsed and trimmed.
pub fn sanitize_text_field(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    let cleaned: String = stripped
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}

/// Suggest a content type or taxonomy slug from a singular label.
pub fn suggest_slug(singular: &str) -> String {
    let lowered = singular.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Suggest a plural label from a singular label.
pub fn suggest_plural(singular: &str) -> String {
    let singular = sanitize_text_field(singular);
    if singular.is_empty() {
        return singular;
    }
    format!("{singular}s")
}
