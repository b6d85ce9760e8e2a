use once_cell::sync::Lazy;
use regex::Regex;

// A URL token runs until whitespace or markup delimiters; trailing prose
// punctuation is stripped afterwards by `clean_link`.
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s<>]+").unwrap());

static TRAILING_JUNK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[)"'>]+$"#).unwrap());

/// Scan a body text for http(s) links, in first-occurrence order.
pub fn extract_links(text: &str) -> Vec<String> {
    LINK_RE
        .find_iter(text)
        .map(|m| clean_link(m.as_str()))
        .collect()
}

/// Strip trailing characters left over from surrounding prose or markup,
/// e.g. a closing parenthesis or the quote of an href attribute.
pub fn clean_link(link: &str) -> String {
    TRAILING_JUNK_RE.replace(link, "").to_string()
}
