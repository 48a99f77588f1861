//! Display name normalization
//!
//! Names end up as identifiers in the scraper registry, so a scraped title
//! goes through: entity unescape, `&`/`@` spelled out, ASCII transliteration,
//! then everything outside `[A-Za-z0-9_]` is dropped.

/// Normalize a scraped display name into a registry identifier
pub fn normalize_name(raw: &str) -> String {
    let unescaped = html_escape::decode_html_entities(raw);
    let spelled = unescaped.replace('&', "And").replace('@', "At");
    deunicode::deunicode(&spelled)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
