//! Text cleanup shared by link building and field formatting.
//!
//! kinopoisk.dev text fields arrive with raw HTML fragments and entity
//! references, and frontmatter values cannot contain `:` without breaking
//! key/value parsing.

use std::sync::OnceLock;

use regex::Regex;

/// Named entities the API is known to emit, decoded to literal characters.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&laquo;", "«"),
    ("&raquo;", "»"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&ndash;", "–"),
    ("&mdash;", "—"),
    ("&hellip;", "…"),
];

// Compile-once regex patterns via OnceLock.
fn re_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn re_entity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&#?\w+;").unwrap())
}

/// Remove characters that break frontmatter key/value parsing and trim.
pub fn clean_for_metadata(text: &str) -> String {
    text.replace(':', "").trim().to_string()
}

/// Strip `<tag>` fragments, decode known entities, drop unknown ones, trim.
///
/// Tags are removed before entity decoding so a reference hidden inside a
/// removed tag never surfaces in the visible text.
pub fn strip_markup(text: &str) -> String {
    let mut clean = re_tag().replace_all(text, "").into_owned();
    for (entity, literal) in HTML_ENTITIES {
        if clean.contains(entity) {
            clean = clean.replace(entity, literal);
        }
    }
    re_entity().replace_all(&clean, "").trim().to_string()
}
