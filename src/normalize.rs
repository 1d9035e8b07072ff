//! Full-record → note-record pipeline.
//!
//! Maps a raw person payload into the array-shaped [`NoteRecord`] the
//! template collaborator consumes: related persons resolved to links, fields
//! classified and formatted by semantic type, derived file-safe and date
//! fields filled in. Pure except for the optional fetch collaborator.

use crate::error::Error;
use crate::resolver::{resolve_all, PersonFetcher};
use crate::sanitize::clean_for_metadata;
use crate::types::{FullPersonRecord, NoteRecord};

/// Array fields never exceed this many elements; earliest elements win.
pub const MAX_ARRAY_ITEMS: usize = 50;

const KINOPOISK_NAME_URL: &str = "https://www.kinopoisk.ru/name/";

/// Collapse the duplicated scheme prefix the API sometimes emits
/// (`https:https://` → `https://`). Idempotent; a permanent upstream defect
/// this pipeline tolerates rather than reports.
pub fn fix_photo_url(url: &str) -> String {
    match url.strip_prefix("https:https://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// Map a full person record into template-ready shape.
///
/// A non-positive `id` is a broken upstream contract and fails fast; every
/// other absent field degrades to an empty string or empty vec. Related
/// persons resolve through `fetcher` when supplied (see
/// [`resolve_all`](crate::resolver::resolve_all) for the skip semantics).
pub async fn normalize(
    record: &FullPersonRecord,
    folder: &str,
    fetcher: Option<&dyn PersonFetcher>,
) -> Result<NoteRecord, Error> {
    if record.id <= 0 {
        return Err(Error::MissingId);
    }

    let spouses = resolve_all(&record.spouses, folder, fetcher).await;

    let photo = record
        .photo
        .as_deref()
        .map(fix_photo_url)
        .unwrap_or_default();
    let kinopoisk_url = format!("{}{}/", KINOPOISK_NAME_URL, record.id);

    let name = record.name.as_deref().unwrap_or_default();
    let en_name = record.en_name.as_deref().unwrap_or_default();

    Ok(NoteRecord {
        id: record.id,
        name: short_values(&[name]),
        description: long_texts(&[record.description.as_deref().unwrap_or_default()]),
        poster_url: urls(&[photo.as_str()]),
        poster_markdown: image_markup(&photo),
        kinopoisk_url: urls(&[kinopoisk_url.as_str()]),
        en_name: short_values(&[en_name]),
        spouses,
        sex: record.sex.clone().unwrap_or_default(),
        birthday: date_only(record.birthday.as_deref()),
        death: date_only(record.death.as_deref()),
        age: record.age.map(|a| a.to_string()).unwrap_or_default(),
        growth: record.growth.map(|g| g.to_string()).unwrap_or_default(),
        name_for_file: clean_for_metadata(name),
        en_name_for_file: clean_for_metadata(en_name),
    })
}

// ---------------------------------------------------------------------------
// Field classes
// ---------------------------------------------------------------------------

fn surviving<'a>(items: &'a [&'a str]) -> impl Iterator<Item = &'a str> {
    items
        .iter()
        .copied()
        .filter(|item| !item.trim().is_empty())
        .take(MAX_ARRAY_ITEMS)
}

/// Short values (names): sanitized, blank-filtered, capped.
fn short_values(items: &[&str]) -> Vec<String> {
    surviving(items).map(clean_for_metadata).collect()
}

/// Long texts (descriptions): newline and whitespace runs collapsed to single
/// spaces, trimmed, double-quoted.
fn long_texts(items: &[&str]) -> Vec<String> {
    surviving(items)
        .map(|item| {
            let collapsed = item.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("\"{}\"", collapsed)
        })
        .collect()
}

/// URLs: trimmed, unquoted, capped.
fn urls(items: &[&str]) -> Vec<String> {
    surviving(items).map(|item| item.trim().to_string()).collect()
}

/// Image markup: embed reference for local paths, markdown link for web URLs.
fn image_markup(path: &str) -> Vec<String> {
    if path.trim().is_empty() {
        return Vec::new();
    }
    if !path.starts_with("http") {
        vec![format!("![[{}]]", path)]
    } else {
        vec![format!("![]({})", path)]
    }
}

/// Date-only portion of an ISO-like timestamp; absent → empty string.
fn date_only(timestamp: Option<&str>) -> String {
    timestamp
        .map(|t| t.split('T').next().unwrap_or(t).to_string())
        .unwrap_or_default()
}
