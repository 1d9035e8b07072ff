//! Upstream kinopoisk.dev payload shapes and the template-ready note record.

use serde::{Deserialize, Serialize};

/// Partial reference to a related person as the API ships it.
///
/// Either field may be absent; both absent is a valid (empty) stub.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonStub {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Which of the two stub fields actually carry data.
///
/// Makes the resolution branches exhaustive instead of nested presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubKind {
    NameAndId,
    NameOnly,
    IdOnly,
    Empty,
}

impl PersonStub {
    /// Classify the stub. A whitespace-only name counts as absent.
    pub fn kind(&self) -> StubKind {
        let has_name = self
            .name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false);
        match (has_name, self.id) {
            (true, Some(_)) => StubKind::NameAndId,
            (true, None) => StubKind::NameOnly,
            (false, Some(_)) => StubKind::IdOnly,
            (false, None) => StubKind::Empty,
        }
    }
}

/// Full person payload from `GET /v1.4/person/{id}`.
///
/// `id` is the stable external identifier and the join key for all link
/// construction; everything else is optional and degrades to empty output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPersonRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub en_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub death: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub growth: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub spouses: Vec<PersonStub>,
}

/// One raw search result awaiting ranking.
///
/// `sex` and `age` are display-only here; the search endpoint is inconsistent
/// about emitting them as strings or numbers, so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCandidate {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub en_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, deserialize_with = "de_display_string")]
    pub sex: String,
    #[serde(default, deserialize_with = "de_display_string")]
    pub age: String,
}

impl SearchCandidate {
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().map(|p| !p.is_empty()).unwrap_or(false)
    }
}

fn de_display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Template-ready person record.
///
/// Free-text fields are string arrays so they embed as multi-line frontmatter
/// lists; an empty vec means "absent", never null. Numeric and date fields
/// stay scalar strings. Every array field is capped at
/// [`crate::normalize::MAX_ARRAY_ITEMS`] elements in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: i64,
    pub name: Vec<String>,
    pub description: Vec<String>,
    pub poster_url: Vec<String>,
    pub poster_markdown: Vec<String>,
    pub kinopoisk_url: Vec<String>,
    pub en_name: Vec<String>,
    /// Quoted wiki links to related persons, skipped stubs omitted.
    pub spouses: Vec<String>,
    pub sex: String,
    pub birthday: String,
    pub death: String,
    pub age: String,
    pub growth: String,
    pub name_for_file: String,
    pub en_name_for_file: String,
}
