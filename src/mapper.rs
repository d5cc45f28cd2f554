//! Conversions between the two external representations (metadata provider
//! payloads, search-index documents) and [`MovieRecord`].
//!
//! The metadata mapping is total over any syntactically valid payload:
//! missing or oddly shaped sub-structures degrade to absent fields, they
//! never fail the conversion. Only a payload without a usable movie id is
//! an error.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{ATTRIBUTE_FIELDS, MovieRecord},
};

/// Flat document ready to persist to the search index. `fields` go through
/// the index's text channel, `variables` through its numeric docvar channel.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexPayload {
    pub fields: BTreeMap<String, String>,
    pub variables: BTreeMap<u32, f64>,
}

/// Docvar slot carrying `duration_minutes`, queried via range filters.
pub const DURATION_VARIABLE: u32 = 0;

pub fn from_metadata(payload: &Value) -> AppResult<MovieRecord> {
    let external_id = id_string(payload.get("id")).ok_or(AppError::UpstreamDataMissing)?;

    Ok(MovieRecord {
        name: str_field(payload, "name").unwrap_or_default(),
        overview: str_field(payload, "overview").unwrap_or_default(),
        language: str_field(payload, "language").unwrap_or_default(),
        cover_url: image_url(payload, "cover"),
        thumb_url: image_url(payload, "thumb"),
        year: release_year(payload),
        external_id,
        alternate_id: str_field(payload, "imdb_id"),
        duration_minutes: payload
            .get("runtime")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok()),
        certification: str_field(payload, "certification"),
        genres: joined_genres(payload),
    })
}

/// Structural deserialization of a flat index document. Every field is
/// optional, unknown keys are ignored, nothing validates.
pub fn from_index_document(doc: &BTreeMap<String, String>) -> MovieRecord {
    MovieRecord {
        name: doc.get("name").cloned().unwrap_or_default(),
        overview: doc.get("overview").cloned().unwrap_or_default(),
        language: doc.get("language").cloned().unwrap_or_default(),
        cover_url: opt(doc, "cover_url"),
        thumb_url: opt(doc, "thumb_url"),
        year: opt(doc, "year").and_then(|s| s.parse().ok()),
        external_id: doc.get("external_id").cloned().unwrap_or_default(),
        alternate_id: opt(doc, "alternate_id"),
        duration_minutes: opt(doc, "duration_minutes").and_then(|s| s.parse().ok()),
        certification: opt(doc, "certification"),
        genres: opt(doc, "genres"),
    }
}

/// Flattens a record for persistence. Absent optionals become empty strings
/// (the index stores flat text fields), and two bookkeeping fields are
/// injected: the persist `timestamp` (epoch seconds) and the `all = "true"`
/// marker that backs match-everything queries.
pub fn to_index_payload(record: &MovieRecord) -> IndexPayload {
    let mut fields = BTreeMap::new();
    for (name, value) in ATTRIBUTE_FIELDS.into_iter().zip([
        record.name.clone(),
        record.overview.clone(),
        record.language.clone(),
        record.cover_url.clone().unwrap_or_default(),
        record.thumb_url.clone().unwrap_or_default(),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
        record.external_id.clone(),
        record.alternate_id.clone().unwrap_or_default(),
        record.duration_minutes.map(|d| d.to_string()).unwrap_or_default(),
        record.certification.clone().unwrap_or_default(),
        record.genres.clone().unwrap_or_default(),
    ]) {
        fields.insert(name.to_string(), value);
    }
    fields.insert("timestamp".to_string(), jiff::Timestamp::now().as_second().to_string());
    fields.insert("all".to_string(), "true".to_string());

    let mut variables = BTreeMap::new();
    if let Some(minutes) = record.duration_minutes {
        variables.insert(DURATION_VARIABLE, f64::from(minutes));
    }

    IndexPayload { fields, variables }
}

fn opt(doc: &BTreeMap<String, String>, key: &str) -> Option<String> {
    doc.get(key).filter(|s| !s.is_empty()).cloned()
}

fn str_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// First image entry tagged with the requested size, if any.
fn image_url(payload: &Value, size: &str) -> Option<String> {
    payload
        .get("images")?
        .as_array()?
        .iter()
        .find(|entry| entry.get("size").and_then(Value::as_str) == Some(size))
        .and_then(|entry| entry.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn release_year(payload: &Value) -> Option<i16> {
    let released = payload.get("released")?.as_str()?;
    jiff::civil::Date::strptime("%Y-%m-%d", released).ok().map(|d| d.year())
}

/// Category names, alphabetically sorted and joined. Sorting happens here,
/// at mapping time, so queries and views see a stable order.
fn joined_genres(payload: &Value) -> Option<String> {
    let mut names: Vec<&str> = payload
        .get("categories")?
        .as_array()?
        .iter()
        .filter_map(|c| c.get("name").and_then(Value::as_str))
        .collect();
    if names.is_empty() {
        return None;
    }
    names.sort_unstable();
    Some(names.join(", "))
}
