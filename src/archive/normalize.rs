//! Archive normalizer
//!
//! Turns an arbitrary decoded value, possibly hostile or corrupted, into a
//! canonical [`Archive`]. This function
//! never fails on malformed data; it repairs. Already-canonical data passes
//! through untouched, so `normalize(normalize(x)) == normalize(x)`.

use std::collections::HashSet;

use chrono::DateTime;
use serde_json::Value;

use super::model::{
    fresh_id, now_timestamp, Archive, Cat, Document, DEFAULT_ACCENT_COLOR, DEFAULT_FILE_NAME,
    DEFAULT_FILE_TYPE, PLACEHOLDER_CAT_NAME, PLACEHOLDER_DOC_TITLE,
};

/// Repair an arbitrary decoded structure into a canonical archive.
///
/// Anything that is not object-like at all becomes the built-in default
/// archive; inside an object, every missing or misshapen field is coerced
/// or defaulted, ids are made unique, and the selection is re-anchored to
/// an existing cat.
pub fn normalize(raw: &Value) -> Archive {
    let Some(obj) = raw.as_object() else {
        return Archive::default();
    };

    let mut seen_ids = HashSet::new();
    let cats: Vec<Cat> = obj
        .get("cats")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|item| normalize_cat(item, &mut seen_ids))
                .collect()
        })
        .unwrap_or_default();

    let selected_cat_id = obj
        .get("selectedCatId")
        .and_then(Value::as_str)
        .filter(|id| cats.iter().any(|c| c.id == *id))
        .map(str::to_string)
        .or_else(|| cats.first().map(|c| c.id.clone()));

    let last_updated = obj
        .get("lastUpdated")
        .and_then(Value::as_str)
        .filter(|s| is_valid_timestamp(s))
        .map(str::to_string)
        .unwrap_or_else(now_timestamp);

    Archive {
        cats,
        selected_cat_id,
        last_updated,
    }
}

fn normalize_cat(raw: &Value, seen_ids: &mut HashSet<String>) -> Cat {
    let mut doc_ids = HashSet::new();
    let documents = raw
        .get("documents")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|item| normalize_document(item, &mut doc_ids))
                .collect()
        })
        .unwrap_or_default();

    Cat {
        id: unique_id(raw.get("id"), seen_ids),
        name: string_or(raw.get("name"), PLACEHOLDER_CAT_NAME),
        breed: trimmed_string(raw.get("breed")),
        birthdate: raw
            .get("birthdate")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        accent_color: string_or(raw.get("accentColor"), DEFAULT_ACCENT_COLOR),
        notes: trimmed_string(raw.get("notes")),
        documents,
    }
}

fn normalize_document(raw: &Value, seen_ids: &mut HashSet<String>) -> Document {
    Document {
        id: unique_id(raw.get("id"), seen_ids),
        title: string_or(raw.get("title"), PLACEHOLDER_DOC_TITLE),
        description: trimmed_string(raw.get("description")),
        document_date: raw
            .get("documentDate")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        uploaded_at: raw
            .get("uploadedAt")
            .and_then(Value::as_str)
            .filter(|s| is_valid_timestamp(s))
            .map(str::to_string)
            .unwrap_or_else(now_timestamp),
        file_name: string_or(raw.get("fileName"), DEFAULT_FILE_NAME),
        file_type: string_or(raw.get("fileType"), DEFAULT_FILE_TYPE),
        size: coerce_size(raw.get("size")),
        content: raw
            .get("content")
            .and_then(Value::as_str)
            .filter(|s| is_data_url(s))
            .unwrap_or_default()
            .to_string(),
    }
}

/// Keep a usable stored id, otherwise mint a fresh one; either way the
/// result is guaranteed unique within `seen_ids`. Duplicates keep their
/// first occurrence and every later one is reassigned.
fn unique_id(raw: Option<&Value>, seen_ids: &mut HashSet<String>) -> String {
    let mut id = raw
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(fresh_id);

    while !seen_ids.insert(id.clone()) {
        id = fresh_id();
    }
    id
}

/// Trimmed, whitespace-collapsed string; the fallback if nothing is left
fn string_or(raw: Option<&Value>, fallback: &str) -> String {
    let sanitized = raw
        .and_then(Value::as_str)
        .map(sanitize_whitespace)
        .unwrap_or_default();

    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}

/// Trimmed string, or empty when absent or not a string
fn trimmed_string(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Collapse runs of whitespace into single spaces and trim the ends
fn sanitize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Coerce a size field to a non-negative integer, falling back to 0.
/// Accepts integers, non-negative floats (truncated) and numeric strings.
fn coerce_size(raw: Option<&Value>) -> u64 {
    match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// A content blob is kept only when it is a self-describing embedded
/// resource (`data:<mime>;base64,...`); anything else is dropped.
fn is_data_url(s: &str) -> bool {
    s.starts_with("data:") && s.contains(";base64,")
}

fn is_valid_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
}
