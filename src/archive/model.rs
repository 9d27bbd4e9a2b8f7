//! Archive, cat and document structures

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label substituted for a cat whose name is empty after sanitization
pub const PLACEHOLDER_CAT_NAME: &str = "Unnamed Cat";

/// Title substituted for a document whose title is empty
pub const PLACEHOLDER_DOC_TITLE: &str = "Untitled Document";

/// Accent color assigned to cats that carry none
pub const DEFAULT_ACCENT_COLOR: &str = "#b5835a";

/// MIME type assumed for documents without one
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// File name assumed for documents without one
pub const DEFAULT_FILE_NAME: &str = "document";

/// The whole per-owner archive: every cat, their documents, and which cat
/// is currently selected for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub cats: Vec<Cat>,
    /// Either absent or equal to some cat's id; the normalizer enforces this
    #[serde(default)]
    pub selected_cat_id: Option<String>,
    pub last_updated: String,
}

/// A single cat and the documents it exclusively owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub birthdate: String,
    pub accent_color: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// A record attached to one cat. `content` is a self-describing data URL
/// so the blob travels inside the JSON archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_date: String,
    pub uploaded_at: String,
    pub file_name: String,
    pub file_type: String,
    /// Declared size in bytes; kept as stored, not re-derived from content
    pub size: u64,
    #[serde(default)]
    pub content: String,
}

impl Archive {
    pub fn find_cat(&self, id: &str) -> Option<&Cat> {
        self.cats.iter().find(|c| c.id == id)
    }

    pub fn find_cat_mut(&mut self, id: &str) -> Option<&mut Cat> {
        self.cats.iter_mut().find(|c| c.id == id)
    }

    /// Append a cat; a freshly added cat becomes the selection if none is set
    pub fn add_cat(&mut self, cat: Cat) {
        if self.selected_cat_id.is_none() {
            self.selected_cat_id = Some(cat.id.clone());
        }
        self.cats.push(cat);
        self.touch();
    }

    /// Stamp the archive as modified now
    pub fn touch(&mut self) {
        self.last_updated = now_timestamp();
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self {
            cats: Vec::new(),
            selected_cat_id: None,
            last_updated: now_timestamp(),
        }
    }
}

impl Cat {
    /// Create a cat with a fresh id and default styling
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            breed: String::new(),
            birthdate: String::new(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            notes: String::new(),
            documents: Vec::new(),
        }
    }
}

impl Document {
    /// Create a document from raw file bytes, embedding them as a data URL
    pub fn new(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        let file_type = file_type.into();
        Self {
            id: fresh_id(),
            title: title.into(),
            description: String::new(),
            document_date: String::new(),
            uploaded_at: now_timestamp(),
            file_name: file_name.into(),
            content: make_data_url(&file_type, bytes),
            file_type,
            size: bytes.len() as u64,
        }
    }

    /// Decode the embedded content back to raw bytes, if present and valid
    pub fn content_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.content.split(";base64,").nth(1)?;
        BASE64.decode(encoded).ok()
    }
}

/// Current time as an RFC 3339 UTC string (millisecond precision)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate a unique identifier for a cat or document
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Wrap raw bytes as a `data:<mime>;base64,<...>` embedded resource
pub fn make_data_url(file_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", file_type, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_content_roundtrip() {
        let bytes = [0x00, 0x01, 0xFF, 0x42];
        let doc = Document::new("Vet record", "scan.pdf", "application/pdf", &bytes);

        assert_eq!(doc.size, 4);
        assert!(doc.content.starts_with("data:application/pdf;base64,"));
        assert_eq!(doc.content_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_content_bytes_rejects_plain_string() {
        let mut doc = Document::new("t", "f", "text/plain", b"x");
        doc.content = "just some text".to_string();

        assert!(doc.content_bytes().is_none());
    }

    #[test]
    fn test_add_cat_selects_first() {
        let mut archive = Archive::default();
        let cat = Cat::new("Miso");
        let id = cat.id.clone();

        archive.add_cat(cat);
        archive.add_cat(Cat::new("Ash"));

        assert_eq!(archive.selected_cat_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        assert_ne!(fresh_id(), fresh_id());
    }
}
