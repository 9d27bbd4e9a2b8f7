//! Session owning the canonical in-memory archive
//!
//! All mutation funnels through here: the session is the single place that
//! swaps a freshly imported archive into memory, and it only does so after
//! the whole import pipeline has succeeded and the store has accepted the
//! new copy. A failed or abandoned import leaves both the in-memory
//! archive and the persisted copy exactly as they were.

use crate::archive::{normalize, Archive, Cat, Document};
use crate::codec;
use crate::error::{CatVaultError, Result};
use crate::store::ArchiveStore;

pub struct Session<S: ArchiveStore> {
    archive: Archive,
    store: S,
}

impl<S: ArchiveStore> Session<S> {
    /// Load the stored archive through the normalizer, or start from the
    /// built-in default when nothing is stored yet.
    pub fn open(store: S) -> Result<Self> {
        let archive = match store.load()? {
            Some(raw) => normalize(&raw),
            None => Archive::default(),
        };

        Ok(Self { archive, store })
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Add a cat and persist the updated archive
    pub fn add_cat(&mut self, cat: Cat) -> Result<Cat> {
        let added = cat.clone();
        self.archive.add_cat(cat);
        self.store.save(&self.archive)?;

        Ok(added)
    }

    /// Make an existing cat the current selection
    pub fn select_cat(&mut self, id: &str) -> Result<()> {
        if self.archive.find_cat(id).is_none() {
            return Err(CatVaultError::CatNotFound(id.to_string()));
        }

        self.archive.selected_cat_id = Some(id.to_string());
        self.archive.touch();
        self.store.save(&self.archive)
    }

    /// Attach a document to a cat and persist the updated archive
    pub fn add_document(&mut self, cat_id: &str, document: Document) -> Result<()> {
        let cat = self
            .archive
            .find_cat_mut(cat_id)
            .ok_or_else(|| CatVaultError::CatNotFound(cat_id.to_string()))?;

        cat.documents.push(document);
        self.archive.touch();
        self.store.save(&self.archive)
    }

    /// Encrypt the current archive under a password.
    ///
    /// Read-only: exporting never changes the session or the store.
    pub fn export(&self, password: &str) -> Result<Vec<u8>> {
        codec::export_archive(&self.archive, password)
    }

    /// Import an encrypted archive, replacing the current one.
    ///
    /// The swap happens only after decode, key derivation, decryption,
    /// parsing, normalization and the store write have all succeeded.
    pub fn import(&mut self, bytes: &[u8], password: &str) -> Result<&Archive> {
        let imported = codec::import_archive(bytes, password)?;

        self.store.save(&imported)?;
        self.archive = imported;

        Ok(&self.archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use tempfile::tempdir;

    fn open_session(dir: &tempfile::TempDir) -> Session<JsonFileStore> {
        Session::open(JsonFileStore::new(dir.path().join("archive.json"))).unwrap()
    }

    #[test]
    fn test_open_without_store_file_gives_default() {
        let dir = tempdir().unwrap();
        let session = open_session(&dir);

        assert!(session.archive().cats.is_empty());
        assert!(session.archive().selected_cat_id.is_none());
    }

    #[test]
    fn test_add_cat_persists_across_sessions() {
        let dir = tempdir().unwrap();

        let mut session = open_session(&dir);
        let id = session.add_cat(Cat::new("Miso")).unwrap().id.clone();

        let reopened = open_session(&dir);
        assert_eq!(reopened.archive().cats[0].id, id);
        assert_eq!(reopened.archive().cats[0].name, "Miso");
    }

    #[test]
    fn test_select_unknown_cat_fails() {
        let dir = tempdir().unwrap();
        let mut session = open_session(&dir);

        let result = session.select_cat("nope");
        assert!(matches!(result, Err(CatVaultError::CatNotFound(_))));
    }

    #[test]
    fn test_add_document_to_cat() {
        let dir = tempdir().unwrap();
        let mut session = open_session(&dir);
        let cat_id = session.add_cat(Cat::new("Miso")).unwrap().id.clone();

        let doc = Document::new("Vax", "vax.pdf", "application/pdf", b"pdfbytes");
        session.add_document(&cat_id, doc).unwrap();

        assert_eq!(session.archive().cats[0].documents.len(), 1);
    }

    #[test]
    fn test_import_replaces_archive() {
        let dir = tempdir().unwrap();
        let mut session = open_session(&dir);
        session.add_cat(Cat::new("Old cat")).unwrap();

        let mut other = Archive::default();
        other.add_cat(Cat::new("New cat"));
        let bytes = codec::export_archive(&other, "pw").unwrap();

        session.import(&bytes, "pw").unwrap();

        assert_eq!(session.archive().cats.len(), 1);
        assert_eq!(session.archive().cats[0].name, "New cat");

        // The swap also reached the store
        let reopened = open_session(&dir);
        assert_eq!(reopened.archive().cats[0].name, "New cat");
    }

    /// Store whose saves always fail, as if the disk filled up
    struct BrokenStore;

    impl ArchiveStore for BrokenStore {
        fn load(&self) -> crate::error::Result<Option<serde_json::Value>> {
            Ok(None)
        }

        fn save(&self, _archive: &Archive) -> crate::error::Result<()> {
            Err(CatVaultError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "no space left on device",
            )))
        }
    }

    #[test]
    fn test_import_with_failing_store_keeps_current_archive() {
        let mut session = Session::open(BrokenStore).unwrap();
        let before = session.archive().clone();

        let mut other = Archive::default();
        other.add_cat(Cat::new("New cat"));
        let bytes = codec::export_archive(&other, "pw").unwrap();

        // Decryption succeeds but the store write fails: the in-memory
        // archive must not be swapped.
        let result = session.import(&bytes, "pw");

        assert!(matches!(result, Err(CatVaultError::Io(_))));
        assert_eq!(session.archive(), &before);
    }

    #[test]
    fn test_failed_import_leaves_archive_untouched() {
        let dir = tempdir().unwrap();
        let mut session = open_session(&dir);
        session.add_cat(Cat::new("Keeper")).unwrap();
        let before = session.archive().clone();

        let bytes = codec::export_archive(&Archive::default(), "pw").unwrap();
        let result = session.import(&bytes, "wrong password");

        assert!(matches!(result, Err(CatVaultError::AuthenticationFailure)));
        assert_eq!(session.archive(), &before);

        let reopened = open_session(&dir);
        assert_eq!(reopened.archive(), &before);
    }
}
