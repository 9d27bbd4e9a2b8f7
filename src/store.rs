//! Local archive persistence
//!
//! The core never trusts what a store hands back: `load` returns the raw
//! decoded value and only the normalizer turns it into an [`Archive`].
//! The file store keeps the working copy as plain JSON next to wherever
//! the caller points it; encryption is the export pipeline's job, not the
//! local store's.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::archive::Archive;
use crate::error::{CatVaultError, Result};

/// Persistence interface the session works against.
///
/// Implementations hand back whatever structure they have, possibly stale
/// or hand-edited, and accept only canonical archives for saving.
pub trait ArchiveStore {
    /// Load the raw stored value, or `None` if nothing is stored yet
    fn load(&self) -> Result<Option<Value>>;

    /// Persist a canonical archive
    fn save(&self, archive: &Archive) -> Result<()>;
}

/// Archive store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn scratch_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ArchiveStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)?;
        let raw = serde_json::from_slice(&data)
            .map_err(|e| CatVaultError::InvalidStore(e.to_string()))?;

        Ok(Some(raw))
    }

    fn save(&self, archive: &Archive) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(archive)
            .map_err(|e| CatVaultError::InvalidStore(e.to_string()))?;

        // Write a sibling scratch file and rename it over the target, so a
        // failed or interrupted write never truncates the existing archive.
        let scratch = self.scratch_path();
        let mut file = File::create(&scratch)?;
        file.write_all(&json)?;
        file.sync_all()?;

        // The working copy is plaintext; keep it owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&scratch, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&scratch, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{normalize, Cat};
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("archive.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("archive.json"));

        let mut archive = Archive::default();
        archive.add_cat(Cat::new("Miso"));
        store.save(&archive).unwrap();

        let raw = store.load().unwrap().unwrap();
        assert_eq!(normalize(&raw), archive);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/archive.json"));

        store.save(&Archive::default()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_failed_save_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.json");
        let store = JsonFileStore::new(&path);

        let mut archive = Archive::default();
        archive.add_cat(Cat::new("Miso"));
        store.save(&archive).unwrap();

        // Block the scratch path so the next write fails before the rename
        fs::create_dir(dir.path().join("archive.json.tmp")).unwrap();

        let result = store.save(&Archive::default());
        assert!(result.is_err());

        // The previously persisted copy is intact
        let raw = store.load().unwrap().unwrap();
        assert_eq!(normalize(&raw), archive);
    }

    #[test]
    fn test_save_leaves_no_scratch_file_behind() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("archive.json"));

        store.save(&Archive::default()).unwrap();

        assert!(!dir.path().join("archive.json.tmp").exists());
    }

    #[test]
    fn test_load_rejects_non_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.json");
        fs::write(&path, b"{{{{").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(
            store.load(),
            Err(CatVaultError::InvalidStore(_))
        ));
    }
}
