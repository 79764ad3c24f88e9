//! Artifact storage.
//!
//! Uploaded and generated binaries live in one flat directory under names of
//! the form `{unix_timestamp}_{suffix}`. The suffix records the artifact's
//! origin (`tg.jpg` for client uploads, `tts.mp3`, `doc.pdf`, or a sanitized
//! user-supplied filename). When a name is already taken a monotonic
//! disambiguator is inserted, so two saves a second apart (or within the
//! same second) never return the same filename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::atomic::atomic_write;
use crate::error::{Result, StoreError};

/// Stores binary artifacts and resolves their public URLs.
pub struct FileStore {
    dir: PathBuf,
    public_base: Option<String>,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// `public_base` is the configured public address used when formatting
    /// artifact URLs; when `None`, URLs fall back to the request host given
    /// per call, and to a root-relative path after that.
    pub fn new(dir: impl Into<PathBuf>, public_base: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base: public_base
                .map(|b| b.trim_end_matches('/').to_string())
                .filter(|b| !b.is_empty()),
        }
    }

    /// Writes `bytes` under a fresh timestamped name and returns it.
    pub fn save(&self, bytes: &[u8], hint: &str) -> Result<String> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StoreError::Directory {
                path: self.dir.clone(),
                source,
            })?;
        }

        let name = self.unique_name(&sanitize_hint(hint));
        atomic_write(&self.dir.join(&name), bytes)?;
        Ok(name)
    }

    /// Reads an artifact back, rejecting names that escape the store
    /// directory.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.checked_path(name)?;
        fs::read(&path).map_err(|source| StoreError::Read { path, source })
    }

    /// Absolute path of a stored artifact, for attachment delivery.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Removes an artifact. Callers sending ephemeral outputs treat a
    /// failure here as non-fatal.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.checked_path(name)?;
        fs::remove_file(&path).map_err(|source| StoreError::Write { path, source })
    }

    /// Public URL for an artifact: `{base}/files/{escaped-name}` where the
    /// base is the configured public address, then the request host, then
    /// empty (yielding a root-relative path).
    pub fn public_url(&self, name: &str, request_host: Option<&str>) -> String {
        let base = self
            .public_base
            .as_deref()
            .or(request_host)
            .unwrap_or("")
            .trim_end_matches('/');
        let escaped = urlencoding::encode(name);
        if base.is_empty() {
            format!("/files/{escaped}")
        } else {
            format!("{base}/files/{escaped}")
        }
    }

    fn checked_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }

    // Second-granularity timestamps can collide under concurrent writes;
    // the counter keeps returned names unique against what is on disk.
    fn unique_name(&self, hint: &str) -> String {
        let ts = Utc::now().timestamp();
        let mut name = format!("{ts}_{hint}");
        let mut n = 1u32;
        while self.dir.join(&name).exists() {
            name = format!("{ts}-{n}_{hint}");
            n += 1;
        }
        name
    }
}

/// Reduces an untrusted filename hint to a bare, safe file name.
fn sanitize_hint(hint: &str) -> String {
    let base = Path::new(hint)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    let cleaned = base.replace("..", "_");
    if cleaned.is_empty() {
        "upload.bin".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_read_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        let name = store.save(b"bytes", "tg.jpg").unwrap();

        assert!(name.ends_with("_tg.jpg"));
        assert_eq!(store.read(&name).unwrap(), b"bytes");
    }

    #[test]
    fn test_save_twice_never_reuses_a_name() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        // Same second, same hint: the second call must disambiguate.
        let first = store.save(b"one", "tts.mp3").unwrap();
        let second = store.save(b"two", "tts.mp3").unwrap();

        assert_ne!(first, second);
        assert_eq!(store.read(&first).unwrap(), b"one");
        assert_eq!(store.read(&second).unwrap(), b"two");
    }

    #[test]
    fn test_read_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        for name in ["../secret", "a/../b", "..", "sub/file", "back\\slash"] {
            assert!(
                matches!(store.read(name), Err(StoreError::InvalidName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_strips_path_components_from_hint() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        let name = store.save(b"x", "../../etc/passwd").unwrap();

        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(store.path_of(&name).exists());
    }

    #[test]
    fn test_delete_removes_artifact() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        let name = store.save(b"x", "doc.pdf").unwrap();
        store.delete(&name).unwrap();

        assert!(store.read(&name).is_err());
    }

    #[test]
    fn test_public_url_prefers_configured_base() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), Some("https://bot.example.com/".into()));

        assert_eq!(
            store.public_url("a b.jpg", Some("http://other.host")),
            "https://bot.example.com/files/a%20b.jpg"
        );
    }

    #[test]
    fn test_public_url_falls_back_to_request_host() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        assert_eq!(
            store.public_url("photo123.jpg", Some("http://example.com")),
            "http://example.com/files/photo123.jpg"
        );
    }

    #[test]
    fn test_public_url_root_relative_without_base() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path(), None);

        assert_eq!(store.public_url("photo123.jpg", None), "/files/photo123.jpg");
    }
}
