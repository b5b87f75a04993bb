//! File-based SlotStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::Result;
use super::traits::SlotStore;

/// File-based implementation of [`SlotStore`].
///
/// Stores each slot as an individual UTF-8 JSON file under the base
/// directory:
///
/// ```text
/// {base_dir}/
///   cities.json
///   markers.json
/// ```
///
/// Writes go through a temp file followed by an atomic rename, so a crash
/// mid-write leaves the previous slot contents intact.
pub struct FileSlotStore {
    base_dir: PathBuf,
}

impl FileSlotStore {
    /// Creates a file-backed store rooted at `base_dir`, creating the
    /// directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)?;
        tracing::debug!("loaded slot '{}' from {}", key, path.display());

        Ok(Some(raw))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("wrote slot '{}' to {}", key, path.display());

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("removed slot '{}'", key);
        }

        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let entries = fs::read_dir(&self.base_dir)?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                fs::remove_file(&path)?;
            }
        }

        tracing::debug!("cleared all slots under {}", self.base_dir.display());

        Ok(())
    }
}
