//! Category store: the full category list kept in memory and written back
//! as one JSON blob under a single key after every change.
//!
//! DESIGN
//! ======
//! Reads are served from memory. Each mutation that changes something
//! re-serializes the whole list and hands it to a [`KeyValueStore`]
//! backend, so the blob on disk is always a complete snapshot.
//!
//! ERROR HANDLING
//! ==============
//! Loading never fails. Missing data, an unreadable backend and an
//! undecodable blob all start the store empty. An undecodable blob is first
//! copied to `<key>.corrupt` so it is not silently lost on the next save.
//!
//! A read error leaves whatever is stored unknown, so the first save after
//! it reads the key again and copies any bytes it finds to `<key>.corrupt`
//! before overwriting. If that read fails too, the save is refused and the
//! stored blob stays untouched.
//!
//! Write failures are returned to the caller. The in-memory change is kept
//! so the next successful save persists it.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::consts::CORRUPT_KEY_SUFFIX;
use crate::model::{Category, WheelOption};

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode categories: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Durable byte storage addressed by string keys.
pub trait KeyValueStore {
    /// Bytes stored under `key`, or `None` if nothing has been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// In-process backend. Contents last as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with raw bytes, bypassing serialization.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// =============================================================================
// CATEGORY STORE
// =============================================================================

/// How the initial load went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Empty,
    Loaded { count: usize },
    /// The stored blob did not decode and was moved aside.
    Corrupt,
    /// The backend could not be read. The first save backs up whatever is
    /// stored before writing.
    Unreadable,
}

pub struct CategoryStore<S> {
    backend: S,
    key: String,
    categories: Vec<Category>,
    load_outcome: LoadOutcome,
    /// Set while the stored blob may hold data that was never loaded.
    backup_before_save: bool,
}

impl CategoryStore<FileStore> {
    /// Open the file-backed store described by `config`.
    #[must_use]
    pub fn open_file(config: &StoreConfig) -> Self {
        Self::open(FileStore::new(config.dir.clone()), config.key.clone())
    }
}

impl<S: KeyValueStore> CategoryStore<S> {
    /// Load the list stored under `key`. Never fails; see module docs.
    pub fn open(mut backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (categories, load_outcome) = load(&mut backend, &key);
        let backup_before_save = load_outcome == LoadOutcome::Unreadable;
        Self { backend, key, categories, load_outcome, backup_before_save }
    }

    #[must_use]
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All categories in creation order.
    #[must_use]
    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Append a new category. Returns `false` if its id is already present.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn create(&mut self, category: Category) -> Result<bool, StoreError> {
        if self.get(category.id).is_some() {
            return Ok(false);
        }
        self.categories.push(category);
        self.save()?;
        Ok(true)
    }

    /// Replace the category with the same id. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn update(&mut self, category: Category) -> Result<bool, StoreError> {
        let Some(slot) = self.categories.iter_mut().find(|c| c.id == category.id) else {
            return Ok(false);
        };
        *slot = category;
        self.save()?;
        Ok(true)
    }

    /// Remove the category with `id`. Returns `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Remove categories by list position, as a swipe-to-delete list does.
    /// Out-of-range offsets are skipped. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn delete_at(&mut self, offsets: &[usize]) -> Result<usize, StoreError> {
        let before = self.categories.len();
        let mut index = 0;
        self.categories.retain(|_| {
            let keep = !offsets.contains(&index);
            index += 1;
            keep
        });
        let removed = before - self.categories.len();
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    /// Append `option` to the category's wheel.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn add_option(&mut self, category_id: Uuid, option: WheelOption) -> Result<bool, StoreError> {
        let Some(category) = self.category_mut(category_id) else {
            return Ok(false);
        };
        category.options.push(option);
        self.save()?;
        Ok(true)
    }

    /// Replace the option with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn update_option(&mut self, category_id: Uuid, option: WheelOption) -> Result<bool, StoreError> {
        let Some(slot) = self
            .category_mut(category_id)
            .and_then(|c| c.options.iter_mut().find(|o| o.id == option.id))
        else {
            return Ok(false);
        };
        *slot = option;
        self.save()?;
        Ok(true)
    }

    /// Remove one option from a category.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be encoded or written.
    pub fn delete_option(&mut self, category_id: Uuid, option_id: Uuid) -> Result<bool, StoreError> {
        let Some(category) = self.category_mut(category_id) else {
            return Ok(false);
        };
        let before = category.options.len();
        category.options.retain(|o| o.id != option_id);
        if category.options.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if self.backup_before_save {
            self.back_up_unloaded()?;
        }
        let blob = serde_json::to_vec(&self.categories)?;
        self.backend.set(&self.key, &blob)?;
        debug!(key = %self.key, count = self.categories.len(), bytes = blob.len(), "categories saved");
        Ok(())
    }

    /// Copy whatever sits under the key to `<key>.corrupt`.
    fn back_up_unloaded(&mut self) -> Result<(), StoreError> {
        if let Some(bytes) = self.backend.get(&self.key)? {
            let backup_key = backup_key(&self.key);
            self.backend.set(&backup_key, &bytes)?;
            warn!(key = %self.key, backup_key = %backup_key, bytes = bytes.len(), "backed up unloaded category data");
        }
        self.backup_before_save = false;
        Ok(())
    }
}

fn backup_key(key: &str) -> String {
    format!("{key}{CORRUPT_KEY_SUFFIX}")
}

fn load<S: KeyValueStore>(backend: &mut S, key: &str) -> (Vec<Category>, LoadOutcome) {
    let bytes = match backend.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!(key, "no stored categories");
            return (Vec::new(), LoadOutcome::Empty);
        }
        Err(e) => {
            warn!(key, error = %e, "category storage unreadable; starting empty");
            return (Vec::new(), LoadOutcome::Unreadable);
        }
    };

    match serde_json::from_slice::<Vec<Category>>(&bytes) {
        Ok(categories) => {
            info!(key, count = categories.len(), "categories loaded");
            let count = categories.len();
            (categories, LoadOutcome::Loaded { count })
        }
        Err(e) => {
            let backup_key = backup_key(key);
            warn!(key, backup_key = %backup_key, error = %e, "corrupt category data; starting empty");
            if let Err(backup_err) = backend.set(&backup_key, &bytes) {
                warn!(backup_key = %backup_key, error = %backup_err, "failed to back up corrupt category data");
            }
            (Vec::new(), LoadOutcome::Corrupt)
        }
    }
}
