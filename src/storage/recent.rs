//! Recent-icons history
//!
//! Most-recent-first list of icons the user acted on, deduplicated by id and
//! capped at a configurable length. Persisted as a JSON array; every write
//! goes through a sibling temp file that is renamed over the target.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::icon::IconRecord;

/// Errors that can occur while persisting history
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("History lock poisoned")]
    Poisoned,
}

/// Persisted, ordered history of selected icons
#[derive(Debug)]
pub struct RecentIcons {
    path: PathBuf,
    limit: usize,
    entries: Mutex<Vec<IconRecord>>,
}

impl RecentIcons {
    /// Open the history at `path`, loading whatever is already persisted
    ///
    /// A missing or unreadable file yields an empty history.
    pub fn open(path: impl Into<PathBuf>, limit: usize) -> Self {
        let path = path.into();
        let mut entries = read_entries(&path);
        entries.truncate(limit);
        log::debug!("Loaded {} recent icon(s) from {}", entries.len(), path.display());

        Self {
            path,
            limit,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the history, most recent first
    pub fn load(&self) -> Vec<IconRecord> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Move `icon` to the front (inserting it if new) and persist
    ///
    /// The in-memory history only changes once the file has been written.
    pub fn try_append(&self, icon: &IconRecord) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let mut updated = Vec::with_capacity(entries.len() + 1);
        updated.push(icon.clone());
        updated.extend(entries.iter().filter(|existing| existing.id() != icon.id()).cloned());
        updated.truncate(self.limit);

        write_entries(&self.path, &updated)?;
        *entries = updated;
        Ok(())
    }

    /// Best-effort append; failures are logged and swallowed
    pub fn append(&self, icon: &IconRecord) {
        if let Err(e) = self.try_append(icon) {
            log::warn!("Failed to record recent icon {}: {}", icon.id(), e);
        }
    }

    /// Fire-and-forget append on a background thread
    pub fn append_in_background(self: &Arc<Self>, icon: IconRecord) -> JoinHandle<()> {
        let store = Arc::clone(self);
        thread::spawn(move || store.append(&icon))
    }

    /// Remove the entry with `id`, returning whether it was present
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let updated: Vec<IconRecord> = entries
            .iter()
            .filter(|existing| existing.id() != id)
            .cloned()
            .collect();
        if updated.len() == entries.len() {
            return Ok(false);
        }

        write_entries(&self.path, &updated)?;
        *entries = updated;
        Ok(true)
    }

    /// Drop every entry
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        write_entries(&self.path, &[])?;
        entries.clear();
        Ok(())
    }
}

fn read_entries(path: &Path) -> Vec<IconRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read recent icons from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring corrupt recent icons file {}: {}", path.display(), e);
        Vec::new()
    })
}

/// Serialize fully, then atomically replace the target
fn write_entries(path: &Path, entries: &[IconRecord]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(entries)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    temp.write_all(&json)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| StoreError::IoError(e.error))?;
    Ok(())
}
