use super::types::SavedPosition;
use crate::errors::StoreError;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists playback positions per video id
#[cfg_attr(test, mockall::automock)]
pub trait PositionStore {
    fn save(&mut self, video_id: &str, position: &SavedPosition) -> Result<(), StoreError>;
    fn load(&self, video_id: &str) -> Result<Option<SavedPosition>, StoreError>;
}

/// In-process store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    entries: HashMap<String, SavedPosition>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PositionStore for MemoryPositionStore {
    fn save(&mut self, video_id: &str, position: &SavedPosition) -> Result<(), StoreError> {
        self.entries.insert(video_id.to_string(), position.clone());
        Ok(())
    }

    fn load(&self, video_id: &str) -> Result<Option<SavedPosition>, StoreError> {
        Ok(self.entries.get(video_id).cloned())
    }
}

/// Single JSON document mapping video ids to saved positions
#[derive(Debug)]
pub struct JsonFilePositionStore {
    path: PathBuf,
}

impl JsonFilePositionStore {
    /// The file is created on first save.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, SavedPosition>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PositionStore for JsonFilePositionStore {
    fn save(&mut self, video_id: &str, position: &SavedPosition) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(video_id.to_string(), position.clone());

        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(
            "Saved position {:.1}s for {} to {}",
            position.position_seconds,
            video_id,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self, video_id: &str) -> Result<Option<SavedPosition>, StoreError> {
        Ok(self.read_all()?.remove(video_id))
    }
}
