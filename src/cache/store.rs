// src/cache/store.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::freshness::file_is_outdated;
use crate::error::{Error, Result};
use crate::table::ExtractedTable;

/// What we found in the structured cache.
#[derive(Debug)]
pub enum CacheState {
    Absent,
    Outdated,
    /// File exists and is fresh but does not decode.
    Corrupt(Error),
    Fresh(ExtractedTable),
}

impl CacheState {
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, CacheState::Fresh(_))
    }
}

/// JSON file holding `[headers, body]`.
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Classify the cache file, decoding it only when it is fresh.
    pub fn load(&self, max_age_days: u32) -> Result<CacheState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "data file does not exist");
            return Ok(CacheState::Absent);
        }
        if file_is_outdated(&self.path, max_age_days)? {
            debug!(path = %self.path.display(), "data file is outdated");
            return Ok(CacheState::Outdated);
        }

        debug!(path = %self.path.display(), "reading from file");
        let bytes = fs::read(&self.path).map_err(|e| Error::fs(&self.path, e))?;
        match serde_json::from_slice::<ExtractedTable>(&bytes) {
            Ok(table) => Ok(CacheState::Fresh(table)),
            Err(source) => {
                let err = Error::CacheDecode {
                    path: self.path.clone(),
                    source,
                };
                warn!(error = %err, "discarding corrupt cache");
                Ok(CacheState::Corrupt(err))
            }
        }
    }

    /// Write the table as pretty JSON, creating the parent directory if needed.
    pub fn save(&self, table: &ExtractedTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }
        let json = serde_json::to_string_pretty(table).map_err(Error::Encode)?;
        fs::write(&self.path, json).map_err(|e| Error::fs(&self.path, e))?;
        debug!(path = %self.path.display(), "wrote data file");
        Ok(())
    }
}
