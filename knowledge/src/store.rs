//! Knowledge store: loads the plant catalogue from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::record::PlantRecord;

/// Default catalogue path relative to the working directory.
pub const DEFAULT_KNOWLEDGE_FILE: &str = "data/plants.json";

/// Loads plant records from a JSON file.
///
/// The catalogue is read on each `load()` call; callers cache the result
/// (the index builder embeds it once per process).
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store pointing at `KNOWLEDGE_FILE` from the environment, or the default path.
    pub fn from_env() -> Self {
        let path = std::env::var("KNOWLEDGE_FILE")
            .unwrap_or_else(|_| DEFAULT_KNOWLEDGE_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all plant records.
    ///
    /// Fails when the file cannot be read or parsed; callers treat this as
    /// non-fatal for chat (retrieval degrades to empty context) but fatal for
    /// index construction when nothing can be loaded.
    pub fn load(&self) -> Result<Vec<PlantRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read knowledge file {}", self.path.display()))?;
        let records: Vec<PlantRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse knowledge file {}", self.path.display()))?;

        if records.is_empty() {
            warn!(path = %self.path.display(), "Knowledge file contains no records");
        } else {
            info!(
                path = %self.path.display(),
                count = records.len(),
                "Loaded plant knowledge catalogue"
            );
        }
        Ok(records)
    }

    /// Case-insensitive exact name lookup over the loaded catalogue.
    pub fn find_by_name(&self, name: &str) -> Result<Option<PlantRecord>> {
        let records = self.load()?;
        Ok(records
            .into_iter()
            .find(|r| r.name.eq_ignore_ascii_case(name)))
    }
}
