//! Single-slot result storage.
//!
//! The client keeps exactly one result: each successful submission
//! overwrites the previous one under a fixed key.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::model::StoredResult;
use crate::error::{TopicLensError, TopicLensResult};

/// Fixed storage key (file name) for the most recent result.
pub const RESULT_KEY: &str = "last-result.json";

/// File-backed store holding the most recent result.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the result file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the result file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(RESULT_KEY)
    }

    /// Persist a result, replacing any previous one.
    pub fn save(&self, result: &StoredResult) -> TopicLensResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let tmp = self.dir.join(format!("{}.tmp", RESULT_KEY));
        fs::write(&tmp, result.to_json()?)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), topic = %result.result.topic, "Stored result");
        Ok(path)
    }

    /// Load the most recent result.
    pub fn load(&self) -> TopicLensResult<StoredResult> {
        let path = self.path();
        if !path.exists() {
            return Err(TopicLensError::ResultNotFound(path.display().to_string()));
        }
        let json = fs::read_to_string(&path)?;
        Ok(StoredResult::from_json(&json)?)
    }
}
