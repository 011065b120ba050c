//! JSON persistence for the subject catalog.
//!
//! The whole catalog is one JSON array. Saves go to a sibling temp file
//! that is then renamed over the target, so a crash mid-write leaves the
//! previous file intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::study::{Catalog, Subject};

/// File-backed store for a [`Catalog`].
#[derive(Debug, Clone)]
pub struct SubjectStore {
    path: PathBuf,
}

impl SubjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "subjects.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn corrupt(&self, message: impl Into<String>) -> CoreError {
        CoreError::CorruptData {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    /// Read the catalog. A missing or blank file is an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptData`] if the file cannot be parsed into
    /// valid subjects, or [`CoreError::Io`] if it cannot be read.
    pub fn load(&self) -> Result<Catalog> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(Catalog::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(self.corrupt(format!("not valid UTF-8: {e}")));
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Catalog::new());
        }

        let subjects: Vec<Subject> =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        let catalog = Catalog::from_subjects(subjects).map_err(|e| self.corrupt(e.to_string()))?;

        debug!(
            path = %self.path.display(),
            subjects = catalog.len(),
            topics = catalog.topic_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Write the catalog atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the directory, temp file or rename fails.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(catalog.subjects())?;
        json.push('\n');

        let tmp_path = self.sibling(".tmp");
        if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, &self.path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), subjects = catalog.len(), "saved catalog");
        Ok(())
    }

    /// Move an unreadable data file aside to `<file>.corrupt` and return the
    /// new location, so the caller can start over without losing it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the rename fails.
    pub fn quarantine(&self) -> Result<PathBuf> {
        let target = self.sibling(".corrupt");
        fs::rename(&self.path, &target)?;
        warn!(
            from = %self.path.display(),
            to = %target.display(),
            "moved unreadable data file aside"
        );
        Ok(target)
    }
}
