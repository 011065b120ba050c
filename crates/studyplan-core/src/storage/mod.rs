mod config;
pub mod subject_store;

pub use config::{Config, ScheduleConfig, StorageConfig};
pub use subject_store::SubjectStore;

use std::path::{Path, PathBuf};

/// Returns `~/.config/studyplan/`, or `override_dir` when given.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir(override_dir: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("studyplan"),
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
