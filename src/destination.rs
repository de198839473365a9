use std::path::Path;

use crate::error::Result;
use crate::prompt::Prompter;

#[derive(Debug)]
pub enum DirectoryStatus {
    Existing,
    Created,
    Declined,
    CreationFailed(std::io::Error),
}

impl DirectoryStatus {
    /// Whether files can now be copied into the directory.
    pub fn is_ready(&self) -> bool {
        matches!(self, DirectoryStatus::Existing | DirectoryStatus::Created)
    }
}

/// Make sure `path` is a directory, creating it (parents included) if the user agrees.
pub fn ensure_directory(prompter: &mut dyn Prompter, path: &Path) -> Result<DirectoryStatus> {
    if path.is_dir() {
        return Ok(DirectoryStatus::Existing);
    }
    if !prompter.confirm(&format!(
        "The directory '{}' does not exist. Create it?",
        path.display()
    ))? {
        return Ok(DirectoryStatus::Declined);
    }
    match std::fs::create_dir_all(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "created destination directory");
            Ok(DirectoryStatus::Created)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to create directory: {err}");
            Ok(DirectoryStatus::CreationFailed(err))
        }
    }
}
