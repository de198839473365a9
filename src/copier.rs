use std::path::Path;

use crate::error::Result;
use crate::prompt::Prompter;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { bytes: u64 },
    Skipped,
    Failed { reason: String },
}

/// Copy `source` to `destination`. When the destination exists and `ask_on_overwrite` is
/// set the user decides; declining leaves it untouched. I/O failures come back as
/// [`CopyOutcome::Failed`], the only `Err` is an interrupted prompt.
pub fn copy_with_confirmation(
    prompter: &mut dyn Prompter,
    source: &Path,
    destination: &Path,
    ask_on_overwrite: bool,
) -> Result<CopyOutcome> {
    if is_same_file(source, destination) {
        return Ok(CopyOutcome::Failed {
            reason: "source and destination are the same file".to_owned(),
        });
    }
    if ask_on_overwrite && destination.exists() {
        let name = file_name(destination);
        if !prompter.confirm(&format!(
            "'{name}' already exists at the destination. Overwrite it?"
        ))? {
            tracing::debug!(destination = %destination.display(), "overwrite declined");
            return Ok(CopyOutcome::Skipped);
        }
    }
    Ok(match copy_file_with_metadata(source, destination) {
        Ok(bytes) => CopyOutcome::Copied { bytes },
        Err(err) => {
            tracing::warn!(
                source = %source.display(),
                destination = %destination.display(),
                "copy failed: {err}"
            );
            CopyOutcome::Failed {
                reason: err.to_string(),
            }
        }
    })
}

pub fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `fs::copy` carries content and permissions; access and modification times are
/// applied afterwards.
fn copy_file_with_metadata(source: &Path, destination: &Path) -> std::io::Result<u64> {
    let bytes = std::fs::copy(source, destination)?;
    let meta = std::fs::metadata(source)?;
    filetime::set_file_times(
        destination,
        filetime::FileTime::from_last_access_time(&meta),
        filetime::FileTime::from_last_modification_time(&meta),
    )?;
    Ok(bytes)
}
