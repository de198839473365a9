use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::copier::{copy_with_confirmation, CopyOutcome};
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::prompt::Prompter;
use crate::report::ExtensionStats;
use crate::scan;

/// Copy every file of `source_root` classified under `extension` flat into `dest_dir`.
///
/// The file list is collected before the first copy, so a destination nested inside the
/// source never feeds its own copies back into the batch. Files sharing a base name are
/// copied in walk order; the later one overwrites the earlier one or is skipped,
/// depending on the user's answer.
pub fn copy_extension(
    prompter: &mut dyn Prompter,
    source_root: &Path,
    dest_dir: &Path,
    extension: &Extension,
    extensions: &[Extension],
    ask_on_overwrite: bool,
    interrupt: &AtomicBool,
) -> Result<ExtensionStats> {
    let files = scan::files_for_extension(source_root, extension, extensions, interrupt)?;
    let collisions = scan::name_collisions(&files);
    if !collisions.is_empty() {
        crate::ui::name_collisions(&collisions);
    }
    let stats = copy_files(
        prompter,
        &files,
        dest_dir,
        ask_on_overwrite,
        interrupt,
        |path, outcome| crate::ui::file_outcome(path, outcome),
    )?;
    tracing::info!(%extension, ?stats, "extension done");
    crate::ui::batch_subtotal(extension, &stats);
    Ok(stats)
}

/// Copy `files` into `dest_dir` by base name, reporting each outcome to `on_file`.
/// `interrupt` is checked before each file; a file already started is finished first.
pub fn copy_files(
    prompter: &mut dyn Prompter,
    files: &[PathBuf],
    dest_dir: &Path,
    ask_on_overwrite: bool,
    interrupt: &AtomicBool,
    mut on_file: impl FnMut(&Path, &CopyOutcome),
) -> Result<ExtensionStats> {
    let mut stats = ExtensionStats::default();
    for source in files {
        if interrupt.load(Ordering::SeqCst) {
            tracing::info!(?stats, "interrupted between files");
            return Err(Error::Interrupted);
        }
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let destination = dest_dir.join(file_name);
        let outcome = copy_with_confirmation(prompter, source, &destination, ask_on_overwrite)?;
        on_file(&destination, &outcome);
        stats.record(&outcome);
    }
    Ok(stats)
}
