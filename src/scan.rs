use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use multimap::MultiMap;

use crate::error::{Error, Result};
use crate::extension::{classify, Extension};

/// Serial, name-sorted walk so that every run visits files in the same order.
fn make_walkdir(root: &Path) -> jwalk::WalkDir {
    jwalk::WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::Serial)
}

/// Every regular file under `root`, paired with the extension it is classified under.
/// Unreadable entries are logged and left out. Once `interrupt` is raised the next item
/// is [`Error::Interrupted`].
fn classified_files<'a>(
    root: &Path,
    extensions: &'a [Extension],
    interrupt: &'a AtomicBool,
) -> impl Iterator<Item = Result<(PathBuf, &'a Extension)>> + 'a {
    make_walkdir(root)
        .into_iter()
        .filter_map(move |dir_ent_res| {
            if interrupt.load(Ordering::SeqCst) {
                return Some(Err(Error::Interrupted));
            }
            let dir_ent = match dir_ent_res {
                Ok(dir_ent) => dir_ent,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {err}");
                    return None;
                }
            };
            if !dir_ent.path().is_file() {
                return None;
            }
            classify(dir_ent.file_name(), extensions)
                .map(|extension| Ok((dir_ent.path(), extension)))
        })
}

/// Count the files under `root` per extension. Every requested extension is present in
/// the result, with zero if nothing matched.
pub fn count_by_extension(
    root: &Path,
    extensions: &[Extension],
    interrupt: &AtomicBool,
) -> Result<BTreeMap<Extension, usize>> {
    let mut counts: BTreeMap<Extension, usize> = extensions
        .iter()
        .map(|extension| (extension.clone(), 0))
        .collect();
    for item in classified_files(root, extensions, interrupt) {
        let (_, extension) = item?;
        if let Some(count) = counts.get_mut(extension) {
            *count += 1;
        }
    }
    tracing::debug!(root = %root.display(), ?counts, "counted files");
    Ok(counts)
}

/// Files under `root` classified under `wanted`, in walk order. `extensions` is the full
/// target set so a file is only ever handed to one extension.
pub fn files_for_extension(
    root: &Path,
    wanted: &Extension,
    extensions: &[Extension],
    interrupt: &AtomicBool,
) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for item in classified_files(root, extensions, interrupt) {
        let (path, extension) = item?;
        if extension == wanted {
            files.push(path);
        }
    }
    Ok(files)
}

/// Base names shared by more than one of `files`. Copies land in a flat destination,
/// so only one file per name survives there.
pub fn name_collisions(files: &[PathBuf]) -> Vec<(String, Vec<PathBuf>)> {
    let by_name: MultiMap<String, PathBuf> = files
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            Some((name, path.clone()))
        })
        .collect();
    let mut collisions: Vec<_> = by_name
        .iter_all()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| (name.clone(), paths.clone()))
        .collect();
    collisions.sort();
    collisions
}
