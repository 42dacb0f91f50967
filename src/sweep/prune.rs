use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use super::ExclusionSet;
use crate::interrupt;

/// Remove directories under `roots` that have no entries, deepest first.
///
/// The walk is contents-first, so a directory is examined only after all of
/// its children were processed; a parent emptied by pruning its children is
/// removed in the same pass. No path listed in `roots` is ever removed, even
/// when it lies under another root, and symlinked directories are neither
/// entered nor removed.
///
/// Excluded directories are left alone together with everything below them.
///
/// Returns the number of directories removed (always 0 for a dry run).
pub fn prune_empty_dirs(roots: &[PathBuf], exclusions: &ExclusionSet, dry_run: bool) -> usize {
    let protected: HashSet<&Path> = roots.iter().map(PathBuf::as_path).collect();
    let mut removed = 0;

    for root in roots {
        if !root.is_dir() || exclusions.contains(root) {
            continue;
        }

        // filter_entry cannot prune a contents-first walk, so exclusions are
        // matched against each entry's ancestors instead
        let walker = WalkDir::new(root)
            .follow_links(false)
            .contents_first(true)
            .min_depth(1);

        for entry in walker {
            if interrupt::requested() {
                return removed;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Error walking {}: {err}", root.display());
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            if protected.contains(dir) || is_excluded(dir, root, exclusions) {
                continue;
            }

            match is_empty_dir(dir) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    debug!("Error reading directory {}: {err}", dir.display());
                    continue;
                }
            }

            if dry_run {
                info!("Would remove empty directory: {}", dir.display());
                continue;
            }

            match fs::remove_dir(dir) {
                Ok(()) => {
                    info!("Removed empty directory: {}", dir.display());
                    removed += 1;
                }
                Err(err) => debug!("Error removing directory {}: {err}", dir.display()),
            }
        }
    }

    removed
}

/// Whether `dir` or any of its ancestors below `root` is excluded.
fn is_excluded(dir: &Path, root: &Path, exclusions: &ExclusionSet) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    dir.ancestors()
        .take_while(|ancestor| *ancestor != root)
        .any(|ancestor| exclusions.contains(ancestor))
}

fn is_empty_dir(dir: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}
