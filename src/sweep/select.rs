use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{CandidateFile, ExclusionSet};
use crate::interrupt;

/// Walk `roots` and collect regular files that are older than `age_threshold`
/// and end with one of `extensions` (any file when `extensions` is empty).
///
/// Missing or unreadable roots are logged as warnings and skipped; files that
/// cannot be stat'ed are logged at debug level and skipped. This function
/// never fails: the worst case is an empty list.
///
/// Directories whose path is in `exclusions` are not descended into. Results
/// follow traversal order, which is sorted by file name within each
/// directory.
pub fn select_candidates(
    roots: &[PathBuf],
    age_threshold: Duration,
    extensions: &[String],
    exclusions: &ExclusionSet,
) -> Vec<CandidateFile> {
    select_candidates_at(
        roots,
        age_threshold,
        extensions,
        exclusions,
        SystemTime::now(),
    )
}

pub(crate) fn select_candidates_at(
    roots: &[PathBuf],
    age_threshold: Duration,
    extensions: &[String],
    exclusions: &ExclusionSet,
    now: SystemTime,
) -> Vec<CandidateFile> {
    let mut candidates = Vec::new();

    for root in roots {
        if interrupt::requested() {
            break;
        }

        // Follows a symlinked root; everything below it is walked without
        // following links.
        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("Path does not exist: {}", root.display());
                continue;
            }
            Err(err) => {
                warn!("Error accessing path {}: {err}", root.display());
                continue;
            }
        };

        if metadata.is_dir() {
            walk_root(root, age_threshold, extensions, exclusions, now, &mut candidates);
            continue;
        }

        match fs::symlink_metadata(root) {
            Ok(link) if link.file_type().is_symlink() => {
                debug!("Skipping symbolic link root {}", root.display());
            }
            Ok(_) if metadata.is_file() => {
                if let Some(candidate) =
                    evaluate(root, &metadata, age_threshold, extensions, now)
                {
                    candidates.push(candidate);
                }
            }
            Ok(_) => debug!("Skipping special file {}", root.display()),
            Err(err) => warn!("Error accessing path {}: {err}", root.display()),
        }
    }

    candidates
}

fn walk_root(
    root: &Path,
    age_threshold: Duration,
    extensions: &[String],
    exclusions: &ExclusionSet,
    now: SystemTime,
    candidates: &mut Vec<CandidateFile>,
) {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let excluded = entry.file_type().is_dir() && exclusions.contains(entry.path());
            if excluded {
                debug!("Excluding directory {}", entry.path().display());
            }
            !excluded
        });

    for entry in walker {
        if interrupt::requested() {
            return;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                warn!("Error accessing path {}: {err}", root.display());
                continue;
            }
            Err(err) => {
                debug!("Error walking {}: {err}", root.display());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        // lstat again: the entry may have vanished since the directory was read
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!("Error accessing file {}: {err}", entry.path().display());
                continue;
            }
        };

        if let Some(candidate) = evaluate(entry.path(), &metadata, age_threshold, extensions, now)
        {
            candidates.push(candidate);
        }
    }
}

fn evaluate(
    path: &Path,
    metadata: &Metadata,
    age_threshold: Duration,
    extensions: &[String],
    now: SystemTime,
) -> Option<CandidateFile> {
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(err) => {
            debug!("No modification time for {}: {err}", path.display());
            return None;
        }
    };

    if !is_old_enough(modified, now, age_threshold) || !matches_extension(path, extensions) {
        return None;
    }

    Some(CandidateFile {
        path: path.to_path_buf(),
        size: metadata.len(),
        modified,
    })
}

/// Strictly older than the threshold. Files stamped in the future never
/// qualify.
pub(crate) fn is_old_enough(modified: SystemTime, now: SystemTime, threshold: Duration) -> bool {
    now.duration_since(modified)
        .map(|age| age > threshold)
        .unwrap_or(false)
}

/// True when `extensions` is empty or the path ends with one of them.
///
/// Extensions are plain suffixes, so multi-part ones such as `.log.gz` or
/// `.log.1` work as expected.
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }

    let bytes = path.as_os_str().as_encoded_bytes();
    extensions
        .iter()
        .any(|ext| bytes.ends_with(ext.as_bytes()))
}
