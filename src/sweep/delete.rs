use std::fs;

use tracing::{info, warn};

use super::size::format_size;
use super::{CandidateFile, CleanupResult};
use crate::interrupt;

/// Delete each candidate, or only log what would be deleted when `dry_run`.
///
/// The size is re-read immediately before acting, so the reported bytes are
/// the size at time of deletion rather than at selection. Files that vanished,
/// were replaced by something other than a regular file, or cannot be removed
/// are logged as warnings and skipped; the rest of the batch always runs.
///
/// Dry runs never touch the filesystem and return an empty result.
pub fn delete_candidates(files: &[CandidateFile], dry_run: bool) -> CleanupResult {
    let mut result = CleanupResult::default();

    for file in files {
        if interrupt::requested() {
            break;
        }

        let size = match fs::symlink_metadata(&file.path) {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            Ok(_) => {
                warn!(
                    "Error deleting file {}: no longer a regular file",
                    file.path.display()
                );
                continue;
            }
            Err(err) => {
                warn!("Error deleting file {}: {err}", file.path.display());
                continue;
            }
        };

        if dry_run {
            info!(
                "Would delete: {} ({})",
                file.path.display(),
                format_size(size)
            );
            continue;
        }

        match fs::remove_file(&file.path) {
            Ok(()) => {
                info!("Deleted: {} ({})", file.path.display(), format_size(size));
                result.files_deleted += 1;
                result.bytes_freed += size;
            }
            Err(err) => warn!("Error deleting file {}: {err}", file.path.display()),
        }
    }

    result
}
