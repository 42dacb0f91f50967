//! File selection and deletion engine.
//!
//! A sweep runs in three stages, each independently usable given a set of
//! root paths:
//!
//! - [`select_candidates`]: walk the roots and collect regular files older
//!   than the age threshold whose names end with one of the target extensions
//! - [`delete_candidates`]: remove (or preview) each candidate, tolerating
//!   per-file failures
//! - [`prune_empty_dirs`]: remove directories left empty, deepest first
//!
//! Symbolic links are never followed below a root and never selected.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! use sysclean::sweep::{CleanupTarget, ExclusionSet, delete_candidates, prune_empty_dirs};
//!
//! let target = CleanupTarget::new(
//!     vec![PathBuf::from("/tmp")],
//!     vec![".tmp".to_string(), ".bak".to_string()],
//!     Duration::from_secs(7 * 24 * 60 * 60),
//! );
//!
//! let candidates = target.select(&ExclusionSet::new());
//! let result = delete_candidates(&candidates, true);
//! let dirs = prune_empty_dirs(target.roots(), &ExclusionSet::new(), true);
//! println!("{} files, {} bytes, {} dirs", result.files_deleted, result.bytes_freed, dirs);
//! ```

use std::collections::HashSet;
use std::ops::{Add, AddAssign};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

mod delete;
mod prune;
mod select;
mod size;

pub use delete::delete_candidates;
pub use prune::prune_empty_dirs;
pub use select::{matches_extension, select_candidates};
pub use size::format_size;

/// A set of roots swept with one extension list and one age threshold.
///
/// Built from configuration at the start of a run and never mutated.
#[derive(Debug, Clone)]
pub struct CleanupTarget {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
    min_age: Duration,
}

impl CleanupTarget {
    pub fn new(roots: Vec<PathBuf>, extensions: Vec<String>, min_age: Duration) -> Self {
        Self {
            roots,
            extensions,
            min_age,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn min_age(&self) -> Duration {
        self.min_age
    }

    /// Collect the deletion candidates under this target's roots.
    pub fn select(&self, exclusions: &ExclusionSet) -> Vec<CandidateFile> {
        select_candidates(&self.roots, self.min_age, &self.extensions, exclusions)
    }
}

/// A file chosen for possible deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Path as produced by the walk (root joined with the relative path)
    pub path: PathBuf,
    /// Size in bytes at selection time
    pub size: u64,
    /// Last modification time at selection time
    pub modified: SystemTime,
}

/// Directories the selector must not descend into.
///
/// Paths are compared verbatim against the paths produced by the walk, so
/// they should be spelled the same way as the roots (both absolute).
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dirs: HashSet<PathBuf>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dir: impl Into<PathBuf>) -> bool {
        self.dirs.insert(dir.into())
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            dirs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Files removed and bytes freed by one deletion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of files removed
    pub files_deleted: usize,
    /// Sum of the sizes read immediately before each removal
    pub bytes_freed: u64,
}

impl Add for CleanupResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            files_deleted: self.files_deleted + rhs.files_deleted,
            bytes_freed: self.bytes_freed + rhs.bytes_freed,
        }
    }
}

impl AddAssign for CleanupResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
