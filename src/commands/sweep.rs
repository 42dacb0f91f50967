//! Sweep command: select, delete and prune for every category.

use std::time::Duration;

use tracing::info;

use super::check_interrupt;
use crate::config::{Category, CleanupPaths};
use crate::error::{CleanError, Result};
use crate::sweep::{
    CleanupResult, CleanupTarget, ExclusionSet, delete_candidates, format_size, prune_empty_dirs,
};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Outcome of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: Category,
    /// Files selected for deletion
    pub candidates: usize,
    /// Their size at selection time
    pub candidate_bytes: u64,
    /// What deletion actually achieved (empty for a dry run)
    pub result: CleanupResult,
}

/// Outcome of a full sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub categories: Vec<CategoryReport>,
    pub dirs_removed: usize,
    pub dry_run: bool,
}

impl SweepReport {
    /// Sum of the per-category deletion results.
    pub fn total(&self) -> CleanupResult {
        self.categories
            .iter()
            .fold(CleanupResult::default(), |acc, c| acc + c.result)
    }

    pub fn candidates(&self) -> usize {
        self.categories.iter().map(|c| c.candidates).sum()
    }

    pub fn candidate_bytes(&self) -> u64 {
        self.categories.iter().map(|c| c.candidate_bytes).sum()
    }

    pub fn category(&self, category: Category) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }
}

pub struct Sweep<'a> {
    paths: &'a CleanupPaths,
    exclusions: &'a ExclusionSet,
    age_days: u32,
    dry_run: bool,
}

pub struct SweepBuilder<'a> {
    paths: Option<&'a CleanupPaths>,
    exclusions: Option<&'a ExclusionSet>,
    age_days: u32,
    dry_run: bool,
}

impl Default for SweepBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SweepBuilder<'a> {
    pub fn new() -> Self {
        Self {
            paths: None,
            exclusions: None,
            age_days: 7,
            dry_run: false,
        }
    }

    pub fn paths(mut self, paths: &'a CleanupPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn exclusions(mut self, exclusions: &'a ExclusionSet) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    pub fn age_days(mut self, days: u32) -> Self {
        self.age_days = days;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Result<Sweep<'a>> {
        static NO_EXCLUSIONS: std::sync::LazyLock<ExclusionSet> =
            std::sync::LazyLock::new(ExclusionSet::new);

        Ok(Sweep {
            paths: self
                .paths
                .ok_or_else(|| CleanError::Config("cleanup paths are required".to_string()))?,
            exclusions: self.exclusions.unwrap_or(&*NO_EXCLUSIONS),
            age_days: self.age_days,
            dry_run: self.dry_run,
        })
    }
}

impl<'a> Sweep<'a> {
    pub fn builder() -> SweepBuilder<'a> {
        SweepBuilder::new()
    }

    pub fn age_threshold(&self) -> Duration {
        Duration::from_secs(u64::from(self.age_days) * SECONDS_PER_DAY)
    }

    /// Sweep temporary, log and cache files in that order, then prune empty
    /// directories under the temp and cache roots.
    ///
    /// Per-file problems are logged and skipped; the only error is
    /// [`CleanError::Interrupted`], checked between stages.
    pub fn run(&self) -> Result<SweepReport> {
        let mut report = SweepReport {
            dry_run: self.dry_run,
            ..SweepReport::default()
        };

        for category in Category::ALL {
            check_interrupt()?;
            info!("Processing {category} files...");

            let target = CleanupTarget::new(
                self.paths.roots(category).to_vec(),
                category.extensions().iter().map(|e| e.to_string()).collect(),
                self.age_threshold(),
            );
            let candidates = target.select(self.exclusions);
            check_interrupt()?;

            let result = delete_candidates(&candidates, self.dry_run);
            check_interrupt()?;

            let category_report = CategoryReport {
                category,
                candidates: candidates.len(),
                candidate_bytes: candidates.iter().map(|c| c.size).sum(),
                result,
            };
            if self.dry_run {
                info!(
                    "Found {} {category} files to delete ({})",
                    category_report.candidates,
                    format_size(category_report.candidate_bytes)
                );
            } else {
                info!(
                    "Deleted {} {category} files ({})",
                    result.files_deleted,
                    format_size(result.bytes_freed)
                );
            }
            report.categories.push(category_report);
        }

        info!("Cleaning up empty directories...");
        report.dirs_removed =
            prune_empty_dirs(&self.paths.prune_roots(), self.exclusions, self.dry_run);
        check_interrupt()?;

        Ok(report)
    }
}
