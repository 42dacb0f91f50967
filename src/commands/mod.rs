//! Implementation of a sysclean run.
//!
//! `mod.rs` is the orchestrator and re-export hub; the sweep itself lives in
//! [`sweep`] and the optional optimize pass in [`optimize`].
//!
//! # Example
//!
//! ```no_run
//! use sysclean::cli::Cli;
//! use sysclean::commands;
//!
//! let cli = Cli::parse_args();
//! if let Err(e) = commands::execute(&cli) {
//!     eprintln!("Error: {e:?}");
//! }
//! ```

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::cli::{Cli, normalize_path};
use crate::config::CleanupPaths;
use crate::error::{CleanError, Result};
use crate::interrupt;
use crate::probe::{CacheDropper, EffectiveUser, Privilege, check_disk_space};
use crate::sweep::{ExclusionSet, format_size};

pub(crate) mod optimize;
pub(crate) mod sweep;

pub use optimize::{OptimizeReport, optimize};
pub use sweep::{CategoryReport, Sweep, SweepBuilder, SweepReport};


/// Everything a run produced, for callers that want more than the log.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub sweep: SweepReport,
    pub optimize: Option<OptimizeReport>,
    /// Whether disk usage was above the threshold before the sweep (`None`
    /// when it could not be queried)
    pub disk_over_threshold: Option<bool>,
}

/// Execute a run based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<RunReport> {
    execute_with(cli, &CacheDropper::new(EffectiveUser))
}

/// Execute a run with an explicit cache dropper.
pub fn execute_with<P: Privilege>(cli: &Cli, dropper: &CacheDropper<P>) -> Result<RunReport> {
    let started = Instant::now();
    info!("Starting system cleanup");

    let paths = CleanupPaths::load_or_default(cli.config()).absolutize();
    let exclusions: ExclusionSet = cli.exclude().iter().map(normalize_path).collect();

    let disk_over_threshold = report_disk(cli.disk_path(), cli.threshold());

    let sweep = Sweep::builder()
        .paths(&paths)
        .exclusions(&exclusions)
        .age_days(cli.age_days())
        .dry_run(cli.dry_run())
        .build()?
        .run()?;

    let optimize_report = cli.optimize().then(|| optimize(dropper));
    check_interrupt()?;

    info!("Cleanup completed!");
    info!("Time taken: {:.2?}", started.elapsed());

    if sweep.dry_run {
        info!(
            "Would delete {} files, freeing {}",
            sweep.candidates(),
            format_size(sweep.candidate_bytes())
        );
        info!("Would remove {} empty directories", sweep.dirs_removed);
    } else {
        let total = sweep.total();
        info!(
            "Deleted {} files, freed {}",
            total.files_deleted,
            format_size(total.bytes_freed)
        );
        info!("Removed {} empty directories", sweep.dirs_removed);

        check_interrupt()?;
        report_disk(cli.disk_path(), cli.threshold());
    }

    check_interrupt()?;

    Ok(RunReport {
        sweep,
        optimize: optimize_report,
        disk_over_threshold,
    })
}

/// Fail with [`CleanError::Interrupted`] once SIGINT has been received.
pub(crate) fn check_interrupt() -> Result<()> {
    if interrupt::requested() {
        return Err(CleanError::Interrupted);
    }
    Ok(())
}

fn report_disk(path: &Path, threshold: u8) -> Option<bool> {
    match check_disk_space(path, threshold) {
        Ok(over) => {
            if over {
                warn!("Disk usage above threshold ({threshold}%)!");
            }
            Some(over)
        }
        Err(err) => {
            warn!("{err}: {}", error_source(&err));
            None
        }
    }
}

fn error_source(err: &dyn std::error::Error) -> String {
    err.source()
        .map(|source| source.to_string())
        .unwrap_or_default()
}
