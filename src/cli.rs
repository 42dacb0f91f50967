//! Command-line interface definitions for sysclean.
//!
//! This module defines the CLI structure using clap. The main entry point is
//! the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use sysclean::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! if cli.dry_run() {
//!     println!("Previewing files older than {} days", cli.age_days());
//! }
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{CleanError, Result};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "system_cleanup.log";

/// Main command-line interface for sysclean.
///
/// A run always performs the same sequence: disk report, per-category
/// sweep (temporary, log, cache files), empty directory pruning, optional
/// optimize report, final summary.
#[derive(Debug, Parser)]
#[command(
    name = "sysclean",
    bin_name = "sysclean",
    author,
    version,
    about = "System cleanup: remove aged temp, log and cache files and report disk usage",
    long_about = None
)]
pub struct Cli {
    /// Preview files to be deleted without removing them
    #[arg(long, env = "SYSCLEAN_DRY_RUN")]
    dry_run: bool,

    /// Delete files older than this many days
    #[arg(long = "age", default_value_t = 7, env = "SYSCLEAN_AGE")]
    age_days: u32,

    /// Disk usage percentage above which a warning is logged
    #[arg(
        long,
        default_value_t = 80,
        value_parser = clap::value_parser!(u8).range(0..=100),
        env = "SYSCLEAN_THRESHOLD"
    )]
    threshold: u8,

    /// Report memory usage and top processes, and drop kernel caches when
    /// running as root
    #[arg(long, env = "SYSCLEAN_OPTIMIZE")]
    optimize: bool,

    /// Path to a JSON configuration file overriding the cleanup paths
    #[arg(long, env = "SYSCLEAN_CONFIG")]
    config: Option<PathBuf>,

    /// Directories never descended into (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',', env = "SYSCLEAN_EXCLUDE")]
    exclude: Vec<PathBuf>,

    /// Volume to report disk usage for
    #[arg(long, default_value = "/", env = "SYSCLEAN_DISK_PATH")]
    disk_path: PathBuf,

    /// Append log output to this file
    #[arg(long, default_value = DEFAULT_LOG_FILE, env = "SYSCLEAN_LOG_FILE")]
    log_file: PathBuf,

    /// Log to the console only
    #[arg(long)]
    no_log_file: bool,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "SYSCLEAN_VERBOSE")]
    verbose: u8,

    /// Silence all output except for warnings and errors
    #[arg(short, long, conflicts_with = "verbose", env = "SYSCLEAN_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn age_days(&self) -> u32 {
        self.age_days
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn optimize(&self) -> bool {
        self.optimize
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn exclude(&self) -> &[PathBuf] {
        &self.exclude
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    /// The log file, or `None` when file logging is disabled
    pub fn log_file(&self) -> Option<&Path> {
        if self.no_log_file {
            None
        } else {
            Some(&self.log_file)
        }
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Builder for [`Cli`]
#[derive(Debug)]
pub struct CliBuilder {
    dry_run: bool,
    age_days: u32,
    threshold: u8,
    optimize: bool,
    config: Option<PathBuf>,
    exclude: Vec<PathBuf>,
    disk_path: PathBuf,
    log_file: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
}

impl Default for CliBuilder {
    fn default() -> Self {
        Self {
            dry_run: false,
            age_days: 7,
            threshold: 80,
            optimize: false,
            config: None,
            exclude: Vec::new(),
            disk_path: PathBuf::from("/"),
            log_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl CliBuilder {
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn age_days(mut self, days: u32) -> Self {
        self.age_days = days;
        self
    }

    pub fn threshold(mut self, percent: u8) -> Self {
        self.threshold = percent;
        self
    }

    pub fn optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exclude.push(dir.into());
        self
    }

    pub fn disk_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.disk_path = path.into();
        self
    }

    /// Log to this file as well as the console. Without this, the built
    /// instance logs to the console only.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        if self.threshold > 100 {
            return Err(CleanError::InvalidThreshold(self.threshold));
        }

        Ok(Cli {
            dry_run: self.dry_run,
            age_days: self.age_days,
            threshold: self.threshold,
            optimize: self.optimize,
            config: self.config,
            exclude: self.exclude,
            disk_path: self.disk_path,
            no_log_file: self.log_file.is_none(),
            log_file: self
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// This function:
/// - Converts relative paths to absolute using the current directory
/// - Removes `.` and `..` components where possible
/// - Does NOT resolve symlinks (preserves user intent)
/// - Does NOT require the path to exist
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    use std::path::Component;

    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && !matches!(last, Component::ParentDir | Component::RootDir)
                {
                    components.pop();
                    continue;
                }
                if matches!(components.last(), Some(Component::RootDir)) {
                    continue;
                }
                components.push(component);
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    components.into_iter().collect()
}
