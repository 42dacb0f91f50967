//! Error types for sysclean.
//!
//! This module defines all error types used throughout sysclean, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`CleanError`]
//! - Per-file failures during a sweep never surface here; they are logged and
//!   skipped where they happen
//! - Configuration errors are recoverable: the caller substitutes defaults
//! - Anything that reaches `main` ends the process with exit status 1
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sysclean::error::{CleanError, Result};
//!
//! fn require_dir(path: &Path) -> Result<()> {
//!     std::fs::read_dir(path).map_err(|source| CleanError::Io {
//!         path: path.to_path_buf(),
//!         source,
//!     })?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in sysclean operations
#[derive(Error, Debug, Diagnostic)]
pub enum CleanError {
    /// File system I/O error outside the per-file sweep loops.
    ///
    /// Raised when opening the log file, writing the page-cache drop signal,
    /// or any other whole-run operation touches the filesystem and fails.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(sysclean::io_error))]
    Io {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration override file could not be read.
    #[error("Failed to read configuration file '{path}'")]
    #[diagnostic(
        code(sysclean::config::read_error),
        help("Check that the file exists and is readable. Built-in defaults are used instead.")
    )]
    ConfigRead {
        /// The configuration file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration override file is not valid JSON for the expected
    /// shape.
    ///
    /// The file must be an object with a `cleanup_paths` key mapping
    /// `temp_files`, `log_files` and `cache_files` to lists of paths.
    #[error("Error parsing configuration file '{path}'")]
    #[diagnostic(
        code(sysclean::config::parse_error),
        help(
            "Expected {{\"cleanup_paths\": {{\"temp_files\": [...], \"log_files\": [...], \
             \"cache_files\": [...]}}}}"
        )
    )]
    ConfigParse {
        /// The configuration file path
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Disk usage threshold outside 0..=100.
    #[error("Invalid disk usage threshold: {0}%")]
    #[diagnostic(
        code(sysclean::config::invalid_threshold),
        help("The threshold is a percentage between 0 and 100.")
    )]
    InvalidThreshold(
        /// The rejected value
        u8,
    ),

    /// Querying volume statistics failed.
    #[error("Failed to query disk usage for '{path}'")]
    #[diagnostic(code(sysclean::probe::disk_error))]
    DiskStats {
        /// The path whose volume was queried
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialise logging: {0}")]
    #[diagnostic(code(sysclean::logging::init_error))]
    Logging(
        /// Description of the failure
        String,
    ),

    /// The run was interrupted by the user (SIGINT).
    #[error("Cleanup interrupted by user")]
    #[diagnostic(code(sysclean::interrupted))]
    Interrupted,

    /// A required parameter was missing when building a command.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sysclean::config::error),
        help("Check the required configuration parameters.")
    )]
    Config(
        /// Description of the configuration error
        String,
    ),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CleanError>;
