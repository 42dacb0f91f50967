//! # sysclean
//!
//! A filesystem housekeeping tool: removes temporary, log and cache files
//! older than a threshold, prunes directories left empty, and reports disk
//! and memory usage.
//!
//! ## Overview
//!
//! A run is a single linear pass:
//!
//! 1. Load the path table (built-in, or a JSON override)
//! 2. Report disk usage and warn above the threshold
//! 3. For temporary, log and cache files in turn: select aged files with
//!    matching extensions, then delete them (or preview)
//! 4. Prune empty directories under the temporary and cache roots
//! 5. Optionally report memory and the heaviest processes, and drop kernel
//!    caches when running as root
//! 6. Log a summary and the disk usage afterwards
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: The orchestrator and the optimize pass
//! - [`config`]: Cleanup categories and the path table
//! - [`sweep`]: File selection, deletion and empty directory pruning
//! - [`probe`]: Disk, memory and process statistics, privileged cache drop
//! - [`logging`]: tracing subscriber setup
//! - [`interrupt`]: SIGINT tracking
//! - [`error`]: Error types and handling with thiserror + miette
//!
//! ## Library Usage
//!
//! ```no_run
//! use sysclean::cli::Cli;
//! use sysclean::commands;
//!
//! let cli = Cli::builder().dry_run(true).age_days(14).build()?;
//! let report = commands::execute(&cli)?;
//! println!("{} candidates", report.sweep.candidates());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Failures on individual files are logged and skipped. Only configuration
//! problems surface as errors, and those fall back to the defaults; anything
//! else that reaches `main` ends the run with exit status 1.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod logging;
pub mod probe;
pub mod sweep;
