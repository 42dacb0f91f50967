//! # sysclean CLI
//!
//! Removes aged temporary, log and cache files, prunes the directories they
//! leave empty, and reports disk and memory usage.
//!
//! ## Quick Start
//!
//! ```bash
//! # See what would be removed
//! sysclean --dry-run
//!
//! # Remove files older than 14 days and report the heaviest processes
//! sudo sysclean --age 14 --optimize
//!
//! # Use a custom path table
//! sysclean --config paths.json
//! ```
//!
//! ## Environment Variables
//!
//! - `SYSCLEAN_DRY_RUN`: Preview only
//! - `SYSCLEAN_AGE`: Age threshold in days (default: 7)
//! - `SYSCLEAN_THRESHOLD`: Disk usage warning threshold in percent (default:
//!   80)
//! - `SYSCLEAN_CONFIG`: Configuration file path
//! - `SYSCLEAN_LOG_FILE`: Log file path (default: ./system_cleanup.log)
//!
//! Exit status is 0 on success and 1 on interruption or error.

use std::io::IsTerminal;

use sysclean::cli::Cli;
use sysclean::error::CleanError;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Configure miette handler based on terminal capabilities
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Use a simpler handler for non-TTY environments (cron, logs, etc.)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    sysclean::logging::init(cli.verbose(), cli.quiet(), cli.log_file())?;
    sysclean::interrupt::install_handler();

    match sysclean::commands::execute(&cli) {
        Ok(_) => Ok(()),
        Err(CleanError::Interrupted) => {
            tracing::info!("Cleanup interrupted by user");
            Err(CleanError::Interrupted.into())
        }
        Err(err) => {
            tracing::error!("An error occurred: {err}");
            Err(err.into())
        }
    }
}
