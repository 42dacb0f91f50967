//! Runs in its own process: the SIGINT flag is global and never resets.
#![cfg(unix)]

mod common;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use sysclean::cli::Cli;
use sysclean::commands::execute_with;
use sysclean::error::CleanError;
use sysclean::probe::CacheDropper;

use common::file_aged;

#[test]
fn test_interrupt_during_optimize_fails_the_run() {
    let dir = TempDir::new().unwrap();
    file_aged(&dir, "temp/old.tmp", "old", 30);
    dir.child("logs").create_dir_all().unwrap();
    dir.child("cache").create_dir_all().unwrap();

    let config = dir.child("config.json");
    let json = serde_json::json!({
        "cleanup_paths": {
            "temp_files": [dir.child("temp").path()],
            "log_files": [dir.child("logs").path()],
            "cache_files": [dir.child("cache").path()],
        }
    });
    config.write_str(&json.to_string()).unwrap();

    let cli = Cli::builder()
        .config(config.path())
        .disk_path(dir.path())
        .optimize(true)
        .build()
        .unwrap();

    sysclean::interrupt::install_handler();
    // Ctrl-C arrives after the sweep, while the optimize pass is running
    let dropper = CacheDropper::new(|| {
        unsafe {
            libc::raise(libc::SIGINT);
        }
        false
    });

    let result = execute_with(&cli, &dropper);

    assert!(sysclean::interrupt::requested());
    assert!(matches!(result, Err(CleanError::Interrupted)), "got {result:?}");
    dir.child("temp/old.tmp").assert(predicate::path::missing());
}
