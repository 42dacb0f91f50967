#![allow(dead_code)]

use std::path::Path;
use std::time::{Duration, SystemTime};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use filetime::FileTime;

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Create `rel` under `dir` with `contents` and an mtime `age_days` ago.
pub fn file_aged(dir: &TempDir, rel: &str, contents: &str, age_days: u64) {
    let child = dir.child(rel);
    child.write_str(contents).unwrap();
    set_age(child.path(), age_days);
}

pub fn set_age(path: &Path, age_days: u64) {
    let mtime = SystemTime::now() - DAY * age_days as u32;
    filetime::set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

pub fn exts(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
