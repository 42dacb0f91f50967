use std::path::Path;

use tracing::info;

use crate::error::{CleanError, Result};
use crate::sweep::format_size;

/// Space statistics for one volume, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStats {
    pub total: u64,
    pub used: u64,
    /// Space available to unprivileged users
    pub free: u64,
}

impl DiskStats {
    /// Percentage of usable space in use, computed like `df`: reserved blocks
    /// count neither as used nor as free.
    pub fn percent_used(&self) -> f64 {
        let usable = self.used + self.free;
        if usable == 0 {
            return 0.0;
        }
        self.used as f64 / usable as f64 * 100.0
    }
}

/// Query space statistics for the volume holding `path`.
#[cfg(unix)]
pub fn disk_usage(path: &Path) -> Result<DiskStats> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| CleanError::DiskStats {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path contains NUL"),
    })?;

    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: c_path is a valid NUL-terminated string and stat points to
    // writable memory of the right size.
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if ret != 0 {
        return Err(CleanError::DiskStats {
            path: path.to_path_buf(),
            source: std::io::Error::last_os_error(),
        });
    }
    // SAFETY: statvfs returned 0, so the struct is initialised.
    let stat = unsafe { stat.assume_init() };

    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bavail as u64 * block_size;
    let used = total.saturating_sub(stat.f_bfree as u64 * block_size);

    Ok(DiskStats { total, used, free })
}

/// Query space statistics for the volume holding `path`.
#[cfg(not(unix))]
pub fn disk_usage(path: &Path) -> Result<DiskStats> {
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let disk = disks
        .list()
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .ok_or_else(|| CleanError::DiskStats {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no volume for path"),
        })?;

    let total = disk.total_space();
    let free = disk.available_space();
    Ok(DiskStats {
        total,
        used: total.saturating_sub(free),
        free,
    })
}

/// Log usage of the volume holding `path` and report whether it is above
/// `threshold_pct`.
pub fn check_disk_space(path: &Path, threshold_pct: u8) -> Result<bool> {
    let stats = disk_usage(path)?;
    let percent = stats.percent_used();

    info!("Current disk usage: {percent:.2}%");
    info!(
        "Total: {}, Used: {}, Free: {}",
        format_size(stats.total),
        format_size(stats.used),
        format_size(stats.free)
    );

    Ok(percent > f64::from(threshold_pct))
}
