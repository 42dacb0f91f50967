use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{CleanError, Result};

/// Kernel knob that drops the page cache, dentries and inodes when `3` is
/// written to it.
pub const DROP_CACHES_PATH: &str = "/proc/sys/vm/drop_caches";

/// Capability check for privileged operations.
pub trait Privilege {
    fn has_privilege(&self) -> bool;
}

/// Privileged when the effective user is root.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveUser;

impl Privilege for EffectiveUser {
    fn has_privilege(&self) -> bool {
        #[cfg(unix)]
        {
            // SAFETY: geteuid has no preconditions and cannot fail.
            unsafe { libc::geteuid() == 0 }
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

impl<F: Fn() -> bool> Privilege for F {
    fn has_privilege(&self) -> bool {
        self()
    }
}

/// Flushes dirty pages and asks the kernel to drop its caches.
#[derive(Debug)]
pub struct CacheDropper<P> {
    privilege: P,
    target: PathBuf,
}

impl<P: Privilege> CacheDropper<P> {
    pub fn new(privilege: P) -> Self {
        Self {
            privilege,
            target: PathBuf::from(DROP_CACHES_PATH),
        }
    }

    /// Write the signal to `target` instead of the kernel knob.
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Drop the caches if privileged.
    ///
    /// Returns `Ok(false)` without side effects when the capability check
    /// fails. The handle on the target is closed before returning on every
    /// path.
    pub fn drop_caches(&self) -> Result<bool> {
        if !self.privilege.has_privilege() {
            warn!("Skipping system cache clearing (requires root privileges)");
            return Ok(false);
        }

        info!("Clearing system cache...");

        #[cfg(unix)]
        {
            // SAFETY: sync has no preconditions.
            unsafe { libc::sync() };
        }

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.target)
            .map_err(|source| CleanError::Io {
                path: self.target.clone(),
                source,
            })?;
        file.write_all(b"3").map_err(|source| CleanError::Io {
            path: self.target.clone(),
            source,
        })?;
        drop(file);

        info!("System cache cleared successfully");
        Ok(true)
    }
}
