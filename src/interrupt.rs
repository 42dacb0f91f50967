//! User interrupt (SIGINT) tracking.
//!
//! The handler only flips an atomic flag. Walks and deletion loops poll
//! [`requested`] between items so the file in flight always completes, then
//! the run unwinds with [`CleanError::Interrupted`](crate::error::CleanError).

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether an interrupt has been received.
pub fn requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install the SIGINT handler. No-op on platforms without POSIX signals.
pub fn install_handler() {
    #[cfg(unix)]
    {
        let handler = on_sigint as extern "C" fn(libc::c_int);
        // SAFETY: the handler only performs an atomic store, which is
        // async-signal-safe.
        unsafe {
            libc::signal(libc::SIGINT, handler as libc::sighandler_t);
        }
    }
}

#[cfg(unix)]
extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}
