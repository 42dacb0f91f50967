//! Optimize pass: memory report, page-cache drop and top processes.

use tracing::{error, info};

use crate::probe::memory::{PROCESS_MEMORY_FLOOR, TOP_PROCESS_COUNT};
use crate::probe::{CacheDropper, MemoryStats, Privilege, ProcessInfo, memory_stats, top_processes};
use crate::sweep::format_size;

#[derive(Debug, Clone)]
pub struct OptimizeReport {
    pub memory_before: MemoryStats,
    pub memory_after: MemoryStats,
    pub caches_dropped: bool,
    pub top_processes: Vec<ProcessInfo>,
}

/// Log memory usage, drop caches when privileged, list the heaviest
/// processes and log memory usage again.
///
/// A failed cache drop is logged and does not stop the report.
pub fn optimize<P: Privilege>(dropper: &CacheDropper<P>) -> OptimizeReport {
    info!("Starting system optimization...");

    let memory_before = memory_stats();
    info!("Current memory usage: {:.1}%", memory_before.percent_used());
    info!("Available memory: {}", format_size(memory_before.available));

    let caches_dropped = match dropper.drop_caches() {
        Ok(dropped) => dropped,
        Err(err) => {
            error!("Error clearing system cache: {err}");
            false
        }
    };

    let processes = top_processes(PROCESS_MEMORY_FLOOR, TOP_PROCESS_COUNT);
    info!("Top memory-consuming processes:");
    for (rank, process) in processes.iter().enumerate() {
        info!(
            "{}. PID: {}, Name: {}, Memory: {}, CPU: {:.1}%",
            rank + 1,
            process.pid,
            process.name,
            format_size(process.memory),
            process.cpu_percent
        );
    }

    let memory_after = memory_stats();
    info!(
        "Memory usage after optimization: {:.1}%",
        memory_after.percent_used()
    );
    info!("Available memory: {}", format_size(memory_after.available));

    OptimizeReport {
        memory_before,
        memory_after,
        caches_dropped,
        top_processes: processes,
    }
}
