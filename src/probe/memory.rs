use sysinfo::{ProcessesToUpdate, System};

/// Processes using less resident memory than this are left out of the report.
pub const PROCESS_MEMORY_FLOOR: u64 = 100 * 1024 * 1024;

/// Number of processes listed in the optimize report.
pub const TOP_PROCESS_COUNT: usize = 10;

/// System memory statistics, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
}

impl MemoryStats {
    /// Share of memory not available to new allocations.
    pub fn percent_used(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.total.saturating_sub(self.available) as f64 / self.total as f64 * 100.0
    }
}

/// One row of the process report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// Resident set size in bytes
    pub memory: u64,
    pub cpu_percent: f32,
}

pub fn memory_stats() -> MemoryStats {
    let mut sys = System::new();
    sys.refresh_memory();

    MemoryStats {
        total: sys.total_memory(),
        available: sys.available_memory(),
    }
}

/// The `limit` processes with the largest resident memory above `min_memory`,
/// largest first.
///
/// CPU usage needs two samples, so a single refresh reports 0% for every
/// process.
pub fn top_processes(min_memory: u64, limit: usize) -> Vec<ProcessInfo> {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::All, true);

    let processes = sys
        .processes()
        .iter()
        .map(|(pid, process)| ProcessInfo {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
            memory: process.memory(),
            cpu_percent: process.cpu_usage(),
        })
        .collect();

    rank_processes(processes, min_memory, limit)
}

pub(crate) fn rank_processes(
    mut processes: Vec<ProcessInfo>,
    min_memory: u64,
    limit: usize,
) -> Vec<ProcessInfo> {
    processes.retain(|p| p.memory > min_memory);
    // pid breaks ties so the report is stable
    processes.sort_by(|a, b| b.memory.cmp(&a.memory).then(a.pid.cmp(&b.pid)));
    processes.truncate(limit);
    processes
}
