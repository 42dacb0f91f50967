//! Operating-system statistics and the optional optimize pass.
//!
//! - [`disk`]: total/used/free space for the volume holding a path
//! - [`memory`]: memory usage and the top memory-consuming processes
//! - [`privilege`]: the page-cache drop, gated behind a capability check

pub mod disk;
pub mod memory;
pub mod privilege;

pub use disk::{DiskStats, check_disk_space, disk_usage};
pub use memory::{MemoryStats, ProcessInfo, memory_stats, top_processes};
pub use privilege::{CacheDropper, EffectiveUser, Privilege};
