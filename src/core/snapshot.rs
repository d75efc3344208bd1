/// Snapshot types produced by one sampling pass

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub cpu_percent: f64,
    pub cpu_cores: usize,
    pub memory: MemoryStats,
    pub boot_time: String,
    pub processes: Vec<ProcessInfo>,
}
