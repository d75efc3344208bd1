/// `sysinfo`-backed metrics provider
///
/// Every call builds its own `System`, so concurrent requests never share
/// refresh state and no locking is needed.

use std::collections::HashSet;
use std::time::Duration;

use sysinfo::{Pid, Process, ProcessStatus, System, ThreadKind, MINIMUM_CPU_UPDATE_INTERVAL};

use super::provider::{
    MetricsError, MetricsProvider, ProcessError, ProcessReading, RawProcess, VirtualMemory,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProvider;

impl SysinfoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsProvider for SysinfoProvider {
    fn cpu_percent_over(&self, window: Duration) -> Result<f64, MetricsError> {
        let mut sys = System::new();
        sys.refresh_cpu();
        if sys.cpus().is_empty() {
            return Err(MetricsError::unavailable("no CPUs reported by the OS"));
        }

        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu();

        let usage = sys.global_cpu_info().cpu_usage() as f64;
        Ok(usage.clamp(0.0, 100.0))
    }

    fn logical_core_count(&self) -> Result<usize, MetricsError> {
        let mut sys = System::new();
        sys.refresh_cpu();
        match sys.cpus().len() {
            0 => Err(MetricsError::unavailable("no CPUs reported by the OS")),
            n => Ok(n),
        }
    }

    fn virtual_memory(&self) -> Result<VirtualMemory, MetricsError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(MetricsError::unavailable("total memory reported as zero"));
        }

        // Same definition as `free`: whatever is not available counts as used
        let available = sys.available_memory().min(total);
        let percent = (total - available) as f64 / total as f64 * 100.0;

        Ok(VirtualMemory {
            total_bytes: total,
            used_bytes: sys.used_memory().min(total),
            percent,
        })
    }

    fn boot_time_epoch(&self) -> Result<i64, MetricsError> {
        match System::boot_time() {
            0 => Err(MetricsError::unavailable("boot time not reported by the OS")),
            secs => i64::try_from(secs)
                .map_err(|_| MetricsError::unavailable(format!("boot time out of range: {}", secs))),
        }
    }

    fn list_processes(&self) -> Result<Vec<ProcessReading>, MetricsError> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total_memory = sys.total_memory();
        if total_memory == 0 {
            return Err(MetricsError::unavailable("total memory reported as zero"));
        }

        // Per-process CPU usage is a delta between two refreshes
        sys.refresh_processes();
        let mut first_seen: Vec<u32> = processes_only(&sys).map(|(pid, _)| pid.as_u32()).collect();
        first_seen.sort_unstable();

        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_processes();

        let alive: HashSet<u32> = processes_only(&sys).map(|(pid, _)| pid.as_u32()).collect();
        let mut readings: Vec<(u32, ProcessReading)> = Vec::with_capacity(first_seen.len());

        for (pid, process) in processes_only(&sys) {
            let pid = pid.as_u32();
            readings.push((
                pid,
                Ok(RawProcess {
                    pid,
                    name: process.name().to_string(),
                    cpu_percent: Some(process.cpu_usage() as f64),
                    memory_percent: Some(process.memory() as f64 / total_memory as f64 * 100.0),
                    status: status_label(process.status()),
                }),
            ));
        }

        for pid in first_seen.into_iter().filter(|pid| !alive.contains(pid)) {
            readings.push((pid, Err(ProcessError::Gone { pid })));
        }

        // Ascending PID is the natural listing order
        readings.sort_by_key(|(pid, _)| *pid);
        Ok(readings.into_iter().map(|(_, reading)| reading).collect())
    }
}

/// Process table without userland threads
///
/// On Linux sysinfo lists every `/proc/<pid>/task` entry next to its
/// process. Kernel threads stay, as `ps` shows them.
fn processes_only(sys: &System) -> impl Iterator<Item = (&Pid, &Process)> {
    sys.processes()
        .iter()
        .filter(|(_, process)| process.thread_kind() != Some(ThreadKind::Userland))
}

/// Lowercase, `ps`-style label for a process state
pub fn status_label(status: ProcessStatus) -> String {
    match status {
        ProcessStatus::Run => "running".to_string(),
        ProcessStatus::Sleep => "sleeping".to_string(),
        ProcessStatus::Idle => "idle".to_string(),
        ProcessStatus::Stop => "stopped".to_string(),
        ProcessStatus::Zombie => "zombie".to_string(),
        ProcessStatus::Dead => "dead".to_string(),
        ProcessStatus::Tracing => "tracing-stop".to_string(),
        ProcessStatus::UninterruptibleDiskSleep => "disk-sleep".to_string(),
        ProcessStatus::Parked => "parked".to_string(),
        other => other.to_string().to_lowercase(),
    }
}
