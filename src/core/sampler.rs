/// Metrics sampling
///
/// Queries the provider once per call and normalizes the raw readings into
/// a `MetricsSnapshot`. There is no cache and no background loop: each call
/// pays the full CPU sampling window.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use super::provider::{MetricsError, MetricsProvider, RawProcess};
use super::snapshot::{MemoryStats, MetricsSnapshot, ProcessInfo};
use crate::utils::{bytes_to_gb, format_local_timestamp, round_to};

/// CPU utilization is averaged over this window. Blocks the caller.
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Number of processes kept in a snapshot
pub const TOP_PROCESSES: usize = 10;

#[derive(Clone)]
pub struct MetricsSampler {
    provider: Arc<dyn MetricsProvider>,
}

impl MetricsSampler {
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self { provider }
    }

    /// Take one snapshot. Blocks for `SAMPLE_WINDOW`.
    pub fn sample(&self) -> Result<MetricsSnapshot, MetricsError> {
        let cpu_percent = self.provider.cpu_percent_over(SAMPLE_WINDOW)?;

        let cpu_cores = self.provider.logical_core_count()?;
        if cpu_cores == 0 {
            return Err(MetricsError::unavailable("provider reported zero logical cores"));
        }

        let vm = self.provider.virtual_memory()?;
        let memory = MemoryStats {
            total_gb: bytes_to_gb(vm.total_bytes),
            used_gb: bytes_to_gb(vm.used_bytes),
            percent: round_to(vm.percent.clamp(0.0, 100.0), 1),
        };

        let boot_epoch = self.provider.boot_time_epoch()?;
        let boot_time = format_local_timestamp(boot_epoch).ok_or_else(|| {
            MetricsError::unavailable(format!("boot time {} is not a valid timestamp", boot_epoch))
        })?;

        let processes = top_processes(self.provider.list_processes()?);

        tracing::debug!(
            cpu_percent,
            cpu_cores,
            memory_percent = memory.percent,
            processes = processes.len(),
            "sampled system metrics"
        );

        Ok(MetricsSnapshot {
            cpu_percent: round_to(cpu_percent.clamp(0.0, 100.0), 1),
            cpu_cores,
            memory,
            boot_time,
            processes,
        })
    }

    /// Run `sample` on the blocking pool so the CPU window never stalls
    /// the async reactor.
    pub async fn sample_async(&self) -> Result<MetricsSnapshot, MetricsError> {
        let sampler = self.clone();
        tokio::task::spawn_blocking(move || sampler.sample())
            .await
            .map_err(|e| MetricsError::Join(e.to_string()))?
    }
}

/// Drop unreadable processes, rank by CPU and keep the top entries
pub fn top_processes<I>(readings: I) -> Vec<ProcessInfo>
where
    I: IntoIterator<Item = Result<RawProcess, super::provider::ProcessError>>,
{
    let mut survivors: Vec<RawProcess> = readings
        .into_iter()
        .filter_map(|reading| match reading {
            Ok(process) => Some(process),
            Err(err) => {
                tracing::trace!(pid = err.pid(), error = %err, "skipping process");
                None
            }
        })
        .collect();

    // Stable sort keeps provider order among equal CPU values
    survivors.sort_by(|a, b| {
        percent_or_zero(b.cpu_percent)
            .partial_cmp(&percent_or_zero(a.cpu_percent))
            .unwrap_or(Ordering::Equal)
    });
    survivors.truncate(TOP_PROCESSES);

    survivors
        .into_iter()
        .map(|p| ProcessInfo {
            pid: p.pid,
            name: p.name,
            cpu_percent: round_to(percent_or_zero(p.cpu_percent), 1),
            memory_percent: round_to(percent_or_zero(p.memory_percent), 1),
            status: p.status,
        })
        .collect()
}

fn percent_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::{MockMetricsProvider, ProcessError, VirtualMemory};

    fn raw(pid: u32, cpu: Option<f64>, mem: Option<f64>) -> RawProcess {
        RawProcess {
            pid,
            name: format!("proc-{}", pid),
            cpu_percent: cpu,
            memory_percent: mem,
            status: "running".to_string(),
        }
    }

    fn healthy_mock(processes: Vec<Result<RawProcess, ProcessError>>) -> MockMetricsProvider {
        let mut mock = MockMetricsProvider::new();
        mock.expect_cpu_percent_over()
            .withf(|window| *window == SAMPLE_WINDOW)
            .returning(|_| Ok(37.25));
        mock.expect_logical_core_count().returning(|| Ok(8));
        mock.expect_virtual_memory().returning(|| {
            Ok(VirtualMemory {
                total_bytes: 17_179_869_184,
                used_bytes: 2_147_483_648,
                percent: 12.5,
            })
        });
        mock.expect_boot_time_epoch().returning(|| Ok(1_700_000_000));
        mock.expect_list_processes()
            .return_once(move || Ok(processes));
        mock
    }

    #[test]
    fn test_sample_assembles_snapshot() {
        let processes = vec![Ok(raw(1, Some(1.0), Some(0.5))), Ok(raw(2, Some(3.0), Some(1.25)))];
        let sampler = MetricsSampler::new(Arc::new(healthy_mock(processes)));

        let snapshot = sampler.sample().unwrap();

        assert_eq!(snapshot.cpu_percent, 37.3);
        assert_eq!(snapshot.cpu_cores, 8);
        assert_eq!(snapshot.memory.total_gb, 16.0);
        assert_eq!(snapshot.memory.used_gb, 2.0);
        assert_eq!(snapshot.memory.percent, 12.5);
        assert!(snapshot.memory.used_gb <= snapshot.memory.total_gb);
        assert_eq!(snapshot.boot_time.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert_eq!(snapshot.processes.iter().map(|p| p.pid).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_skips_gone_processes_without_failing() {
        // 15 candidates, 3 vanish mid-scan
        let readings: Vec<_> = (1..=15u32)
            .map(|pid| {
                if pid % 5 == 0 {
                    Err(ProcessError::Gone { pid })
                } else {
                    Ok(raw(pid, Some(pid as f64), Some(0.1)))
                }
            })
            .collect();
        let sampler = MetricsSampler::new(Arc::new(healthy_mock(readings)));

        let snapshot = sampler.sample().unwrap();

        assert_eq!(snapshot.processes.len(), TOP_PROCESSES);
        assert!(snapshot.processes.iter().all(|p| p.pid % 5 != 0));
        assert!(snapshot
            .processes
            .windows(2)
            .all(|w| w[0].cpu_percent >= w[1].cpu_percent));
        assert_eq!(snapshot.processes[0].pid, 14);
    }

    #[test]
    fn test_all_process_error_kinds_are_absorbed() {
        let readings = vec![
            Err(ProcessError::AccessDenied { pid: 1 }),
            Ok(raw(2, Some(5.0), Some(1.0))),
            Err(ProcessError::Zombie { pid: 3 }),
            Err(ProcessError::Gone { pid: 4 }),
        ];

        let top = top_processes(readings);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].pid, 2);
    }

    #[test]
    fn test_rounding_and_missing_values() {
        let top = top_processes(vec![
            Ok(raw(1, Some(12.345), Some(3.14159))),
            Ok(raw(2, None, None)),
        ]);

        assert_eq!(top[0].cpu_percent, 12.3);
        assert_eq!(top[0].memory_percent, 3.1);
        assert_eq!(top[1].cpu_percent, 0.0);
        assert_eq!(top[1].memory_percent, 0.0);
    }

    #[test]
    fn test_ties_keep_provider_order() {
        let top = top_processes(vec![
            Ok(raw(30, Some(2.0), None)),
            Ok(raw(10, Some(2.0), None)),
            Ok(raw(20, Some(2.0), None)),
            Ok(raw(40, Some(9.0), None)),
        ]);

        assert_eq!(top.iter().map(|p| p.pid).collect::<Vec<_>>(), vec![40, 30, 10, 20]);
    }

    #[test]
    fn test_fewer_than_ten_processes() {
        let top = top_processes(vec![Ok(raw(1, Some(0.0), Some(0.0)))]);
        assert_eq!(top.len(), 1);
        assert!(top_processes(Vec::new()).is_empty());
    }

    #[test]
    fn test_cpu_unavailable_fails_sample() {
        let mut mock = MockMetricsProvider::new();
        mock.expect_cpu_percent_over()
            .returning(|_| Err(MetricsError::unavailable("permission denied")));

        let sampler = MetricsSampler::new(Arc::new(mock));

        assert_eq!(
            sampler.sample(),
            Err(MetricsError::Unavailable("permission denied".to_string()))
        );
    }

    #[test]
    fn test_zero_cores_is_unavailable() {
        let mut mock = MockMetricsProvider::new();
        mock.expect_cpu_percent_over().returning(|_| Ok(10.0));
        mock.expect_logical_core_count().returning(|| Ok(0));

        let sampler = MetricsSampler::new(Arc::new(mock));

        assert!(matches!(sampler.sample(), Err(MetricsError::Unavailable(_))));
    }

    #[test]
    fn test_cpu_percent_is_clamped() {
        let mut mock = MockMetricsProvider::new();
        mock.expect_cpu_percent_over().returning(|_| Ok(100.4));
        mock.expect_logical_core_count().returning(|| Ok(1));
        mock.expect_virtual_memory().returning(|| {
            Ok(VirtualMemory { total_bytes: 1024, used_bytes: 512, percent: 50.0 })
        });
        mock.expect_boot_time_epoch().returning(|| Ok(0));
        mock.expect_list_processes().returning(|| Ok(Vec::new()));

        let snapshot = MetricsSampler::new(Arc::new(mock)).sample().unwrap();

        assert_eq!(snapshot.cpu_percent, 100.0);
        assert!(snapshot.cpu_cores >= 1);
    }

    #[tokio::test]
    async fn test_sample_async() {
        let sampler = MetricsSampler::new(Arc::new(healthy_mock(Vec::new())));
        let snapshot = sampler.sample_async().await.unwrap();
        assert!(snapshot.processes.is_empty());
    }
}
