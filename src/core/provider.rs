/// OS metrics provider interface
///
/// The sampler only ever talks to this trait. `SysinfoProvider` in
/// `core::system` is the production implementation; tests use the
/// mockall-generated `MockMetricsProvider`.

use std::time::Duration;
use thiserror::Error;

/// Whole-provider failure. Anything that reaches the client as HTTP 500.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("system metrics unavailable: {0}")]
    Unavailable(String),

    #[error("sampling task failed: {0}")]
    Join(String),
}

impl MetricsError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Failure reading a single process. Expected under normal process churn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("process {pid} exited during enumeration")]
    Gone { pid: u32 },

    #[error("access denied reading process {pid}")]
    AccessDenied { pid: u32 },

    #[error("process {pid} is a zombie")]
    Zombie { pid: u32 },
}

impl ProcessError {
    pub fn pid(&self) -> u32 {
        match *self {
            ProcessError::Gone { pid }
            | ProcessError::AccessDenied { pid }
            | ProcessError::Zombie { pid } => pid,
        }
    }
}

/// Raw virtual memory totals as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualMemory {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f64,
}

/// One process as read by the provider, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub status: String,
}

pub type ProcessReading = Result<RawProcess, ProcessError>;

#[cfg_attr(test, mockall::automock)]
pub trait MetricsProvider: Send + Sync {
    /// Host-wide CPU utilization averaged over `window`. Blocks for the window.
    fn cpu_percent_over(&self, window: Duration) -> Result<f64, MetricsError>;

    fn logical_core_count(&self) -> Result<usize, MetricsError>;

    fn virtual_memory(&self) -> Result<VirtualMemory, MetricsError>;

    /// Boot time in seconds since the Unix epoch
    fn boot_time_epoch(&self) -> Result<i64, MetricsError>;

    /// All processes in the provider's natural order. Each entry may fail
    /// on its own without failing the listing.
    fn list_processes(&self) -> Result<Vec<ProcessReading>, MetricsError>;
}
