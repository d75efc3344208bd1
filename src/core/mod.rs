pub mod provider;
pub mod sampler;
pub mod snapshot;
pub mod system;

pub use provider::{MetricsError, MetricsProvider, ProcessError};
pub use sampler::MetricsSampler;
pub use snapshot::{MemoryStats, MetricsSnapshot, ProcessInfo};
pub use system::SysinfoProvider;
