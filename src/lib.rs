//! sysdash - auto-refreshing web dashboard for host metrics
//!
//! Each dashboard request samples CPU, memory, boot time and the busiest
//! processes through a `MetricsProvider`, then renders the snapshot as HTML.

pub mod cli;
pub mod core;
pub mod server;
pub mod utils;
