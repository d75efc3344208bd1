use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sysdash::cli::{Cli, Commands, ServeArgs};
use sysdash::core::{MetricsSampler, SysinfoProvider};
use sysdash::server;
use sysdash::utils::{truncate_chars, AppConfig, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        None => handle_serve(ServeArgs::default()).await?,
        Some(Commands::Serve(args)) => handle_serve(args).await?,
        Some(Commands::Snapshot { json }) => handle_snapshot(json).await?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn handle_serve(args: ServeArgs) -> Result<()> {
    let file = AppConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(file, args.overrides())?;
    server::run(settings).await
}

async fn handle_snapshot(json: bool) -> Result<()> {
    let sampler = MetricsSampler::new(Arc::new(SysinfoProvider::new()));
    let snapshot = sampler.sample_async().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("System Monitor\n");
    println!("CPU:       {:.1}% ({} cores)", snapshot.cpu_percent, snapshot.cpu_cores);
    println!(
        "Memory:    {:.2}GB / {:.2}GB ({:.1}%)",
        snapshot.memory.used_gb, snapshot.memory.total_gb, snapshot.memory.percent
    );
    println!("Boot Time: {}\n", snapshot.boot_time);

    println!("{:<8} {:<25} {:>7} {:>9}  {:<12}", "PID", "Name", "CPU %", "Memory %", "Status");
    println!("{}", "-".repeat(66));

    for process in &snapshot.processes {
        println!(
            "{:<8} {:<25} {:>7.1} {:>9.1}  {:<12}",
            process.pid,
            truncate_chars(&process.name, 25),
            process.cpu_percent,
            process.memory_percent,
            process.status
        );
    }

    Ok(())
}
