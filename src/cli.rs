/// CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::AppConfig;

// Build timestamp injected at compile time by build.rs
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "sysdash")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web dashboard (default)
    Serve(ServeArgs),

    /// Sample once and print to stdout
    Snapshot {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Host to bind to [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 5000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seconds between page reloads [default: 5]
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Enable CORS for cross-origin requests
    #[arg(long, overrides_with = "no_cors")]
    pub cors: bool,

    /// Disable CORS even if the config file enables it
    #[arg(long, overrides_with = "cors")]
    pub no_cors: bool,

    /// Config file (defaults to ~/.config/sysdash/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    /// Flags that were actually given, as a config layer
    pub fn overrides(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            refresh_secs: self.refresh_secs,
            cors: match (self.cors, self.no_cors) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
        }
    }
}
