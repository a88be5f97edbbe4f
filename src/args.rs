use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shop_audit::CollectorConfig;
use shop_audit::error::Result;

#[derive(Parser, Debug)]
#[command(name = "shop-audit")]
#[command(about = "Drives a WebDriver browser through a team store to collect listings and feed counts")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store front URL to start from (overrides the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Directory reports are written into
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Safety cap on listing pages visited
    #[arg(long)]
    pub page_cap: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect jacket listings from every page and write a report
    Jackets,

    /// Count video feeds under New & Features
    Videos {
        /// Age cutoff in days for the "older than" count
        #[arg(long, default_value_t = 3)]
        min_age_days: i64,
    },
}

/// Build the run configuration from the config file, environment and flags.
/// Flags win over the environment, which wins over the file.
pub fn resolve_config(args: &Args) -> Result<CollectorConfig> {
    let mut config = match &args.config {
        Some(path) => CollectorConfig::from_file(path)?,
        None => CollectorConfig::default(),
    };

    if let Some(url) = &args.url {
        config.start_url = url.clone();
    }
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        if !url.is_empty() {
            config.webdriver_url = url;
        }
    }
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(cap) = args.page_cap {
        config.page_cap = Some(cap);
    }

    config.validated()
}
