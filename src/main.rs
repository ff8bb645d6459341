use atlas::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "atlas", about = "Search world country information from the terminal")]
struct Args {
    /// REST Countries base URL (overrides ATLAS_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Search for this name right after startup
    #[arg(short, long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config errors are reported after the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            timeout_secs: args.timeout_secs,
            query: args.query,
        },
    );

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "Atlas starting up against {} (timeout {:?})",
        resolved.base_url,
        resolved.timeout
    );

    atlas::tui::run(resolved)
}
