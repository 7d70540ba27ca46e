use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use patchcat::{
    config::Config,
    fetch::Fetcher,
    model::parse_catalog,
    output::{print_catalog, OutputFormat},
};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "patchcat")]
#[command(
    author,
    version,
    about = "Fetch a vendor patch catalog and print it grouped by product version"
)]
struct Cli {
    /// Catalog URL (defaults to the vendor's published feed)
    #[arg(long)]
    url: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<String>,

    /// Suppress the fetch progress spinner
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    let format_str = cli.format.unwrap_or(config.default_format);
    let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))?;
    let url = cli.url.unwrap_or(config.catalog_url);
    let timeout = Duration::from_secs(cli.timeout.unwrap_or(config.timeout_secs));

    let is_interactive = format == OutputFormat::Text && !cli.quiet;

    let spinner = if is_interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Fetching patch catalog...");
        Some(pb)
    } else {
        None
    };

    let fetcher = Fetcher::new(timeout)?;
    let fetched = fetcher.fetch_text(&url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let body = fetched?;
    let catalog = parse_catalog(&body)?;
    print_catalog(&catalog, format)?;

    Ok(exit_codes::SUCCESS)
}
