//! Page-Sweep main entry point
//!
//! This is the command-line interface for the Page-Sweep paged scraper.

use clap::Parser;
use page_sweep::config::{load_config, validate, Config};
use page_sweep::crawler::sweep;
use page_sweep::output::{print_statistics, LogReporter, SweepStats};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Page-Sweep: fetch a numbered run of pages and extract one field from each
///
/// Page ids `start..start+length` are substituted into the URL template,
/// fetched by a fixed pool of workers, and the text matching the selector
/// is logged for each page as it arrives.
#[derive(Parser, Debug)]
#[command(name = "page-sweep")]
#[command(version = "1.0.0")]
#[command(about = "Fetch numbered pages concurrently and extract a field", long_about = None)]
struct Cli {
    /// URL to scrape, with one %d placeholder for the page id [default: http://example.com/%d]
    #[arg(long)]
    url: Option<String>,

    /// From where to start [default: 0]
    #[arg(long)]
    start: Option<u64>,

    /// Number of pages to scrape [default: 10]
    #[arg(long)]
    length: Option<u64>,

    /// Number of workers [default: 3]
    #[arg(long)]
    workers: Option<usize>,

    /// CSS selector of the field to extract [default: .name]
    #[arg(long)]
    selector: Option<String>,

    /// Optional TOML file with a [sweep] table; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Builds the effective configuration: file values, then flag overrides
    fn into_config(self) -> Result<Config, page_sweep::ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                load_config(path)?
            }
            None => Config::default(),
        };

        let sweep = &mut config.sweep;
        if let Some(url) = self.url {
            sweep.url_template = url;
        }
        if let Some(start) = self.start {
            sweep.start = start;
        }
        if let Some(length) = self.length {
            sweep.length = length;
        }
        if let Some(workers) = self.workers {
            sweep.workers = workers;
        }
        if let Some(selector) = self.selector {
            sweep.selector = selector;
        }

        validate(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let stats = Arc::new(SweepStats::new());
    let reported = sweep(&config.sweep, Arc::new(LogReporter), Arc::clone(&stats)).await?;
    tracing::debug!("Sink reported {} results", reported);

    let params = &config.sweep;
    tracing::info!(
        "{} {} {} {}",
        params.url_template,
        params.start,
        params.length,
        params.workers
    );
    print_statistics(&stats.snapshot());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_sweep=info,warn"),
            1 => EnvFilter::new("page_sweep=debug,info"),
            2 => EnvFilter::new("page_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
