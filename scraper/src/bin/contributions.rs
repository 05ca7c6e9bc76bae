use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use contributions_scraper::{
    scrape_contributions, ContributionsClient, ContributionsRequest, ErrorClass, OutputMode,
    ScrapeError, ScraperConfig,
};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum Format {
    /// One date-ordered list of days
    Flat,
    /// Days keyed by year, month and day of month
    Nested,
}

impl From<Format> for OutputMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Flat => OutputMode::Flat,
            Format::Nested => OutputMode::Nested,
        }
    }
}

/// Scrape a user's public contribution calendar and print it as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Profile username
    username: String,

    /// Year to fetch, `all` for every year or `last` for the trailing 365 days.
    /// Repeatable; omit for every year plus the trailing window.
    #[arg(short = 'y', long = "year")]
    years: Vec<String>,

    /// Output shape
    #[arg(long, value_enum, default_value_t = Format::Flat)]
    format: Format,

    /// Site root to scrape
    #[arg(long, default_value = contributions_scraper::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            match e.downcast_ref::<ScrapeError>().map(ScrapeError::class) {
                Some(ErrorClass::NotFound) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScraperConfig::default()
        .with_base_url(cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    // Create HTTP client
    let client = ContributionsClient::new(&config).map_err(ScrapeError::Client)?;

    // `-y` values follow the same rules as the `y` query parameter
    let request = ContributionsRequest::from_query(cli.username, cli.years.as_slice(), None)?
        .with_output_mode(cli.format.into());

    let result = scrape_contributions(&client, &request).await?;

    // Write to stdout as JSON
    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("Failed to serialize contributions")?;
    println!("{}", json);

    Ok(())
}
