use anyhow::{Context, Result};
use contributions_scraper::{parse_calendar, ContributionsClient, ScraperConfig, YearKey};
use scraper::{Html, Selector};
use std::env;
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get username, year and test name from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Please provide a username, a year (or `last`) and a test name");
        eprintln!("Usage: cargo run --bin save_calendar_failure <USERNAME> <YEAR|last> <test_name>");
        std::process::exit(1);
    }

    let username = &args[1];
    // `last` selects the trailing 365-day window
    let key = match args[2].as_str() {
        "last" => YearKey::Trailing,
        year => YearKey::Year(year.parse().context("Year must be a number or `last`")?),
    };
    let test_name = &args[3];

    // Create HTTP client
    let client = ContributionsClient::new(&ScraperConfig::default())
        .context("Failed to create HTTP client")?;
    let url = client.calendar_url(username, key);

    // Fetch the calendar fragment
    println!("Fetching calendar from {}...", url);
    let html = client
        .fetch_fragment(&url, username)
        .await
        .context("Failed to fetch calendar")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nAttempting to parse with the scraper to confirm failure:");

    // Check which of the elements the parser depends on are present
    let document = Html::parse_document(&html);
    let has = |css: &str| -> Result<bool> {
        let selector = Selector::parse(css)
            .map_err(|e| anyhow::anyhow!("bad selector {}: {:?}", css, e))?;
        Ok(document.select(&selector).next().is_some())
    };

    let has_table = has(".js-calendar-graph-table")?;
    let has_days = has(".js-calendar-graph-table .ContributionCalendar-day")?;
    let has_total = has(".js-yearly-contributions h2")?;
    let has_tooltips = has(".js-calendar-graph tool-tip")?;

    println!("HTML analysis results:");
    println!("  - Has calendar table: {}", has_table);
    println!("  - Has day cells: {}", has_days);
    println!("  - Has total header: {}", has_total);
    println!("  - Has tooltips: {}", has_tooltips);

    // Now try to parse it with the actual parser
    match parse_calendar(&html, key) {
        Ok(result) => {
            println!(
                "Parse succeeded ({} days, total {}). This may not be a failure case.",
                result.days.len(),
                result.total
            );
        }
        Err(e) => {
            println!("Parse failed with error: {}", e);

            if !has_table || !has_days || !has_total {
                println!("   Missing required HTML elements - structural issue");
            } else {
                println!("   Has all required elements - likely an attribute parsing issue");
            }

            println!("\nThis test case has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
