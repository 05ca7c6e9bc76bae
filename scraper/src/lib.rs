pub mod aggregate;
pub mod calendar;
pub mod client;
pub mod config;
pub mod day;
pub mod error;
pub mod model;
pub mod request;
pub mod years;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::aggregate::{merge, merge_flat, merge_nested, scrape_contributions};
pub use crate::calendar::{fetch_year, parse_calendar};
pub use crate::client::ContributionsClient;
pub use crate::config::ScraperConfig;
pub use crate::day::parse_day;
pub use crate::error::{ErrorClass, ScrapeError};
pub use crate::model::{
    AggregateResult, ContributionDay, FlatContributions, Level, NestedContributions, OutputMode,
    YearKey, YearResult,
};
pub use crate::request::ContributionsRequest;
pub use crate::years::{discover_years, parse_year_links};
