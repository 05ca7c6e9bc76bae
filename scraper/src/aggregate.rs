use chrono::Datelike;
use futures::future::try_join_all;
use log::info;

use crate::calendar::fetch_year;
use crate::client::ContributionsClient;
use crate::error::Result;
use crate::model::{
    AggregateResult, FlatContributions, NestedContributions, NestedDays, OutputMode, Totals,
    YearKey, YearResult,
};
use crate::request::ContributionsRequest;
use crate::years::discover_years;

/// Run the whole pipeline for one request.
///
/// Discovery always runs first, so an unknown user fails with
/// [`crate::error::ScrapeError::UserNotFound`] even when only the trailing year is wanted.
/// Calendars are then fetched concurrently; the first failure drops the
/// remaining fetches and fails the run.
pub async fn scrape_contributions(
    client: &ContributionsClient,
    request: &ContributionsRequest,
) -> Result<AggregateResult> {
    let username = request.username.as_str();

    // Find which years exist, filtered to the requested ones unless fetching all
    let requested = request.filters_years().then_some(&request.years);
    let years = discover_years(client, username, requested).await?;

    // One calendar per year, plus the trailing window when asked for
    let keys: Vec<YearKey> = years
        .into_iter()
        .map(YearKey::Year)
        .chain(request.include_trailing_year.then_some(YearKey::Trailing))
        .collect();
    info!("fetching {} calendars for {}", keys.len(), username);

    // Fetch them all at once; an error drops the fetches still in flight
    let results = try_join_all(keys.into_iter().map(|key| fetch_year(client, username, key))).await?;

    let aggregate = merge(results, request.output_mode);
    info!(
        "scraped {} days across {} calendars for {}",
        aggregate.day_count(),
        aggregate.totals().len(),
        username
    );
    Ok(aggregate)
}

pub fn merge(results: Vec<YearResult>, output_mode: OutputMode) -> AggregateResult {
    match output_mode {
        OutputMode::Flat => AggregateResult::Flat(merge_flat(results)),
        OutputMode::Nested => AggregateResult::Nested(merge_nested(results)),
    }
}

/// Concatenate days in ascending key order, trailing window last, whatever
/// order the results arrived in.
pub fn merge_flat(mut results: Vec<YearResult>) -> FlatContributions {
    results.sort_by_key(|result| result.key);

    let mut totals = Totals::new();
    let mut days = Vec::with_capacity(results.iter().map(|result| result.days.len()).sum());
    for result in results {
        totals.insert(result.key, result.total);
        days.extend(result.days);
    }

    FlatContributions { totals, days }
}

/// File every day under year, month and day of month.
///
/// The trailing window overlaps calendar years, so the same date may arrive
/// from two keys. Results are merged in ascending key order and a later key
/// replaces the record for a date it shares, so the trailing window wins.
/// Each result is already free of duplicate dates.
pub fn merge_nested(mut results: Vec<YearResult>) -> NestedContributions {
    results.sort_by_key(|result| result.key);

    let mut totals = Totals::new();
    let mut days = NestedDays::new();
    for result in results {
        totals.insert(result.key, result.total);
        for day in result.days {
            days.entry(day.date.year())
                .or_default()
                .entry(day.date.month())
                .or_default()
                .insert(day.date.day(), day);
        }
    }

    NestedContributions { totals, days }
}
