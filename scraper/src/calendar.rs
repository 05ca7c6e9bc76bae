use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::client::ContributionsClient;
use crate::day::{parse_day, TooltipIndex};
use crate::error::{Result, ScrapeError};
use crate::model::{YearKey, YearResult};

static DAY_CELLS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".js-calendar-graph-table .ContributionCalendar-day").expect("day selector")
});
static TOTAL_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".js-yearly-contributions h2").expect("total selector"));
static TOOLTIPS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".js-calendar-graph tool-tip").expect("tooltip selector"));

/// Fetch and parse the calendar for `key`.
pub async fn fetch_year(
    client: &ContributionsClient,
    username: &str,
    key: YearKey,
) -> Result<YearResult> {
    let url = client.calendar_url(username, key);
    let html = client.fetch_fragment(&url, username).await?;

    let result = parse_calendar(&html, key)?;
    debug!(
        "parsed {} days for {} (total {})",
        result.days.len(),
        key,
        result.total
    );
    Ok(result)
}

/// Parse a calendar fragment.
///
/// Cells are sorted on their `data-date` attribute before parsing because the
/// document lays them out week by week, not chronologically. ISO dates sort
/// the same as strings and as dates.
pub fn parse_calendar(html: &str, key: YearKey) -> Result<YearResult> {
    let document = Html::parse_document(html);

    // Collect the day cells and put them in date order
    let mut cells: Vec<ElementRef> = document.select(&DAY_CELLS).collect();
    cells.sort_by_key(|cell| cell.value().attr("data-date").map_or("", str::trim));

    // Extract the total from the "1,234 contributions in 2021" header
    let total = document
        .select(&TOTAL_HEADER)
        .next()
        .and_then(|header| parse_total(&header.text().collect::<String>()))
        .ok_or(ScrapeError::TotalNotFound { key })?;

    // Tooltips are siblings of the table, linked to cells by id
    let tooltips = index_tooltips(&document);

    // Parse every cell; the first bad one fails the whole calendar
    let days = cells
        .into_iter()
        .map(|cell| parse_day(cell, &tooltips))
        .collect::<Result<Vec<_>>>()?;

    // Dates are canonical here, so sorted cells must be strictly ascending
    if let Some(pair) = days.windows(2).find(|pair| pair[0].date >= pair[1].date) {
        return Err(ScrapeError::DuplicateDate { date: pair[1].date });
    }

    Ok(YearResult { key, total, days })
}

fn index_tooltips(document: &Html) -> TooltipIndex<'_> {
    document
        .select(&TOOLTIPS)
        .filter_map(|tooltip| tooltip.value().attr("for").map(|target| (target, tooltip)))
        .collect()
}

/// Leading "1,234 " style number of the header text.
pub fn parse_total(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let end = trimmed.find(|c: char| !(c.is_ascii_digit() || c == ','))?;
    if !trimmed[end..].starts_with(char::is_whitespace) {
        return None;
    }

    let digits: String = trimmed[..end].chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
