use chrono::NaiveDate;
use scraper::ElementRef;
use std::collections::HashMap;

use crate::error::{Result, ScrapeError};
use crate::model::{ContributionDay, Level};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tooltip elements keyed by the id of the calendar cell they describe.
pub type TooltipIndex<'a> = HashMap<&'a str, ElementRef<'a>>;

/// Parse one calendar cell into a [`ContributionDay`].
///
/// The count comes from the cell's tooltip. A missing tooltip, or one whose
/// text does not start with a number ("No contributions on ..."), means zero.
pub fn parse_day(cell: ElementRef<'_>, tooltips: &TooltipIndex<'_>) -> Result<ContributionDay> {
    let element = cell.value();

    let raw_date = element.attr("data-date");
    let date = raw_date
        .and_then(parse_canonical_date)
        .ok_or_else(|| ScrapeError::MalformedDate {
            value: raw_date.map(str::to_string),
        })?;

    let raw_level = element.attr("data-level");
    let level = raw_level
        .and_then(|value| value.trim().parse::<u8>().ok())
        .and_then(Level::new)
        .ok_or_else(|| ScrapeError::MalformedLevel {
            date,
            value: raw_level.map(str::to_string),
        })?;

    // Zero-activity days often have no tooltip at all
    let count = element
        .id()
        .and_then(|id| tooltips.get(id))
        .map(|tooltip| leading_count(&tooltip.text().collect::<String>()))
        .unwrap_or(0);

    Ok(ContributionDay { date, count, level })
}

/// Parse a zero-padded `YYYY-MM-DD` date. chrono also accepts `2021-1-9`,
/// which would sort out of place among the cells, so the value must
/// round-trip exactly.
pub fn parse_canonical_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == value)
}

/// Leading run of ASCII digits in `text` after trimming, or 0 if there is none.
pub fn leading_count(text: &str) -> u32 {
    let trimmed = text.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match &trimmed[..end] {
        "" => 0,
        // saturate on overflow
        digits => digits.parse().unwrap_or(u32::MAX),
    }
}
