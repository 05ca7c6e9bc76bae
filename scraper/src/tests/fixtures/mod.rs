use chrono::{Datelike, Duration, NaiveDate};
use std::fs;
use std::path::Path;

use crate::model::{ContributionDay, Level};

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a real failure case for regression testing
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Deterministic activity for a date; some days are zero.
pub fn day_for(date: NaiveDate) -> ContributionDay {
    let count = (date.ordinal() * 7 + date.year() as u32) % 9;
    let count = if count < 3 { 0 } else { count };
    let level = Level::new(count.min(4) as u8).unwrap();
    ContributionDay { date, count, level }
}

pub fn days_between(first: NaiveDate, last: NaiveDate) -> Vec<ContributionDay> {
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(day_for)
        .collect()
}

pub fn year_days(year: i32) -> Vec<ContributionDay> {
    days_between(date(year, 1, 1), date(year, 12, 31))
}

/// The 365 days ending on `today`.
pub fn trailing_days(today: NaiveDate) -> Vec<ContributionDay> {
    days_between(today - Duration::days(364), today)
}

pub fn sum_counts(days: &[ContributionDay]) -> u32 {
    days.iter().map(|d| d.count).sum()
}

pub fn with_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a calendar fragment the way the profile page does: one table row
/// per weekday, one column per week, so document order is not date order.
/// Zero-count days alternate between a "No contributions" tooltip and none.
pub fn calendar_html(total: u32, period: &str, days: &[ContributionDay]) -> String {
    let mut rows: Vec<Vec<&ContributionDay>> = vec![Vec::new(); 7];
    for day in days {
        rows[day.date.weekday().num_days_from_sunday() as usize].push(day);
    }

    let mut cells = String::new();
    let mut tooltips = String::new();
    for (row, row_days) in rows.iter().enumerate() {
        cells.push_str("<tr style=\"height: 10px\">\n");
        for (col, day) in row_days.iter().enumerate() {
            let id = format!("contribution-day-component-{}-{}", row, col);
            cells.push_str(&format!(
                "  <td tabindex=\"0\" data-ix=\"{col}\" aria-selected=\"false\" style=\"width: 10px\" data-date=\"{date}\" id=\"{id}\" data-level=\"{level}\" role=\"gridcell\" class=\"ContributionCalendar-day\"></td>\n",
                col = col,
                date = day.date.format("%Y-%m-%d"),
                id = id,
                level = day.level.get(),
            ));

            let when = day.date.format("%B %-d");
            if day.count > 0 {
                let noun = if day.count == 1 { "contribution" } else { "contributions" };
                tooltips.push_str(&format!(
                    "<tool-tip for=\"{}\" class=\"sr-only position-absolute\">{} {} on {}.</tool-tip>\n",
                    id, day.count, noun, when
                ));
            } else if day.date.day() % 2 == 0 {
                tooltips.push_str(&format!(
                    "<tool-tip for=\"{}\" class=\"sr-only position-absolute\">No contributions on {}.</tool-tip>\n",
                    id, when
                ));
            }
        }
        cells.push_str("</tr>\n");
    }

    format!(
        r#"<div class="js-yearly-contributions">
  <div class="position-relative">
    <h2 class="f4 text-normal mb-2">
      {total}
        contributions
        {period}
    </h2>
    <div class="border py-2 graph-before-activity-overview">
      <div class="js-calendar-graph mx-md-2 mx-3 d-flex flex-column flex-items-end flex-xl-items-center overflow-hidden pt-1 is-graph-loading graph-canvas ContributionCalendar height-full text-center">
        <table class="ContributionCalendar-grid js-calendar-graph-table" role="grid">
          <tbody>
{cells}          </tbody>
        </table>
{tooltips}      </div>
    </div>
  </div>
</div>
"#,
        total = with_thousands(total),
        period = period,
        cells = cells,
        tooltips = tooltips,
    )
}

pub fn year_calendar_html(year: i32) -> String {
    let days = year_days(year);
    calendar_html(sum_counts(&days), &format!("in {}", year), &days)
}

pub fn trailing_calendar_html(today: NaiveDate) -> String {
    let days = trailing_days(today);
    calendar_html(sum_counts(&days), "in the last year", &days)
}

/// Profile contributions tab with one year link per entry, newest first.
pub fn profile_html(years: &[i32]) -> String {
    let links: String = years
        .iter()
        .map(|year| {
            format!(
                "    <li><a class=\"js-year-link filter-item px-3 mb-2 py-2\" id=\"year-link-{0}\" href=\"/octocat?tab=overview&amp;from={0}-12-01&amp;to={0}-12-31\">\n      {0}\n    </a></li>\n",
                year
            )
        })
        .collect();

    format!(
        "<html><body><div class=\"js-profile-timeline-year-list\">\n  <ul class=\"filter-list small\">\n{}  </ul>\n</div></body></html>",
        links
    )
}
