use log::{debug, warn};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::client::ContributionsClient;
use crate::error::{Result, ScrapeError};

static YEAR_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".js-year-link").expect("year link selector"));

/// Years that have a contribution calendar on `username`'s profile, restricted
/// to `requested` when given.
///
/// Any failure to load the profile is reported as [`ScrapeError::UserNotFound`],
/// including a username that could never exist. A transport error is kept as
/// its source.
pub async fn discover_years(
    client: &ContributionsClient,
    username: &str,
    requested: Option<&BTreeSet<i32>>,
) -> Result<BTreeSet<i32>> {
    let url = client.years_url(username);
    let html = client
        .fetch_fragment(&url, username)
        .await
        .map_err(|e| ScrapeError::UserNotFound {
            username: username.to_string(),
            source: match e {
                ScrapeError::Http { source, .. } => Some(source),
                _ => None,
            },
        })?;

    // Year links label each calendar, newest first
    let discovered = parse_year_links(&html);
    debug!("{} has calendars for {:?}", username, discovered);

    Ok(match requested {
        Some(requested) => discovered.intersection(requested).copied().collect(),
        None => discovered,
    })
}

pub fn parse_year_links(html: &str) -> BTreeSet<i32> {
    let document = Html::parse_document(html);

    document
        .select(&YEAR_LINKS)
        .filter_map(|link| {
            // Labels are padded with whitespace; "Show more" style links are skipped
            let label = link.text().collect::<String>();
            match label.trim().parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    warn!("skipping year link with label {:?}", label.trim());
                    None
                }
            }
        })
        .collect()
}
