use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::model::YearKey;

const REQUESTED_WITH: &str = "x-requested-with";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
const MAX_USERNAME_LEN: usize = 39;

/// Thin wrapper over a shared `reqwest::Client` that knows the source site's
/// URL shapes and the headers it expects on fragment requests.
#[derive(Debug, Clone)]
pub struct ContributionsClient {
    client: Client,
    base_url: String,
}

/// Usernames are ASCII letters, digits and hyphens, not starting with a hyphen,
/// at most 39 characters. Anything else is rejected before a URL is built from it.
pub fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-');

    if valid {
        Ok(())
    } else {
        Err(ScrapeError::InvalidUsername(username.to_string()))
    }
}

impl ContributionsClient {
    pub fn new(config: &ScraperConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, username)
    }

    pub fn years_url(&self, username: &str) -> String {
        format!(
            "{}/{}?action=show&controller=profiles&tab=contributions&user_id={}",
            self.base_url, username, username
        )
    }

    pub fn calendar_url(&self, username: &str, key: YearKey) -> String {
        match key {
            YearKey::Trailing => format!("{}/users/{}/contributions", self.base_url, username),
            YearKey::Year(year) => format!(
                "{}/users/{}/contributions?tab=overview&from={}-12-01&to={}-12-31",
                self.base_url, username, year, year
            ),
        }
    }

    /// GET `url` as a fragment request issued from `username`'s profile page.
    ///
    /// Transport failures and non-success statuses come back as
    /// [`ScrapeError::Http`]; a username that cannot be sent as the referer
    /// is [`ScrapeError::InvalidUsername`] and no request goes out.
    pub async fn fetch_fragment(&self, url: &str, username: &str) -> Result<String> {
        validate_username(username)?;
        let headers = self.fragment_headers(username)?;

        debug!("GET {}", url);
        let http_error = |source: reqwest::Error| ScrapeError::Http {
            url: url.to_string(),
            source,
        };

        // Send the request and turn 4xx/5xx into errors
        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(http_error)?;

        response.text().await.map_err(http_error)
    }

    fn fragment_headers(&self, username: &str) -> Result<HeaderMap> {
        let referer = HeaderValue::from_str(&self.profile_url(username))
            .map_err(|_| ScrapeError::InvalidUsername(username.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, referer);
        headers.insert(REQUESTED_WITH, HeaderValue::from_static(XML_HTTP_REQUEST));
        Ok(headers)
    }
}
