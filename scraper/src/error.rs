use chrono::NaiveDate;
use thiserror::Error;

use crate::model::YearKey;

/// How a routing layer should present a failure to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The user does not exist or the profile is unreachable.
    NotFound,
    /// The page markup no longer has the shape the scraper expects.
    UpstreamParse,
    /// A calendar request failed in transport or with a bad status.
    Upstream,
    /// The inbound request parameters were invalid.
    BadRequest,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("User \"{username}\" not found.")]
    UserNotFound {
        username: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("Unable to parse contribution date attribute: {value:?}")]
    MalformedDate { value: Option<String> },

    #[error("Unable to parse contribution level attribute on {date}: {value:?}")]
    MalformedLevel {
        date: NaiveDate,
        value: Option<String>,
    },

    #[error("Unable to parse total contributions count for {key}.")]
    TotalNotFound { key: YearKey },

    #[error("Duplicate contribution entry for {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("Request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Invalid year parameter: {0:?}")]
    InvalidQuery(String),
}

impl ScrapeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ScrapeError::UserNotFound { .. } => ErrorClass::NotFound,
            ScrapeError::MalformedDate { .. }
            | ScrapeError::MalformedLevel { .. }
            | ScrapeError::TotalNotFound { .. }
            | ScrapeError::DuplicateDate { .. } => ErrorClass::UpstreamParse,
            ScrapeError::Http { .. } | ScrapeError::Client(_) => ErrorClass::Upstream,
            ScrapeError::InvalidQuery(_) | ScrapeError::InvalidUsername(_) => {
                ErrorClass::BadRequest
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
