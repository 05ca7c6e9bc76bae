use std::collections::BTreeSet;

use crate::error::{Result, ScrapeError};
use crate::model::OutputMode;

/// What one pipeline run should fetch and how to shape it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionsRequest {
    pub username: String,
    pub years: BTreeSet<i32>,
    pub fetch_all: bool,
    pub include_trailing_year: bool,
    pub output_mode: OutputMode,
}

impl ContributionsRequest {
    /// Every discovered year plus the trailing window, flat.
    pub fn all(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            years: BTreeSet::new(),
            fetch_all: true,
            include_trailing_year: true,
            output_mode: OutputMode::Flat,
        }
    }

    pub fn trailing_year(username: impl Into<String>) -> Self {
        Self {
            fetch_all: false,
            ..Self::all(username)
        }
    }

    pub fn for_years(username: impl Into<String>, years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            years: years.into_iter().collect(),
            fetch_all: false,
            include_trailing_year: false,
            ..Self::all(username)
        }
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Derive a request from raw query values: the repeated `y` parameter and
    /// `format`.
    ///
    /// No `y` at all means every year plus the trailing window. `y=all` and
    /// `y=last` select those individually, numbers select concrete years.
    pub fn from_query<S: AsRef<str>>(
        username: impl Into<String>,
        y_params: &[S],
        format: Option<&str>,
    ) -> Result<Self> {
        let output_mode = match format {
            Some("nested") => OutputMode::Nested,
            _ => OutputMode::Flat,
        };

        if y_params.is_empty() {
            return Ok(Self::all(username).with_output_mode(output_mode));
        }

        let mut request = Self::for_years(username, []).with_output_mode(output_mode);
        for param in y_params {
            match param.as_ref().trim() {
                "all" => request.fetch_all = true,
                "last" => request.include_trailing_year = true,
                other => {
                    let year = other
                        .parse::<i32>()
                        .map_err(|_| ScrapeError::InvalidQuery(other.to_string()))?;
                    request.years.insert(year);
                }
            }
        }

        Ok(request)
    }

    /// Discovered years should be filtered to `years` rather than taken whole.
    pub fn filters_years(&self) -> bool {
        !self.fetch_all
    }
}
