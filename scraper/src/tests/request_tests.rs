use std::collections::BTreeSet;

use crate::error::{ErrorClass, ScrapeError};
use crate::model::OutputMode;
use crate::request::ContributionsRequest;

#[test]
fn test_no_year_params_fetches_everything() {
    let no_params: [&str; 0] = [];
    let request = ContributionsRequest::from_query("octocat", &no_params, None).unwrap();

    assert_eq!(request, ContributionsRequest::all("octocat"));
    assert!(request.fetch_all);
    assert!(request.include_trailing_year);
    assert_eq!(request.output_mode, OutputMode::Flat);
}

#[test]
fn test_explicit_years() {
    let request =
        ContributionsRequest::from_query("octocat", &["2021", "2022", "2021"], Some("nested"))
            .unwrap();

    assert_eq!(request.years, BTreeSet::from([2021, 2022]));
    assert!(!request.fetch_all);
    assert!(!request.include_trailing_year);
    assert!(request.filters_years());
    assert_eq!(request.output_mode, OutputMode::Nested);
}

#[test]
fn test_last_only() {
    let request = ContributionsRequest::from_query("octocat", &["last"], None).unwrap();

    assert_eq!(request, ContributionsRequest::trailing_year("octocat"));
    assert!(request.years.is_empty());
    assert!(request.filters_years());
}

#[test]
fn test_all_and_last() {
    let request = ContributionsRequest::from_query("octocat", &["all", "last"], None).unwrap();
    assert_eq!(request, ContributionsRequest::all("octocat"));
}

#[test]
fn test_unknown_format_is_flat() {
    let request = ContributionsRequest::from_query("octocat", &["2021"], Some("xml")).unwrap();
    assert_eq!(request.output_mode, OutputMode::Flat);
}

#[test]
fn test_invalid_year_param() {
    let err = ContributionsRequest::from_query("octocat", &["2021", "soon"], None).unwrap_err();
    assert!(matches!(err, ScrapeError::InvalidQuery(ref v) if v == "soon"));
    assert_eq!(err.class(), ErrorClass::BadRequest);
}
