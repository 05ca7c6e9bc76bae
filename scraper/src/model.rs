use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Map key used for the trailing 365-day window.
pub const TRAILING_YEAR_KEY: &str = "lastYear";

/// Shading intensity of a calendar cell, always in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 4;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: Level,
}

/// Which calendar a result belongs to.
///
/// Concrete years order before the trailing window, so a `BTreeMap` keyed by
/// `YearKey` iterates ascending years with the trailing window last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum YearKey {
    Year(i32),
    Trailing,
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearKey::Year(year) => write!(f, "{}", year),
            YearKey::Trailing => f.write_str(TRAILING_YEAR_KEY),
        }
    }
}

impl Serialize for YearKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearKey::Year(year) => serializer.serialize_i32(*year),
            YearKey::Trailing => serializer.serialize_str(TRAILING_YEAR_KEY),
        }
    }
}

/// One parsed calendar: the page's printed total plus its days in date order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearResult {
    pub key: YearKey,
    pub total: u32,
    pub days: Vec<ContributionDay>,
}

pub type Totals = BTreeMap<YearKey, u32>;

/// year -> month -> day of month
pub type NestedDays = BTreeMap<i32, BTreeMap<u32, BTreeMap<u32, ContributionDay>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Flat,
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatContributions {
    #[serde(rename = "total")]
    pub totals: Totals,
    #[serde(rename = "contributions")]
    pub days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NestedContributions {
    #[serde(rename = "total")]
    pub totals: Totals,
    #[serde(rename = "contributions")]
    pub days: NestedDays,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AggregateResult {
    Flat(FlatContributions),
    Nested(NestedContributions),
}

impl AggregateResult {
    pub fn totals(&self) -> &Totals {
        match self {
            AggregateResult::Flat(flat) => &flat.totals,
            AggregateResult::Nested(nested) => &nested.totals,
        }
    }

    /// Number of day records, whichever shape holds them.
    pub fn day_count(&self) -> usize {
        match self {
            AggregateResult::Flat(flat) => flat.days.len(),
            AggregateResult::Nested(nested) => nested
                .days
                .values()
                .flat_map(|months| months.values())
                .map(|days| days.len())
                .sum(),
        }
    }
}
