//! Serde helper functions for form deserialization.
//!
//! Form submissions send every field as a string and use empty strings for
//! "not set", so these helpers map blanks to `None` before parsing.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::recurrence::WeekDay;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Expects format: YYYY-MM-DD
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserialize_optional_string(deserializer)? {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Deserialize an optional positive count, treating empty strings as None.
pub fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Deserialize a weekday list given either as a comma-separated string
/// (`"MO,WE,FR"`) or as an array of codes (`["MO", "WE", "FR"]`).
/// Missing, null or blank values yield an empty list.
pub fn deserialize_week_days<'de, D>(deserializer: D) -> Result<Vec<WeekDay>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        String(String),
        List(Vec<WeekDay>),
    }

    match Option::<StringOrList>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(StringOrList::List(days)) => Ok(days),
        Some(StringOrList::String(s)) => parse_week_days(&s).map_err(serde::de::Error::custom),
    }
}

/// Parses a comma-separated weekday list, skipping blank segments.
pub fn parse_week_days(s: &str) -> Result<Vec<WeekDay>, <WeekDay as FromStr>::Err> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(WeekDay::from_str)
        .collect()
}
