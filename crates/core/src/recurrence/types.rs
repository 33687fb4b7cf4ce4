use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::error::RecurrenceError;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the capitalized label used in rule descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }

    /// Returns the wire name (`DAILY`, `WEEKLY`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Frequency::Daily),
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            _ => Err(RecurrenceError::UnknownFrequency(s.to_string())),
        }
    }
}

/// A day of the week, tagged with its two-letter RFC 5545 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekDay {
    #[serde(rename = "SU")]
    Sunday,
    #[serde(rename = "MO")]
    Monday,
    #[serde(rename = "TU")]
    Tuesday,
    #[serde(rename = "WE")]
    Wednesday,
    #[serde(rename = "TH")]
    Thursday,
    #[serde(rename = "FR")]
    Friday,
    #[serde(rename = "SA")]
    Saturday,
}

impl WeekDay {
    /// All weekdays in Sunday-first order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Returns the full English name of the day.
    pub fn full_name(&self) -> &'static str {
        match self {
            WeekDay::Sunday => "Sunday",
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
        }
    }

    /// Returns the two-letter tag (`SU`, `MO`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            WeekDay::Sunday => "SU",
            WeekDay::Monday => "MO",
            WeekDay::Tuesday => "TU",
            WeekDay::Wednesday => "WE",
            WeekDay::Thursday => "TH",
            WeekDay::Friday => "FR",
            WeekDay::Saturday => "SA",
        }
    }

    /// Sunday-based index, `0` for Sunday through `6` for Saturday.
    pub fn index(&self) -> u32 {
        match self {
            WeekDay::Sunday => 0,
            WeekDay::Monday => 1,
            WeekDay::Tuesday => 2,
            WeekDay::Wednesday => 3,
            WeekDay::Thursday => 4,
            WeekDay::Friday => 5,
            WeekDay::Saturday => 6,
        }
    }

    /// Inverse of [`WeekDay::index`].
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => WeekDay::Sunday,
            Weekday::Mon => WeekDay::Monday,
            Weekday::Tue => WeekDay::Tuesday,
            Weekday::Wed => WeekDay::Wednesday,
            Weekday::Thu => WeekDay::Thursday,
            Weekday::Fri => WeekDay::Friday,
            Weekday::Sat => WeekDay::Saturday,
        }
    }
}

impl From<WeekDay> for Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Weekday::Sun,
            WeekDay::Monday => Weekday::Mon,
            WeekDay::Tuesday => Weekday::Tue,
            WeekDay::Wednesday => Weekday::Wed,
            WeekDay::Thursday => Weekday::Thu,
            WeekDay::Friday => Weekday::Fri,
            WeekDay::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WeekDay {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        WeekDay::ALL
            .into_iter()
            .find(|day| day.code() == upper || day.full_name().to_ascii_uppercase() == upper)
            .ok_or_else(|| RecurrenceError::UnknownWeekDay(s.to_string()))
    }
}

/// A structured description of a repeating schedule.
///
/// `week_days` only carries meaning for [`Frequency::Weekly`] rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, rename = "byDay", skip_serializing_if = "Vec::is_empty")]
    pub week_days: Vec<WeekDay>,
    /// Total number of occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

impl RecurrenceRule {
    /// Creates a rule repeating every period with no weekdays and no count.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            week_days: Vec::new(),
            count: None,
        }
    }

    /// Shorthand for a daily rule.
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    /// Shorthand for a weekly rule on the given days.
    pub fn weekly(days: impl IntoIterator<Item = WeekDay>) -> Self {
        Self::new(Frequency::Weekly).with_week_days(days)
    }

    /// Shorthand for a monthly rule.
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Shorthand for a yearly rule.
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the weekdays, keeping the order they were given in.
    pub fn with_week_days(mut self, days: impl IntoIterator<Item = WeekDay>) -> Self {
        self.week_days = days.into_iter().collect();
        self
    }

    /// Sets the total number of occurrences.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the repeat interval.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the count only when it would render, i.e. when non-zero.
    pub fn effective_count(&self) -> Option<u32> {
        self.count.filter(|c| *c > 0)
    }

    /// Compares two rules, treating the weekday list as an unordered set.
    pub fn is_equivalent(&self, other: &RecurrenceRule) -> bool {
        self.frequency == other.frequency
            && self.interval == other.interval
            && self.count == other.count
            && self.week_day_set() == other.week_day_set()
    }

    fn week_day_set(&self) -> BTreeSet<WeekDay> {
        self.week_days.iter().copied().collect()
    }
}

/// How a recurrence series terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceEndType {
    Never,
    On,
    After,
}

impl RecurrenceEndType {
    /// Derives the end type from a rule and its optional end date.
    ///
    /// An end date wins over a count; without either the series never ends.
    pub fn of(rule: Option<&RecurrenceRule>, end_date_set: bool) -> Self {
        match rule {
            None => RecurrenceEndType::Never,
            Some(_) if end_date_set => RecurrenceEndType::On,
            Some(rule) if rule.effective_count().is_some() => RecurrenceEndType::After,
            Some(_) => RecurrenceEndType::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_wire_format() {
        let json = serde_json::to_string(&Frequency::Weekly).unwrap();
        assert_eq!(json, "\"WEEKLY\"");
        let parsed: Frequency = serde_json::from_str("\"YEARLY\"").unwrap();
        assert_eq!(parsed, Frequency::Yearly);
    }

    #[test]
    fn test_frequency_from_str_case_insensitive() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(
            "hourly".parse::<Frequency>(),
            Err(RecurrenceError::UnknownFrequency("hourly".to_string()))
        );
    }

    #[test]
    fn test_week_day_from_code_and_name() {
        assert_eq!("MO".parse::<WeekDay>().unwrap(), WeekDay::Monday);
        assert_eq!("fr".parse::<WeekDay>().unwrap(), WeekDay::Friday);
        assert_eq!("Sunday".parse::<WeekDay>().unwrap(), WeekDay::Sunday);
        assert!("XX".parse::<WeekDay>().is_err());
    }

    #[test]
    fn test_week_day_index_roundtrip() {
        for (i, day) in WeekDay::ALL.iter().enumerate() {
            assert_eq!(day.index(), i as u32);
            assert_eq!(WeekDay::from_index(i as u32), Some(*day));
        }
        assert_eq!(WeekDay::from_index(7), None);
    }

    #[test]
    fn test_week_day_from_chrono() {
        assert_eq!(WeekDay::from(Weekday::Wed), WeekDay::Wednesday);
        assert_eq!(Weekday::from(WeekDay::Saturday), Weekday::Sat);
    }

    #[test]
    fn test_rule_deserializes_with_default_interval() {
        let json = r#"{"frequency":"WEEKLY","byDay":["MO","FR"],"count":10}"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.week_days, vec![WeekDay::Monday, WeekDay::Friday]);
        assert_eq!(rule.count, Some(10));
    }

    #[test]
    fn test_equivalent_ignores_weekday_order() {
        let a = RecurrenceRule::weekly([WeekDay::Monday, WeekDay::Friday])
            .with_interval(2)
            .with_count(10);
        let b = RecurrenceRule::weekly([WeekDay::Friday, WeekDay::Monday])
            .with_interval(2)
            .with_count(10);
        assert!(a.is_equivalent(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_not_equivalent_when_interval_differs() {
        let a = RecurrenceRule::weekly([WeekDay::Monday]).with_interval(2);
        let b = RecurrenceRule::weekly([WeekDay::Monday]);
        assert!(!a.is_equivalent(&b));
    }

    #[test]
    fn test_effective_count_ignores_zero() {
        assert_eq!(RecurrenceRule::daily().with_count(0).effective_count(), None);
        assert_eq!(RecurrenceRule::daily().with_count(3).effective_count(), Some(3));
    }

    #[test]
    fn test_end_type() {
        let rule = RecurrenceRule::daily();
        assert_eq!(RecurrenceEndType::of(None, false), RecurrenceEndType::Never);
        assert_eq!(RecurrenceEndType::of(Some(&rule), false), RecurrenceEndType::Never);
        assert_eq!(RecurrenceEndType::of(Some(&rule), true), RecurrenceEndType::On);

        let counted = rule.with_count(5);
        assert_eq!(RecurrenceEndType::of(Some(&counted), false), RecurrenceEndType::After);
        assert_eq!(RecurrenceEndType::of(Some(&counted), true), RecurrenceEndType::On);
    }
}
