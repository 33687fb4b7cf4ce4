use chrono::{Datelike, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};

use super::types::{Frequency, RecurrenceRule, WeekDay};

/// Returns the English ordinal suffix for a number (`1` -> `st`, `12` -> `th`).
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Spells out a week position (`1` -> `first`); anything outside 1..=5 is `last`.
pub fn ordinal_word(n: i32) -> &'static str {
    match n {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        5 => "fifth",
        _ => "last",
    }
}

/// Full day name for a Sunday-based index (`0` -> `Sunday`).
pub fn day_name(index: u32) -> Option<&'static str> {
    WeekDay::from_index(index).map(|day| day.full_name())
}

/// Row of the date in a Sunday-first month grid, starting at 1.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let offset = first.weekday().num_days_from_sunday();
    (date.day() + offset).div_ceil(7)
}

/// Which occurrence of its weekday the date is within its month (1..=5).
pub fn weekday_occurrence(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}

/// A "nth weekday of the month" position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayPosition {
    pub week: u32,
    pub day: WeekDay,
}

/// The two ways a monthly rule can be anchored to its start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOptions {
    pub by_date: String,
    pub by_weekday: String,
    pub date_value: u32,
    pub weekday_value: WeekdayPosition,
}

/// Builds the monthly anchoring choices offered for a start date.
pub fn monthly_options(start_date: NaiveDate) -> MonthlyOptions {
    let day = WeekDay::from(start_date.weekday());
    let week = weekday_occurrence(start_date);

    MonthlyOptions {
        by_date: format!("Monthly on day {}", start_date.day()),
        by_weekday: format!(
            "Monthly on the {} {}",
            ordinal_word(week as i32),
            day.full_name()
        ),
        date_value: start_date.day(),
        weekday_value: WeekdayPosition { week, day },
    }
}

/// Creates the rule a form starts with when the user picks a frequency.
///
/// Weekly rules preselect the weekday of the start date.
pub fn default_rule(start_date: NaiveDate, frequency: Frequency) -> RecurrenceRule {
    let rule = RecurrenceRule::new(frequency);
    match frequency {
        Frequency::Weekly => rule.with_week_days([WeekDay::from(start_date.weekday())]),
        Frequency::Daily | Frequency::Monthly | Frequency::Yearly => rule,
    }
}

/// Payload form of a rule as sent to the GraphQL API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceInput {
    pub frequency: Frequency,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_day: Option<Vec<WeekDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_month_day: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_month: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// RFC 3339 timestamp at UTC midnight of the end date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub never: bool,
}

impl RecurrenceInput {
    /// Converts a rule into its API payload.
    ///
    /// Monthly and yearly rules carry the start date's day (and month) so the
    /// backend anchors them the same way the description does.
    pub fn from_rule(
        rule: &RecurrenceRule,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        let (by_day, by_month_day, by_month) = match rule.frequency {
            Frequency::Daily => (None, None, None),
            Frequency::Weekly => (Some(rule.week_days.clone()), None, None),
            Frequency::Monthly => (None, Some(vec![start_date.day()]), None),
            Frequency::Yearly => (
                None,
                Some(vec![start_date.day()]),
                Some(vec![start_date.month()]),
            ),
        };

        let end_date = end_date.map(|date| {
            date.and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        });
        let count = rule.effective_count();

        Self {
            frequency: rule.frequency,
            interval: rule.interval,
            by_day,
            by_month_day,
            by_month,
            never: end_date.is_none() && count.is_none(),
            count,
            end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ordinal_suffix() {
        for n in [1, 21, 31] {
            assert_eq!(ordinal_suffix(n), "st");
        }
        for n in [2, 22] {
            assert_eq!(ordinal_suffix(n), "nd");
        }
        for n in [3, 23] {
            assert_eq!(ordinal_suffix(n), "rd");
        }
        for n in [4, 11, 12, 13, 111] {
            assert_eq!(ordinal_suffix(n), "th");
        }
    }

    #[test]
    fn test_ordinal_word() {
        assert_eq!(ordinal_word(1), "first");
        assert_eq!(ordinal_word(5), "fifth");
        assert_eq!(ordinal_word(6), "last");
        assert_eq!(ordinal_word(0), "last");
        assert_eq!(ordinal_word(-1), "last");
    }

    #[test]
    fn test_day_name() {
        assert_eq!(day_name(0), Some("Sunday"));
        assert_eq!(day_name(6), Some("Saturday"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn test_week_of_month() {
        // January 2024 starts on a Monday
        assert_eq!(week_of_month(date(2024, 1, 1)), 1);
        assert_eq!(week_of_month(date(2024, 1, 5)), 1);
        assert_eq!(week_of_month(date(2024, 1, 8)), 2);
        assert_eq!(week_of_month(date(2024, 1, 29)), 5);
        assert_eq!(week_of_month(date(2024, 1, 31)), 5);
        // February 2024 starts on a Thursday
        assert_eq!(week_of_month(date(2024, 2, 29)), 5);
        // Sunday July 21 sits in the fourth row
        assert_eq!(week_of_month(date(2024, 7, 21)), 4);
        assert_eq!(week_of_month(date(2023, 7, 21)), 4);
    }

    #[test]
    fn test_weekday_occurrence() {
        assert_eq!(weekday_occurrence(date(2024, 7, 1)), 1);
        assert_eq!(weekday_occurrence(date(2024, 7, 7)), 1);
        assert_eq!(weekday_occurrence(date(2024, 7, 8)), 2);
        assert_eq!(weekday_occurrence(date(2024, 1, 31)), 5);
    }

    #[test]
    fn test_monthly_options_mid_month() {
        let options = monthly_options(date(2024, 7, 15));
        assert_eq!(options.by_date, "Monthly on day 15");
        assert_eq!(options.by_weekday, "Monthly on the third Monday");
        assert_eq!(options.date_value, 15);
        assert_eq!(
            options.weekday_value,
            WeekdayPosition {
                week: 3,
                day: WeekDay::Monday
            }
        );
    }

    #[test]
    fn test_monthly_options_counts_weekday_occurrences() {
        // July 2024 Sundays: 7, 14, 21
        let options = monthly_options(date(2024, 7, 21));
        assert_eq!(options.by_weekday, "Monthly on the third Sunday");

        let options = monthly_options(date(2024, 1, 29));
        assert_eq!(options.by_weekday, "Monthly on the fifth Monday");
    }

    #[test]
    fn test_default_rules() {
        let start = date(2024, 7, 21);
        assert_eq!(default_rule(start, Frequency::Daily), RecurrenceRule::daily());
        assert_eq!(
            default_rule(start, Frequency::Weekly),
            RecurrenceRule::weekly([WeekDay::Sunday])
        );
        assert_eq!(default_rule(start, Frequency::Monthly), RecurrenceRule::monthly());
    }

    #[test]
    fn test_input_with_end_date() {
        let input = RecurrenceInput::from_rule(
            &RecurrenceRule::daily(),
            date(2024, 7, 21),
            Some(date(2025, 1, 1)),
        );
        assert_eq!(input.end_date.as_deref(), Some("2025-01-01T00:00:00.000Z"));
        assert!(!input.never);
    }

    #[test]
    fn test_input_without_end_is_never() {
        let input = RecurrenceInput::from_rule(&RecurrenceRule::daily(), date(2024, 7, 21), None);
        assert_eq!(input.end_date, None);
        assert!(input.never);

        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("endDate").is_none());
        assert_eq!(json["frequency"], "DAILY");
    }

    #[test]
    fn test_input_yearly_anchors_to_start() {
        let input = RecurrenceInput::from_rule(
            &RecurrenceRule::yearly().with_count(5),
            date(2024, 7, 21),
            None,
        );
        assert_eq!(input.by_month, Some(vec![7]));
        assert_eq!(input.by_month_day, Some(vec![21]));
        assert_eq!(input.count, Some(5));
        assert!(!input.never);
    }
}
