//! Human-readable summaries of recurrence rules.
//!
//! Pure functions: the same inputs always produce the same sentence.

use chrono::{Datelike, NaiveDate};

use super::types::{Frequency, RecurrenceRule, WeekDay};

/// Formats a date in long form, e.g. `January 1 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d %Y").to_string()
}

/// Joins full weekday names with commas, replacing the last comma with ` &`.
///
/// `[MO, TU, FR]` becomes `Monday, Tuesday & Friday`.
pub fn join_week_days(days: &[WeekDay]) -> String {
    let names: Vec<&str> = days.iter().map(WeekDay::full_name).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} & {}", rest.join(", "), last),
    }
}

/// Describes a recurrence rule as a sentence fragment.
///
/// The start date anchors the monthly day-of-month and yearly month/day
/// phrasing. Tail clauses are appended in a fixed order: the end date first,
/// then the occurrence count.
///
/// ```
/// use chrono::NaiveDate;
/// use orgadmin_core::recurrence::{describe_recurrence, RecurrenceRule, WeekDay};
///
/// let rule = RecurrenceRule::weekly([WeekDay::Monday, WeekDay::Friday]).with_count(10);
/// let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 1);
///
/// assert_eq!(
///     describe_recurrence(&rule, start, end),
///     "Weekly on Monday & Friday, until January 1 2025, 10 times"
/// );
/// ```
pub fn describe_recurrence(
    rule: &RecurrenceRule,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> String {
    let mut text = String::new();

    if rule.interval > 1 {
        text.push_str(&format!("Every {} ", rule.interval));
    }

    // Exhaustive on purpose: a new frequency must be described here.
    match rule.frequency {
        Frequency::Daily => text.push_str("Daily"),
        Frequency::Weekly => {
            text.push_str("Weekly on ");
            text.push_str(&join_week_days(&rule.week_days));
        }
        Frequency::Monthly => {
            text.push_str(&format!("Monthly on Day {}", start_date.day()));
        }
        Frequency::Yearly => {
            text.push_str(&format!(
                "Annually on {} {}",
                start_date.format("%B"),
                start_date.day()
            ));
        }
    }

    if let Some(end) = end_date {
        text.push_str(", until ");
        text.push_str(&format_long_date(end));
    }

    if let Some(count) = rule.effective_count() {
        text.push_str(&format!(", {} times", count));
    }

    text
}
