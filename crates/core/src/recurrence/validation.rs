use chrono::NaiveDate;

use super::error::RecurrenceError;
use super::types::{Frequency, RecurrenceRule};

/// Upper bound on occurrences for daily series.
pub const MAX_DAILY_COUNT: u32 = 999;

/// Collects every problem with a rule, in a stable order.
pub fn recurrence_errors(
    rule: &RecurrenceRule,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Vec<RecurrenceError> {
    let mut errors = Vec::new();

    if rule.interval < 1 {
        errors.push(RecurrenceError::IntervalTooSmall);
    }

    if rule.frequency == Frequency::Weekly && rule.week_days.is_empty() {
        errors.push(RecurrenceError::MissingWeekDays);
    }

    match rule.count {
        Some(0) => errors.push(RecurrenceError::CountTooSmall),
        Some(count) if rule.frequency == Frequency::Daily && count > MAX_DAILY_COUNT => {
            errors.push(RecurrenceError::CountTooLarge {
                frequency: rule.frequency.label(),
                max: MAX_DAILY_COUNT,
            });
        }
        _ => {}
    }

    if end_date.is_some_and(|end| end < start_date) {
        errors.push(RecurrenceError::EndBeforeStart);
    }

    errors
}

/// Validates a rule before it is submitted, returning the first problem found.
pub fn validate_recurrence(
    rule: &RecurrenceRule,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), RecurrenceError> {
    match recurrence_errors(rule, start_date, end_date).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
