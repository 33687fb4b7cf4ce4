mod describe;
mod error;
mod form;
mod options;
mod types;
mod validation;

pub use describe::{describe_recurrence, format_long_date, join_week_days};
pub use error::{RecurrenceError, Result};
pub use form::RecurrenceForm;
pub use options::{
    day_name, default_rule, monthly_options, ordinal_suffix, ordinal_word, week_of_month,
    weekday_occurrence, MonthlyOptions, RecurrenceInput, WeekdayPosition,
};
pub use types::{Frequency, RecurrenceEndType, RecurrenceRule, WeekDay};
pub use validation::{recurrence_errors, validate_recurrence, MAX_DAILY_COUNT};
