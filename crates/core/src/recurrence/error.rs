use thiserror::Error;

/// Errors that can occur when parsing or validating recurrence rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("Recurrence interval must be at least 1")]
    IntervalTooSmall,
    #[error("Weekly recurrence must specify at least one day of the week")]
    MissingWeekDays,
    #[error("Recurrence count must be at least 1")]
    CountTooSmall,
    #[error("{frequency} recurrence count must be no more than {max}")]
    CountTooLarge { frequency: &'static str, max: u32 },
    #[error("Recurrence end date must be after event start date")]
    EndBeforeStart,
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),
    #[error("Unknown weekday: {0}")]
    UnknownWeekDay(String),
}

/// Result type for recurrence operations.
pub type Result<T> = std::result::Result<T, RecurrenceError>;
