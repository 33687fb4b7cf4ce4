//! Recurrence CLI commands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use orgadmin_core::recurrence::{Frequency, RecurrenceForm, WeekDay};

/// Recurrence rule commands.
#[derive(Debug, Parser)]
pub struct RecurrenceCommand {
    #[command(subcommand)]
    pub action: RecurrenceAction,
}

/// Available recurrence actions.
#[derive(Debug, Subcommand)]
pub enum RecurrenceAction {
    /// Print the human-readable description of a rule.
    Describe(RuleArgs),
    /// Check a rule and list every problem found.
    Validate(RuleArgs),
    /// Show the monthly anchoring choices for a start date.
    MonthlyOptions {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
    },
    /// Print the API payload for a rule.
    Payload(RuleArgs),
}

/// Fields of a recurrence rule.
#[derive(Debug, Clone, Args)]
pub struct RuleArgs {
    /// Frequency (daily, weekly, monthly, yearly).
    #[arg(long)]
    pub frequency: Frequency,
    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    pub start: NaiveDate,
    /// End date (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Weekdays for weekly rules (e.g. MO,WE,FR).
    #[arg(long, value_delimiter = ',')]
    pub week_days: Vec<WeekDay>,
    /// Total number of occurrences.
    #[arg(long)]
    pub count: Option<u32>,
    /// Repeat every N periods.
    #[arg(long)]
    pub interval: Option<u32>,
}

impl From<RuleArgs> for RecurrenceForm {
    fn from(args: RuleArgs) -> Self {
        Self {
            frequency: args.frequency,
            start_date: args.start,
            end_date: args.end,
            week_days: args.week_days,
            count: args.count,
            interval: args.interval,
        }
    }
}
