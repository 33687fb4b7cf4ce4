//! Form input for configuring repetition on an event.
//!
//! The event form submits plain strings; this type turns them into a
//! [`RecurrenceRule`] plus the dates that anchor its description.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::describe::describe_recurrence;
use super::types::{Frequency, RecurrenceRule, WeekDay};
use super::validation::validate_recurrence;
use super::Result;
use crate::serde::{
    deserialize_optional_date, deserialize_optional_u32, deserialize_week_days,
};

/// Raw recurrence fields as submitted by the event form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceForm {
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_week_days")]
    pub week_days: Vec<WeekDay>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub count: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_u32")]
    pub interval: Option<u32>,
}

impl RecurrenceForm {
    /// Creates a form with only the required fields set.
    pub fn new(frequency: Frequency, start_date: NaiveDate) -> Self {
        Self {
            frequency,
            start_date,
            end_date: None,
            week_days: Vec::new(),
            count: None,
            interval: None,
        }
    }

    /// Builds the rule described by the form without validating it.
    pub fn to_rule(&self) -> RecurrenceRule {
        let mut rule = RecurrenceRule::new(self.frequency).with_interval(self.interval.unwrap_or(1));
        if self.frequency == Frequency::Weekly {
            rule = rule.with_week_days(self.week_days.iter().copied());
        }
        rule.count = self.count;
        rule
    }

    /// Builds and validates the rule.
    pub fn validated_rule(&self) -> Result<RecurrenceRule> {
        let rule = self.to_rule();
        validate_recurrence(&rule, self.start_date, self.end_date)?;
        Ok(rule)
    }

    /// Preview text shown next to the form.
    pub fn preview(&self) -> String {
        describe_recurrence(&self.to_rule(), self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::RecurrenceError;

    #[test]
    fn test_form_from_submitted_strings() {
        let json = r#"{
            "frequency": "WEEKLY",
            "startDate": "2024-03-15",
            "endDate": "2025-01-01",
            "weekDays": "MO,FR",
            "count": "10",
            "interval": ""
        }"#;
        let form: RecurrenceForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.week_days, vec![WeekDay::Monday, WeekDay::Friday]);
        assert_eq!(form.interval, None);
        assert_eq!(
            form.preview(),
            "Weekly on Monday & Friday, until January 1 2025, 10 times"
        );
    }

    #[test]
    fn test_week_days_dropped_for_non_weekly() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut form = RecurrenceForm::new(Frequency::Monthly, start);
        form.week_days = vec![WeekDay::Monday];

        assert!(form.to_rule().week_days.is_empty());
        assert_eq!(form.preview(), "Monthly on Day 15");
    }

    #[test]
    fn test_validated_rule_rejects_empty_weekly() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let form = RecurrenceForm::new(Frequency::Weekly, start);

        assert_eq!(form.validated_rule(), Err(RecurrenceError::MissingWeekDays));
    }

    #[test]
    fn test_serialized_form_reads_back() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut form = RecurrenceForm::new(Frequency::Weekly, start);
        form.week_days = vec![WeekDay::Monday, WeekDay::Friday];
        form.count = Some(4);

        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains(r#""weekDays":["MO","FR"]"#));

        let read_back: RecurrenceForm = serde_json::from_str(&json).unwrap();
        assert_eq!(read_back, form);
    }
}
