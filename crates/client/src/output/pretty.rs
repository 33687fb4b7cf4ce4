//! Pretty output formatting.

use chrono::NaiveDate;
use orgadmin_core::pagination::{node_id, PageInfo};
use orgadmin_core::recurrence::{
    describe_recurrence, format_long_date, MonthlyOptions, RecurrenceEndType, RecurrenceError,
    RecurrenceRule,
};
use serde_json::Value;

/// Format a rule with its description and settings.
pub fn format_rule(
    rule: &RecurrenceRule,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> String {
    let mut output = describe_recurrence(rule, start_date, end_date);
    output.push_str(&format!(
        "\n  Frequency: {}\n  Interval: {}\n  Starts: {}",
        rule.frequency,
        rule.interval,
        format_long_date(start_date)
    ));
    let ends = match RecurrenceEndType::of(Some(rule), end_date.is_some()) {
        RecurrenceEndType::Never => "Never".to_string(),
        RecurrenceEndType::On => end_date
            .map(|date| format!("On {}", format_long_date(date)))
            .unwrap_or_default(),
        RecurrenceEndType::After => format!("After {} times", rule.effective_count().unwrap_or(0)),
    };
    output.push_str(&format!("\n  Ends: {}", ends));
    output
}

/// Format validation problems for display.
pub fn format_validation_errors(errors: &[RecurrenceError]) -> String {
    if errors.is_empty() {
        return "Recurrence is valid.".to_string();
    }
    let mut output = format!("ERRORS ({})\n", errors.len());
    output.push_str(&"-".repeat(40));
    for error in errors {
        output.push_str(&format!("\n  - {}", error));
    }
    output
}

/// Format the monthly anchoring choices.
pub fn format_monthly_options(options: &MonthlyOptions) -> String {
    format!(
        "MONTHLY OPTIONS\n{}\n  By date: {}\n  By weekday: {}",
        "-".repeat(40),
        options.by_date,
        options.by_weekday
    )
}

/// Format one connection node: its id and name or title when present.
pub fn format_node(node: &Value) -> String {
    let label = ["name", "title", "email"]
        .iter()
        .find_map(|key| node.get(*key).and_then(Value::as_str));
    match (label, node_id(node)) {
        (Some(label), Some(id)) => format!("{}\n  ID: {}", label, id),
        (None, Some(id)) => format!("ID: {}", id),
        (Some(label), None) => label.to_string(),
        (None, None) => serde_json::to_string(node).unwrap_or_default(),
    }
}

/// Format connection nodes for display.
pub fn format_nodes(items: &[Value], page_info: Option<&PageInfo>) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let mut output = format!("ITEMS ({})\n", items.len());
    output.push_str(&"-".repeat(40));
    for item in items {
        output.push_str(&format!("\n{}", format_node(item)));
        output.push('\n');
    }
    if let Some(PageInfo {
        has_next_page: true,
        end_cursor: Some(cursor),
        ..
    }) = page_info
    {
        output.push_str(&format!("\nMore items after cursor {}", cursor));
    }
    output
}
