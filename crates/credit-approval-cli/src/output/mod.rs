pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted `field, value` rows, so the credit
/// score breakdown inside a decision reads as `credit_score.score` etc.
pub fn flatten_rows(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            push_rows(key, val, &mut rows);
        }
    } else {
        rows.push(("value".to_string(), format_scalar(value)));
    }
    rows
}

fn push_rows(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                push_rows(&format!("{prefix}.{key}"), val, rows);
            }
        }
        other => rows.push((prefix.to_string(), format_scalar(other))),
    }
}

/// Render a leaf value without JSON quoting.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_decision_flattens_to_dotted_rows() {
        let value = json!({
            "approved": false,
            "credit_score": { "score": 10, "aggregates": { "total_loans": 0 } }
        });
        let rows = flatten_rows(&value);
        assert_eq!(
            rows,
            vec![
                ("approved".to_string(), "false".to_string()),
                ("credit_score.aggregates.total_loans".to_string(), "0".to_string()),
                ("credit_score.score".to_string(), "10".to_string()),
            ]
        );
    }
}
