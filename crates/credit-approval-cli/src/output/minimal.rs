use serde_json::Value;

use super::format_scalar;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 4] = [
    "approved",
    "monthly_installment",
    "approved_limit",
    "repayments_left",
];

/// Print just the key answer value from the output.
///
/// An eligibility decision prints `approved` and the installment on one
/// line; other results print their first priority field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let decision = (map.get("approved"), map.get("monthly_installment"));
            if let (Some(approved), Some(emi)) = decision {
                println!("{} {}", format_scalar(approved), format_scalar(emi));
                return;
            }
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_scalar(val));
            }
        }
        Value::Array(arr) => {
            for item in arr {
                let line = item
                    .get("repayments_left")
                    .map(format_scalar)
                    .unwrap_or_else(|| format_scalar(item));
                println!("{}", line);
            }
        }
        other => println!("{}", format_scalar(other)),
    }
}
