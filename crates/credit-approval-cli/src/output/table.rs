use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_rows, format_scalar};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_rows(value),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", format_scalar(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    print_rows(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_rows(value) {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

/// One row per element, e.g. statement lines.
fn print_array_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(format_scalar).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}
