use serde_json::Value;
use std::io;

use super::{flatten_rows, format_scalar};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        Value::Object(map) => write_field_csv(&mut wtr, map.get("result").unwrap_or(value)),
        _ => wtr.write_record([format_scalar(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

/// Two-column CSV: field, value
fn write_field_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten_rows(value) {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
