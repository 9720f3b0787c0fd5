use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_sections(map);
            }
        }
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    println!("{}", field_table(result));

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Print each list of records (e.g. the rate table's periods and
/// intervals) as its own titled table.
fn print_sections(map: &Map<String, Value>) {
    let mut first = true;
    for (name, val) in map {
        if !first {
            println!();
        }
        first = false;
        println!("{}:", name);
        match val {
            Value::Array(rows) => println!("{}", records_table(rows)),
            Value::Object(inner) => println!("{}", field_table(inner)),
            other => println!("{}", format_scalar(other)),
        }
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        builder.push_record([key, format_scalar(&val)]);
    }
    Table::from(builder)
}

fn records_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(headers.clone());
        for row in rows {
            if let Value::Object(map) = row {
                let cells: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(cells);
            }
        }
    }
    Table::from(builder)
}
