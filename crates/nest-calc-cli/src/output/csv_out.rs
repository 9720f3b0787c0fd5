use serde_json::Value;
use std::io;

use super::{flatten, format_scalar};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());
    let _ = write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                // Two-column CSV: field, value
                wtr.write_record(["field", "value"])?;
                for (key, val) in flatten(result) {
                    wtr.write_record([key, format_scalar(&val)])?;
                }
            } else {
                // Rate table: a header row then one row per entry, per section
                for (section, val) in map {
                    let Value::Array(rows) = val else { continue };
                    let Some(Value::Object(first)) = rows.first() else { continue };
                    let headers: Vec<String> = first.keys().cloned().collect();

                    let mut header = vec!["section".to_string()];
                    header.extend(headers.iter().cloned());
                    wtr.write_record(&header)?;

                    for row in rows {
                        let mut record = vec![section.clone()];
                        record.extend(
                            headers
                                .iter()
                                .map(|h| row.get(h).map(format_scalar).unwrap_or_default()),
                        );
                        wtr.write_record(&record)?;
                    }
                }
            }
        }
        _ => wtr.write_record([format_scalar(value)])?,
    }
    Ok(())
}
