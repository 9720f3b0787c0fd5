use serde_json::Value;

use super::format_scalar;

/// Headline figure for each calculation, most specific first.
const PRIORITY_KEYS: [&str; 5] = [
    "borrowed_amount_needed",
    "required_principal",
    "net_returns",
    "total_value",
    // Infeasible back-solves carry only an explanation
    "message",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}
