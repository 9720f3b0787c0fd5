use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a free-text amount from a form-style flag.
///
/// Blank input counts as zero. Thousands separators and surrounding
/// whitespace are tolerated; anything else that is not a number is an
/// error.
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| format!("'{raw}' is not a number"))
}

/// Parse a period count. Blank input means a single period.
pub fn parse_periods(raw: &str) -> Result<Decimal, String> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ONE);
    }
    let value = parse_amount(raw)?;
    if value <= Decimal::ZERO {
        return Err(format!("'{raw}' must be a positive number of periods"));
    }
    Ok(value)
}
