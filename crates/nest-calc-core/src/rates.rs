use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::NestCalcError;
use crate::types::Percent;
use crate::NestCalcResult;

// ---------------------------------------------------------------------------
// Standard configuration
// ---------------------------------------------------------------------------

/// Investment periods offered, keyed by length in days, with the flat
/// percentage paid over one period.
const STANDARD_PERIODS: [(&str, Decimal); 4] = [
    ("1", dec!(0.4)),
    ("7", dec!(4)),
    ("14", dec!(9.5)),
    ("28", dec!(24)),
];

/// Named intervals a loan rate can be quoted per, with their length in days.
const STANDARD_INTERVALS: [(&str, Decimal); 6] = [
    ("Daily", dec!(1)),
    ("Weekly", dec!(7)),
    ("Bi-weekly", dec!(14)),
    ("Credit Card", dec!(21)),
    ("Monthly", dec!(30)),
    ("Yearly", dec!(365)),
];

static STANDARD_TABLE: OnceLock<RateTable> = OnceLock::new();

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One selectable investment period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRate {
    pub key: String,
    pub rate_pct: Percent,
}

/// One named loan-rate interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestInterval {
    pub name: String,
    pub days: Decimal,
}

/// Unvalidated table contents, as read from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTableConfig {
    pub periods: Vec<PeriodRate>,
    pub intervals: Vec<InterestInterval>,
}

/// Period rates and interval lengths shared by every calculation.
///
/// Fields are private: a table is validated once on construction and is
/// read-only afterwards. Entry order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateTableConfig", into = "RateTableConfig")]
pub struct RateTable {
    periods: Vec<PeriodRate>,
    intervals: Vec<InterestInterval>,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl RateTable {
    pub fn new(periods: Vec<PeriodRate>, intervals: Vec<InterestInterval>) -> NestCalcResult<Self> {
        validate_keys("periods", periods.iter().map(|p| p.key.as_str()))?;
        validate_keys("intervals", intervals.iter().map(|i| i.name.as_str()))?;

        if let Some(p) = periods.iter().find(|p| p.rate_pct < Decimal::ZERO) {
            return Err(NestCalcError::InvalidInput {
                field: format!("periods.{}", p.key),
                reason: "Period rate must be >= 0".into(),
            });
        }
        if let Some(i) = intervals.iter().find(|i| i.days <= Decimal::ZERO) {
            return Err(NestCalcError::InvalidInput {
                field: format!("intervals.{}", i.name),
                reason: "Interval length must be > 0 days".into(),
            });
        }

        Ok(RateTable { periods, intervals })
    }

    /// The built-in table, constructed once per process.
    pub fn standard() -> &'static RateTable {
        STANDARD_TABLE.get_or_init(|| RateTable {
            periods: STANDARD_PERIODS
                .iter()
                .map(|(key, rate_pct)| PeriodRate {
                    key: (*key).to_string(),
                    rate_pct: *rate_pct,
                })
                .collect(),
            intervals: STANDARD_INTERVALS
                .iter()
                .map(|(name, days)| InterestInterval {
                    name: (*name).to_string(),
                    days: *days,
                })
                .collect(),
        })
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json(json: &str) -> NestCalcResult<Self> {
        let config: RateTableConfig = serde_json::from_str(json)?;
        RateTable::try_from(config)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::standard().clone()
    }
}

impl TryFrom<RateTableConfig> for RateTable {
    type Error = NestCalcError;

    fn try_from(config: RateTableConfig) -> Result<Self, Self::Error> {
        RateTable::new(config.periods, config.intervals)
    }
}

impl From<RateTable> for RateTableConfig {
    fn from(table: RateTable) -> Self {
        RateTableConfig {
            periods: table.periods,
            intervals: table.intervals,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

impl RateTable {
    pub fn periods(&self) -> &[PeriodRate] {
        &self.periods
    }

    pub fn intervals(&self) -> &[InterestInterval] {
        &self.intervals
    }

    /// Percentage paid over one period of `key`.
    pub fn period_rate(&self, key: &str) -> NestCalcResult<Percent> {
        self.periods
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.rate_pct)
            .ok_or_else(|| NestCalcError::UnknownPeriod {
                key: key.to_string(),
                available: join_keys(self.periods.iter().map(|p| p.key.as_str())),
            })
    }

    /// Length in days of the interval called `name`.
    pub fn interval_days(&self, name: &str) -> NestCalcResult<Decimal> {
        self.intervals
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.days)
            .ok_or_else(|| NestCalcError::UnknownInterval {
                name: name.to_string(),
                available: join_keys(self.intervals.iter().map(|i| i.name.as_str())),
            })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_keys<'a>(field: &str, keys: impl Iterator<Item = &'a str>) -> NestCalcResult<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.trim().is_empty() {
            return Err(NestCalcError::InvalidInput {
                field: field.into(),
                reason: "Keys must not be blank".into(),
            });
        }
        if !seen.insert(key) {
            return Err(NestCalcError::InvalidInput {
                field: field.into(),
                reason: format!("Duplicate key '{key}'"),
            });
        }
    }
    if seen.is_empty() {
        return Err(NestCalcError::InvalidInput {
            field: field.into(),
            reason: "At least one entry is required".into(),
        });
    }
    Ok(())
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_period_rates() {
        let table = RateTable::standard();
        assert_eq!(table.period_rate("1").unwrap(), dec!(0.4));
        assert_eq!(table.period_rate("7").unwrap(), dec!(4));
        assert_eq!(table.period_rate("14").unwrap(), dec!(9.5));
        assert_eq!(table.period_rate("28").unwrap(), dec!(24));
    }

    #[test]
    fn test_standard_interval_days() {
        let table = RateTable::standard();
        assert_eq!(table.interval_days("Daily").unwrap(), dec!(1));
        assert_eq!(table.interval_days("Credit Card").unwrap(), dec!(21));
        assert_eq!(table.interval_days("Monthly").unwrap(), dec!(30));
        assert_eq!(table.interval_days("Yearly").unwrap(), dec!(365));
    }

    #[test]
    fn test_standard_order_is_display_order() {
        let keys: Vec<&str> = RateTable::standard()
            .periods()
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(keys, vec!["1", "7", "14", "28"]);
    }

    #[test]
    fn test_unknown_period_lists_available_keys() {
        let err = RateTable::standard().period_rate("3").unwrap_err();
        match err {
            NestCalcError::UnknownPeriod { key, available } => {
                assert_eq!(key, "3");
                assert_eq!(available, "1, 7, 14, 28");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interval_lookup_is_case_sensitive() {
        let table = RateTable::standard();
        assert_eq!(table.interval_days("Monthly").unwrap(), dec!(30));
        assert!(matches!(
            table.interval_days("monthly"),
            Err(NestCalcError::UnknownInterval { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_and_blank_keys() {
        let dup = vec![
            PeriodRate { key: "7".into(), rate_pct: dec!(4) },
            PeriodRate { key: "7".into(), rate_pct: dec!(5) },
        ];
        let intervals = vec![InterestInterval { name: "Daily".into(), days: dec!(1) }];
        assert!(RateTable::new(dup, intervals.clone()).is_err());

        let blank = vec![PeriodRate { key: " ".into(), rate_pct: dec!(4) }];
        assert!(RateTable::new(blank, intervals).is_err());
    }

    #[test]
    fn test_rejects_empty_negative_and_zero_entries() {
        let periods = vec![PeriodRate { key: "7".into(), rate_pct: dec!(4) }];
        let intervals = vec![InterestInterval { name: "Daily".into(), days: dec!(1) }];

        assert!(RateTable::new(vec![], intervals.clone()).is_err());
        assert!(RateTable::new(periods.clone(), vec![]).is_err());

        let negative = vec![PeriodRate { key: "7".into(), rate_pct: dec!(-1) }];
        assert!(RateTable::new(negative, intervals).is_err());

        let zero_days = vec![InterestInterval { name: "Never".into(), days: dec!(0) }];
        assert!(RateTable::new(periods, zero_days).is_err());
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "periods": [{"key": "30", "rate_pct": "12"}],
            "intervals": [{"name": "Monthly", "days": 30}]
        }"#;
        let table = RateTable::from_json(json).unwrap();
        assert_eq!(table.period_rate("30").unwrap(), dec!(12));
        assert_eq!(table.interval_days("Monthly").unwrap(), dec!(30));

        let bad = r#"{"periods": [], "intervals": [{"name": "Monthly", "days": 30}]}"#;
        assert!(RateTable::from_json(bad).is_err());
    }

    #[test]
    fn test_serde_round_trip_goes_through_validation() {
        let value = serde_json::to_value(RateTable::standard()).unwrap();
        let back: RateTable = serde_json::from_value(value).unwrap();
        assert_eq!(&back, RateTable::standard());

        let bad = serde_json::json!({
            "periods": [{"key": "7", "rate_pct": "4"}],
            "intervals": [{"name": "Daily", "days": "-1"}]
        });
        assert!(serde_json::from_value::<RateTable>(bad).is_err());
    }
}
