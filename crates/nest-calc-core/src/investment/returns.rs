use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::NestCalcError;
use crate::rates::RateTable;
use crate::time_value::{checked_sum, default_periods, percent_to_rate, period_gain};
use crate::types::{ensure_non_negative, with_metadata, ComputationOutput, Money, Percent, Periods};
use crate::NestCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for the "how much will my principal earn" calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub principal: Money,
    /// Period key from the rate table, e.g. "7".
    pub period: String,
    #[serde(default)]
    pub compound: bool,
    /// Number of periods to compound over. Ignored in simple mode.
    #[serde(default = "default_periods")]
    pub compound_periods: Periods,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub principal: Money,
    pub period: String,
    pub rate_pct: Percent,
    pub compound_mode: bool,
    pub compound_periods: Periods,
    /// Gain only, excluding principal.
    pub returns: Money,
    pub total_value: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Return earned on `principal` at the rate of `period_key`.
///
/// Simple mode pays one period's rate. Compound mode reinvests over
/// `num_periods` and returns the gain `P(1 + r)^n - P`.
pub fn simple_or_compound_return(
    rates: &RateTable,
    principal: Money,
    period_key: &str,
    compound: bool,
    num_periods: Periods,
) -> NestCalcResult<Money> {
    ensure_non_negative("principal", principal)?;
    if num_periods <= Decimal::ZERO {
        return Err(NestCalcError::InvalidInput {
            field: "compound_periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let rate = percent_to_rate(rates.period_rate(period_key)?);
    period_gain(principal, rate, compound, num_periods)
}

/// Project the return on a principal for one of the table's periods.
pub fn calculate_investment_return(
    rates: &RateTable,
    input: &InvestmentInput,
) -> NestCalcResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rate_pct = rates.period_rate(&input.period)?;
    debug!(
        "investment return: period={} rate={}% compound={} periods={}",
        input.period, rate_pct, input.compound, input.compound_periods
    );

    let returns = simple_or_compound_return(
        rates,
        input.principal,
        &input.period,
        input.compound,
        input.compound_periods,
    )?;

    let total_value = checked_sum(input.principal, returns, "principal")?;

    if input.principal.is_zero() {
        warnings.push("Principal is zero — no returns are generated".into());
    }

    let result = InvestmentResult {
        principal: input.principal,
        period: input.period.clone(),
        rate_pct,
        compound_mode: input.compound,
        compound_periods: input.compound_periods,
        returns,
        total_value,
    };

    let methodology = if input.compound {
        "Compound return: P(1 + r)^n - P at the period rate"
    } else {
        "Simple return: P * r for one period"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &serde_json::json!({
            "period_days": input.period,
            "rate_pct": rate_pct.to_string(),
            "compound_periods": input.compound_periods.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
