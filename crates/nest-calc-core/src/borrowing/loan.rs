use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rates::RateTable;
use crate::time_value::{checked_product, checked_quotient, checked_sum, percent_to_rate};
use crate::types::{ensure_non_negative, Money, Percent, Rate};
use crate::NestCalcResult;

/// Cost breakdown of a loan held for a number of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub principal_amount: Money,
    /// Rate quoted per `interval`, as a percentage.
    pub interest_rate: Percent,
    pub period_in_days: Decimal,
    pub interval: String,
    pub total_interest_paid: Money,
    pub fee_paid: Money,
    pub total_amount_owed: Money,
}

/// Fraction of principal charged as interest over `period_days`, for a
/// rate quoted as `interest_rate_pct` per `interval`.
///
/// `(rate / interval_days) * period_days / 100`
pub fn loan_cost_rate(
    rates: &RateTable,
    interest_rate_pct: Percent,
    period_days: Decimal,
    interval: &str,
) -> NestCalcResult<Rate> {
    ensure_non_negative("interest_rate", interest_rate_pct)?;
    ensure_non_negative("period_days", period_days)?;

    let interval_days = rates.interval_days(interval)?;
    let per_day_pct = checked_quotient(interest_rate_pct, interval_days, "interest_rate")?;
    Ok(percent_to_rate(checked_product(per_day_pct, period_days, "period_days")?))
}

/// Interest and total owed on `principal` borrowed for `period_days`.
///
/// `upfront_fee` is already resolved to a money amount; see
/// [`UpfrontFee::resolve`](crate::borrowing::fees::UpfrontFee::resolve).
pub fn loan_interest(
    rates: &RateTable,
    principal: Money,
    interest_rate_pct: Percent,
    period_days: Decimal,
    interval: &str,
    upfront_fee: Money,
) -> NestCalcResult<LoanCalculation> {
    ensure_non_negative("principal", principal)?;
    ensure_non_negative("upfront_fee", upfront_fee)?;

    let cost_rate = loan_cost_rate(rates, interest_rate_pct, period_days, interval)?;
    let total_interest_paid = checked_product(principal, cost_rate, "principal")?;
    let total_amount_owed = checked_sum(
        checked_sum(principal, total_interest_paid, "principal")?,
        upfront_fee,
        "upfront_fee",
    )?;

    Ok(LoanCalculation {
        principal_amount: principal,
        interest_rate: interest_rate_pct,
        period_in_days: period_days,
        interval: interval.to_string(),
        total_interest_paid,
        fee_paid: upfront_fee,
        total_amount_owed,
    })
}
