use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::borrowing::fees::UpfrontFee;
use crate::borrowing::loan::{loan_interest, LoanCalculation};
use crate::error::NestCalcError;
use crate::investment::returns::simple_or_compound_return;
use crate::rates::RateTable;
use crate::time_value::{
    checked_difference, checked_sum, default_periods, percent_to_rate, period_gain,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Periods};
use crate::NestCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for investing borrowed money and netting off the cost of the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowedFundsInput {
    pub borrowed_amount: Money,
    /// Loan rate as a percentage per `interval`.
    pub interest_rate: Percent,
    /// How long the loan is held, in days.
    pub borrow_period_days: Decimal,
    /// Interval name the loan rate is quoted per, e.g. "Monthly".
    pub interval: String,
    /// Period key from the rate table the borrowed funds are invested at.
    pub withdraw_period: String,
    #[serde(default)]
    pub upfront_fee: UpfrontFee,
    #[serde(default)]
    pub reinvest_compound: bool,
    #[serde(default = "default_periods")]
    pub reinvest_periods: Periods,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowedFundsResult {
    pub borrowed_amount: Money,
    pub borrow_period_days: Decimal,
    pub loan: LoanCalculation,
    pub withdraw_period: String,
    pub withdraw_rate_pct: Percent,
    /// Gross return on the borrowed amount for one withdraw period.
    pub borrow_period_returns: Money,
    /// Interest plus upfront fee.
    pub borrowing_cost: Money,
    pub net_returns: Money,
    /// One withdraw period of simple return on the net returns.
    pub initial_withdraw_returns: Money,
    /// Return on reinvesting the net returns, compounded if requested.
    pub withdraw_returns: Money,
    pub total_returns_with_principal: Money,
    pub total_net_profit_end_of_loan: Money,
    pub total_net_profit: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Net profit from investing borrowed funds for one withdraw period, after
/// loan interest and fees, plus a projection of reinvesting that profit.
///
/// A negative net profit is a valid outcome: it means borrowing costs more
/// than the investment returns.
pub fn borrowed_funds_net_profit(
    rates: &RateTable,
    input: &BorrowedFundsInput,
) -> NestCalcResult<ComputationOutput<BorrowedFundsResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let withdraw_rate_pct = rates.period_rate(&input.withdraw_period)?;
    let withdraw_rate = percent_to_rate(withdraw_rate_pct);
    let fee = input.upfront_fee.resolve(input.borrowed_amount)?;

    let loan = loan_interest(
        rates,
        input.borrowed_amount,
        input.interest_rate,
        input.borrow_period_days,
        &input.interval,
        fee,
    )?;
    debug!(
        "borrowed funds: withdraw_period={} rate={}% loan_interest={} fee={}",
        input.withdraw_period, withdraw_rate_pct, loan.total_interest_paid, loan.fee_paid
    );

    let gross = simple_or_compound_return(
        rates,
        input.borrowed_amount,
        &input.withdraw_period,
        false,
        Decimal::ONE,
    )?;
    let borrowing_cost = checked_sum(loan.total_interest_paid, loan.fee_paid, "borrowing_cost")?;
    let net_returns = checked_difference(gross, borrowing_cost, "net_returns")?;

    // Net returns can be negative, so these bypass the principal check.
    let initial_withdraw_returns = period_gain(net_returns, withdraw_rate, false, Decimal::ONE)?;
    let withdraw_returns = period_gain(
        net_returns,
        withdraw_rate,
        input.reinvest_compound,
        input.reinvest_periods,
    )?;

    let total_returns_with_principal = checked_sum(gross, input.borrowed_amount, "borrowed_amount")?;
    let total_net_profit_end_of_loan =
        checked_sum(net_returns, initial_withdraw_returns, "net_returns")?;

    if net_returns < Decimal::ZERO {
        let msg = format!(
            "Borrowing cost {borrowing_cost} exceeds returns {gross} — net loss of {}",
            -net_returns
        );
        warn!("{msg}");
        warnings.push(msg);
    }
    if input.borrowed_amount.is_zero() {
        warnings.push("Borrowed amount is zero".into());
    }

    let result = BorrowedFundsResult {
        borrowed_amount: input.borrowed_amount,
        borrow_period_days: input.borrow_period_days,
        withdraw_period: input.withdraw_period.clone(),
        withdraw_rate_pct,
        borrow_period_returns: gross,
        borrowing_cost,
        net_returns,
        initial_withdraw_returns,
        withdraw_returns,
        total_returns_with_principal,
        total_net_profit_end_of_loan,
        total_net_profit: net_returns,
        loan,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Borrowed funds: B * r_withdraw - (B * (rate / interval_days) * days / 100 + fee)",
        &serde_json::json!({
            "interest_rate_pct": input.interest_rate.to_string(),
            "interval": input.interval,
            "borrow_period_days": input.borrow_period_days.to_string(),
            "withdraw_period": input.withdraw_period,
            "withdraw_rate_pct": withdraw_rate_pct.to_string(),
            "upfront_fee": input.upfront_fee,
            "reinvest_compound": input.reinvest_compound,
            "reinvest_periods": input.reinvest_periods.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

fn validate_input(input: &BorrowedFundsInput) -> NestCalcResult<()> {
    if input.borrowed_amount < Decimal::ZERO {
        return Err(NestCalcError::InvalidInput {
            field: "borrowed_amount".into(),
            reason: "Borrowed amount must be >= 0".into(),
        });
    }
    if input.reinvest_periods <= Decimal::ZERO {
        return Err(NestCalcError::InvalidInput {
            field: "reinvest_periods".into(),
            reason: "Number of reinvestment periods must be > 0".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
