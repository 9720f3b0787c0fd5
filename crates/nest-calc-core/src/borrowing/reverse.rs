use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::borrowing::loan::loan_cost_rate;
use crate::rates::RateTable;
use crate::time_value::{checked_quotient, percent_to_rate};
use crate::types::{
    ensure_non_negative, with_metadata, BackSolve, ComputationOutput, InfeasibleReason,
    Infeasibility, Money, Percent, Rate,
};
use crate::NestCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for finding how much to borrow to sustain a periodic withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseBorrowedFundsInput {
    /// Amount to withdraw each withdraw period.
    pub desired_withdraw_amount: Money,
    /// Loan rate as a percentage per `interval`.
    pub interest_rate: Percent,
    pub borrow_period_days: Decimal,
    pub interval: String,
    pub withdraw_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseBorrowedFundsResult {
    pub desired_withdraw_amount: Money,
    pub borrow_period_days: Decimal,
    pub withdraw_period: String,
    /// Loan interest per day (decimal).
    pub daily_interest_rate: Rate,
    /// Loan interest over the whole borrow period (decimal).
    pub loan_cost_rate: Rate,
    pub withdraw_rate: Rate,
    pub borrowed_amount_needed: Money,
    /// Total interest paid on `borrowed_amount_needed`.
    pub total_fees: Money,
    pub investment_returns: Money,
    pub net_returns_needed: Money,
    /// Return on reinvesting the net returns; equals the desired withdrawal.
    pub withdraw_returns: Money,
    pub total_net_profit: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Back-solve the amount that must be borrowed so that reinvesting the net
/// profit pays `desired_withdraw_amount` every withdraw period.
///
/// With `w` the withdraw rate and `c` the loan cost over the borrow period:
/// `B = (D / w) / (w - c)`. When `c >= w` no positive amount works; the
/// outcome is infeasible and carries the raw value when it is finite. A
/// spread so small that `B` leaves the `Decimal` range is degenerate.
pub fn reverse_borrowed_funds_needed(
    rates: &RateTable,
    input: &ReverseBorrowedFundsInput,
) -> NestCalcResult<ComputationOutput<BackSolve<ReverseBorrowedFundsResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    ensure_non_negative("desired_withdraw_amount", input.desired_withdraw_amount)?;

    let interval_days = rates.interval_days(&input.interval)?;
    let cost_rate = loan_cost_rate(
        rates,
        input.interest_rate,
        input.borrow_period_days,
        &input.interval,
    )?;
    let daily_rate = percent_to_rate(checked_quotient(
        input.interest_rate,
        interval_days,
        "interest_rate",
    )?);
    let withdraw_rate = percent_to_rate(rates.period_rate(&input.withdraw_period)?);
    debug!(
        "reverse borrow: withdraw_rate={} loan_cost_rate={} daily_rate={}",
        withdraw_rate, cost_rate, daily_rate
    );

    let outcome = solve(input, daily_rate, cost_rate, withdraw_rate);

    if let BackSolve::Infeasible(ref reason) = outcome {
        warn!("reverse borrow infeasible: {}", reason.message);
        warnings.push(reason.message.clone());
    } else if input.desired_withdraw_amount.is_zero() {
        warnings.push("Desired withdrawal is zero — nothing needs to be borrowed".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reverse borrowed funds: B = (D / r_withdraw) / (r_withdraw - r_loan)",
        &serde_json::json!({
            "interest_rate_pct": input.interest_rate.to_string(),
            "interval": input.interval,
            "interval_days": interval_days.to_string(),
            "borrow_period_days": input.borrow_period_days.to_string(),
            "withdraw_period": input.withdraw_period,
        }),
        warnings,
        elapsed,
        outcome,
    ))
}

fn solve(
    input: &ReverseBorrowedFundsInput,
    daily_rate: Rate,
    cost_rate: Rate,
    withdraw_rate: Rate,
) -> BackSolve<ReverseBorrowedFundsResult> {
    let infeasible = |reason, raw_value, message: String| {
        BackSolve::Infeasible(Infeasibility {
            reason,
            return_rate: withdraw_rate,
            cost_rate,
            raw_value,
            message,
        })
    };

    if withdraw_rate.is_zero() {
        return infeasible(
            InfeasibleReason::ZeroRate,
            None,
            format!(
                "Withdraw period '{}' pays 0% — no withdrawal can be sustained",
                input.withdraw_period
            ),
        );
    }

    let spread = withdraw_rate - cost_rate;
    if spread.is_zero() {
        return infeasible(
            InfeasibleReason::DegenerateRate,
            None,
            format!("Loan cost {cost_rate} equals the withdraw rate — borrowing breaks even"),
        );
    }

    let borrowed_amount_needed = match input
        .desired_withdraw_amount
        .checked_div(withdraw_rate)
        .and_then(|intermediate| intermediate.checked_div(spread))
    {
        Some(amount) => amount,
        None => {
            return infeasible(
                InfeasibleReason::DegenerateRate,
                None,
                format!(
                    "Loan cost {cost_rate} is too close to the withdraw rate {withdraw_rate}: \
                     the amount to borrow is out of range"
                ),
            )
        }
    };

    if spread < Decimal::ZERO {
        return infeasible(
            InfeasibleReason::LoanCostExceedsReturn,
            Some(borrowed_amount_needed),
            format!(
                "Loan cost {cost_rate} exceeds the withdraw rate {withdraw_rate}, \
                 so every borrowed unit loses money"
            ),
        );
    }

    match breakdown(input, daily_rate, cost_rate, withdraw_rate, borrowed_amount_needed) {
        Some(result) => BackSolve::Feasible(result),
        None => infeasible(
            InfeasibleReason::DegenerateRate,
            Some(borrowed_amount_needed),
            format!("Returns on borrowing {borrowed_amount_needed} are out of range"),
        ),
    }
}

/// Interest, returns and profit on `borrowed`; `None` on overflow.
fn breakdown(
    input: &ReverseBorrowedFundsInput,
    daily_rate: Rate,
    cost_rate: Rate,
    withdraw_rate: Rate,
    borrowed: Money,
) -> Option<ReverseBorrowedFundsResult> {
    let total_fees = borrowed.checked_mul(cost_rate)?;
    let investment_returns = borrowed.checked_mul(withdraw_rate)?;
    let net_returns_needed = investment_returns.checked_sub(total_fees)?;
    let withdraw_returns = net_returns_needed.checked_mul(withdraw_rate)?;

    Some(ReverseBorrowedFundsResult {
        desired_withdraw_amount: input.desired_withdraw_amount,
        borrow_period_days: input.borrow_period_days,
        withdraw_period: input.withdraw_period.clone(),
        daily_interest_rate: daily_rate,
        loan_cost_rate: cost_rate,
        withdraw_rate,
        borrowed_amount_needed: borrowed,
        total_fees,
        investment_returns,
        net_returns_needed,
        withdraw_returns,
        total_net_profit: net_returns_needed.checked_add(withdraw_returns)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
