use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::investment::returns::simple_or_compound_return;
use crate::rates::RateTable;
use crate::time_value::{checked_quotient, percent_to_rate};
use crate::types::{
    ensure_non_negative, with_metadata, BackSolve, ComputationOutput, InfeasibleReason,
    Infeasibility, Money, Percent,
};
use crate::NestCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReturnInput {
    /// Return wanted from one period.
    pub target_return: Money,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReturnResult {
    pub target_return: Money,
    pub period: String,
    pub rate_pct: Percent,
    pub required_principal: Money,
    /// Simple return on `required_principal`; matches the target.
    pub potential_returns: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Principal needed to earn `target_return` in one period of `period_key`.
///
/// Inverse of the simple return: `target / r`. A zero-rate period cannot
/// produce any return, which is reported as infeasible.
pub fn required_principal(
    rates: &RateTable,
    target_return: Money,
    period_key: &str,
) -> NestCalcResult<BackSolve<Money>> {
    ensure_non_negative("target_return", target_return)?;

    let rate = percent_to_rate(rates.period_rate(period_key)?);
    if rate.is_zero() {
        return Ok(BackSolve::Infeasible(Infeasibility {
            reason: InfeasibleReason::ZeroRate,
            return_rate: rate,
            cost_rate: Decimal::ZERO,
            raw_value: None,
            message: format!("Period '{period_key}' pays 0% — no principal reaches the target"),
        }));
    }

    Ok(BackSolve::Feasible(checked_quotient(target_return, rate, "target_return")?))
}

/// Back-solve the principal required for a target one-period return.
pub fn calculate_target_return(
    rates: &RateTable,
    input: &TargetReturnInput,
) -> NestCalcResult<ComputationOutput<BackSolve<TargetReturnResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rate_pct = rates.period_rate(&input.period)?;
    debug!("target return: period={} rate={}%", input.period, rate_pct);

    let outcome = match required_principal(rates, input.target_return, &input.period)? {
        BackSolve::Feasible(principal) => {
            let potential_returns =
                simple_or_compound_return(rates, principal, &input.period, false, Decimal::ONE)?;
            BackSolve::Feasible(TargetReturnResult {
                target_return: input.target_return,
                period: input.period.clone(),
                rate_pct,
                required_principal: principal,
                potential_returns,
            })
        }
        BackSolve::Infeasible(reason) => {
            warn!("target return infeasible: {}", reason.message);
            warnings.push(reason.message.clone());
            BackSolve::Infeasible(reason)
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Required principal: target / r for one period",
        &serde_json::json!({
            "period_days": input.period,
            "rate_pct": rate_pct.to_string(),
        }),
        warnings,
        elapsed,
        outcome,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NestCalcError;
    use crate::rates::{InterestInterval, PeriodRate};
    use rust_decimal_macros::dec;

    fn zero_rate_table() -> RateTable {
        RateTable::new(
            vec![PeriodRate { key: "0".into(), rate_pct: dec!(0) }],
            vec![InterestInterval { name: "Daily".into(), days: dec!(1) }],
        )
        .unwrap()
    }

    #[test]
    fn test_required_principal_seven_days() {
        let p = required_principal(RateTable::standard(), dec!(40), "7").unwrap();
        assert_eq!(p, BackSolve::Feasible(dec!(1000)));
    }

    #[test]
    fn test_target_result_round_trips_to_target() {
        let input = TargetReturnInput {
            target_return: dec!(100),
            period: "14".into(),
        };
        let out = calculate_target_return(RateTable::standard(), &input).unwrap();
        let res = out.result.feasible().unwrap();
        assert_eq!(res.rate_pct, dec!(9.5));
        let diff = (res.potential_returns - dec!(100)).abs();
        assert!(diff < dec!(0.0000001), "diff={diff}");
    }

    #[test]
    fn test_zero_rate_is_infeasible() {
        let table = zero_rate_table();
        let outcome = required_principal(&table, dec!(10), "0").unwrap();
        assert_eq!(
            outcome.infeasibility().map(|i| i.reason),
            Some(InfeasibleReason::ZeroRate)
        );

        let input = TargetReturnInput {
            target_return: dec!(10),
            period: "0".into(),
        };
        let out = calculate_target_return(&table, &input).unwrap();
        assert!(!out.result.is_feasible());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_negative_target_rejected() {
        let err = required_principal(RateTable::standard(), dec!(-5), "7").unwrap_err();
        assert!(matches!(err, NestCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_oversized_target_is_error_not_panic() {
        // Decimal::MAX / 0.004 is out of range
        let err = required_principal(RateTable::standard(), Decimal::MAX, "1").unwrap_err();
        assert!(matches!(err, NestCalcError::InvalidInput { field, .. } if field == "target_return"));
    }

    #[test]
    fn test_unknown_period_rejected() {
        let err = required_principal(RateTable::standard(), dec!(5), "2").unwrap_err();
        assert!(matches!(err, NestCalcError::UnknownPeriod { .. }));
    }
}
