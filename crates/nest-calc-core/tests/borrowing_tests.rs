use nest_calc_core::borrowing::fees::UpfrontFee;
use nest_calc_core::borrowing::{loan, net_profit, reverse};
use nest_calc_core::investment::returns;
use nest_calc_core::{InfeasibleReason, RateTable};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn forward(amount: Decimal, rate: Decimal, days: Decimal, interval: &str, period: &str) -> net_profit::BorrowedFundsInput {
    net_profit::BorrowedFundsInput {
        borrowed_amount: amount,
        interest_rate: rate,
        borrow_period_days: days,
        interval: interval.into(),
        withdraw_period: period.into(),
        upfront_fee: UpfrontFee::None,
        reinvest_compound: false,
        reinvest_periods: dec!(1),
    }
}

fn backward(desired: Decimal, rate: Decimal, days: Decimal, interval: &str, period: &str) -> reverse::ReverseBorrowedFundsInput {
    reverse::ReverseBorrowedFundsInput {
        desired_withdraw_amount: desired,
        interest_rate: rate,
        borrow_period_days: days,
        interval: interval.into(),
        withdraw_period: period.into(),
    }
}

fn assert_rel_close(actual: Decimal, expected: Decimal) {
    let scale = expected.abs().max(Decimal::ONE);
    let rel = ((actual - expected) / scale).abs();
    assert!(rel < dec!(0.000000001), "expected {expected}, got {actual}");
}

// ===========================================================================
// Loan interest
// ===========================================================================

#[test]
fn test_loan_interest_reference_case() {
    let l = loan::loan_interest(RateTable::standard(), dec!(1000), dec!(12), dec!(30), "Monthly", dec!(0))
        .unwrap();
    assert_eq!(l.total_interest_paid, dec!(120));
    assert_eq!(l.total_amount_owed, dec!(1120));
    assert_eq!(l.interval, "Monthly");
}

#[test]
fn test_credit_card_interval() {
    // 21% per 21-day cycle = 1% a day; 14 days on 500 = 70
    let l = loan::loan_interest(RateTable::standard(), dec!(500), dec!(21), dec!(14), "Credit Card", dec!(0))
        .unwrap();
    assert_eq!(l.total_interest_paid, dec!(70));
}

// ===========================================================================
// Borrowed funds
// ===========================================================================

#[test]
fn test_borrowed_funds_reference_scenario() {
    let out = net_profit::borrowed_funds_net_profit(
        RateTable::standard(),
        &forward(dec!(1000), dec!(12), dec!(7), "Monthly", "7"),
    )
    .unwrap();
    assert_eq!(out.result.loan.total_interest_paid, dec!(28));
    assert_eq!(out.result.borrow_period_returns, dec!(40));
    assert_eq!(out.result.net_returns, dec!(12));
}

#[test]
fn test_zero_cost_borrowing_matches_plain_return() {
    let rates = RateTable::standard();
    for key in ["1", "7", "14", "28"] {
        let out = net_profit::borrowed_funds_net_profit(
            rates,
            &forward(dec!(3200), dec!(0), dec!(28), "Yearly", key),
        )
        .unwrap();
        let plain = returns::simple_or_compound_return(rates, dec!(3200), key, false, dec!(1)).unwrap();
        assert_eq!(out.result.net_returns, plain, "period {key}");
    }
}

#[test]
fn test_flat_fee_flows_into_cost() {
    let mut input = forward(dec!(1000), dec!(12), dec!(7), "Monthly", "7");
    input.upfront_fee = UpfrontFee::Flat { amount: dec!(2) };
    let out = net_profit::borrowed_funds_net_profit(RateTable::standard(), &input).unwrap();
    assert_eq!(out.result.borrowing_cost, dec!(30));
    assert_eq!(out.result.net_returns, dec!(10));
}

// ===========================================================================
// Reverse back-solve
// ===========================================================================

#[test]
fn test_reverse_then_forward_reproduces_withdrawal() {
    let rates = RateTable::standard();
    let cases = [
        (dec!(0.48), dec!(12), dec!(7), "Monthly", "7"),
        (dec!(25), dec!(5), dec!(14), "Yearly", "14"),
        (dec!(100), dec!(0.2), dec!(28), "Daily", "28"),
        (dec!(3), dec!(3), dec!(1), "Monthly", "1"),
    ];

    for (desired, rate, days, interval, period) in cases {
        let back = reverse::reverse_borrowed_funds_needed(
            rates,
            &backward(desired, rate, days, interval, period),
        )
        .unwrap();
        let solved = back.result.into_result().unwrap();

        let fwd = net_profit::borrowed_funds_net_profit(
            rates,
            &forward(solved.borrowed_amount_needed, rate, days, interval, period),
        )
        .unwrap();

        assert_rel_close(fwd.result.net_returns, solved.net_returns_needed);
        assert_rel_close(fwd.result.initial_withdraw_returns, desired);
    }
}

#[test]
fn test_reverse_infeasible_when_daily_loan_outpaces_daily_return() {
    // 1% a day against 0.4% a day
    let out = reverse::reverse_borrowed_funds_needed(
        RateTable::standard(),
        &backward(dec!(1), dec!(1), dec!(1), "Daily", "1"),
    )
    .unwrap();
    let reason = out.result.infeasibility().unwrap();
    assert_eq!(reason.reason, InfeasibleReason::LoanCostExceedsReturn);
    assert!(reason.raw_value.unwrap() < Decimal::ZERO);

    let value = serde_json::to_value(&out.result).unwrap();
    assert_eq!(value["status"], "infeasible");
    assert_eq!(value["reason"], "loan_cost_exceeds_return");
}

#[test]
fn test_reverse_feasible_serializes_flat() {
    let out = reverse::reverse_borrowed_funds_needed(
        RateTable::standard(),
        &backward(dec!(0.48), dec!(12), dec!(7), "Monthly", "7"),
    )
    .unwrap();
    let value = serde_json::to_value(&out.result).unwrap();
    assert_eq!(value["status"], "feasible");
    assert!(value["borrowed_amount_needed"].is_string());
}
