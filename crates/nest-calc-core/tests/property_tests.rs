use nest_calc_core::borrowing::fees::UpfrontFee;
use nest_calc_core::borrowing::{net_profit, reverse};
use nest_calc_core::investment::{returns, target};
use nest_calc_core::RateTable;
use proptest::prelude::*;
use proptest::sample::select;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const PERIODS: [&str; 4] = ["1", "7", "14", "28"];
const INTERVALS: [&str; 6] = ["Daily", "Weekly", "Bi-weekly", "Credit Card", "Monthly", "Yearly"];

fn cents(v: u64) -> Decimal {
    Decimal::new(v as i64, 2)
}

fn rel_error(actual: Decimal, expected: Decimal) -> Decimal {
    let scale = expected.abs().max(Decimal::ONE);
    ((actual - expected) / scale).abs()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_simple_return_is_principal_times_rate(
        principal in 0u64..100_000_000,
        period in select(PERIODS.to_vec()),
    ) {
        let rates = RateTable::standard();
        let p = cents(principal);
        let r = returns::simple_or_compound_return(rates, p, period, false, dec!(1)).unwrap();
        let expected = p * rates.period_rate(period).unwrap() / dec!(100);
        prop_assert_eq!(r, expected);
    }

    #[test]
    fn prop_single_compound_period_equals_simple(
        principal in 0u64..100_000_000,
        period in select(PERIODS.to_vec()),
    ) {
        let rates = RateTable::standard();
        let p = cents(principal);
        let simple = returns::simple_or_compound_return(rates, p, period, false, dec!(1)).unwrap();
        let compound = returns::simple_or_compound_return(rates, p, period, true, dec!(1)).unwrap();
        prop_assert_eq!(simple, compound);
    }

    #[test]
    fn prop_required_principal_inverts_simple_return(
        target_cents in 1u64..10_000_000,
        period in select(PERIODS.to_vec()),
    ) {
        let rates = RateTable::standard();
        let t = cents(target_cents);
        let principal = target::required_principal(rates, t, period)
            .unwrap()
            .into_result()
            .unwrap();
        let back = returns::simple_or_compound_return(rates, principal, period, false, dec!(1)).unwrap();
        prop_assert!(rel_error(back, t) < dec!(0.000000001));
    }

    #[test]
    fn prop_zero_cost_borrowing_is_plain_return(
        amount in 0u64..100_000_000,
        days in 0u32..60,
        period in select(PERIODS.to_vec()),
        interval in select(INTERVALS.to_vec()),
    ) {
        let rates = RateTable::standard();
        let input = net_profit::BorrowedFundsInput {
            borrowed_amount: cents(amount),
            interest_rate: Decimal::ZERO,
            borrow_period_days: Decimal::from(days),
            interval: interval.into(),
            withdraw_period: period.into(),
            upfront_fee: UpfrontFee::None,
            reinvest_compound: false,
            reinvest_periods: dec!(1),
        };
        let out = net_profit::borrowed_funds_net_profit(rates, &input).unwrap();
        let plain = returns::simple_or_compound_return(rates, cents(amount), period, false, dec!(1)).unwrap();
        prop_assert_eq!(out.result.net_returns, plain);
    }

    #[test]
    fn prop_reverse_back_solve_round_trips(
        desired in 1u64..1_000_000,
        rate_bp in 0u32..2_000,
        days in 0u32..30,
        period in select(PERIODS.to_vec()),
        interval in select(INTERVALS.to_vec()),
    ) {
        let rates = RateTable::standard();
        let interest_rate = Decimal::new(rate_bp as i64, 2);
        let input = reverse::ReverseBorrowedFundsInput {
            desired_withdraw_amount: cents(desired),
            interest_rate,
            borrow_period_days: Decimal::from(days),
            interval: interval.into(),
            withdraw_period: period.into(),
        };
        let out = reverse::reverse_borrowed_funds_needed(rates, &input).unwrap();

        // Infeasible exactly when the loan costs at least the return
        let r = match out.result.feasible() {
            Some(r) => r.clone(),
            None => {
                let i = out.result.infeasibility().unwrap();
                prop_assert!(i.cost_rate >= i.return_rate);
                return Ok(());
            }
        };
        prop_assert!(r.loan_cost_rate < r.withdraw_rate);
        prop_assert!(r.borrowed_amount_needed > Decimal::ZERO);

        let fwd = net_profit::borrowed_funds_net_profit(rates, &net_profit::BorrowedFundsInput {
            borrowed_amount: r.borrowed_amount_needed,
            interest_rate,
            borrow_period_days: Decimal::from(days),
            interval: interval.into(),
            withdraw_period: period.into(),
            upfront_fee: UpfrontFee::None,
            reinvest_compound: false,
            reinvest_periods: dec!(1),
        }).unwrap();
        prop_assert!(rel_error(fwd.result.initial_withdraw_returns, cents(desired)) < dec!(0.000000001));
    }
}
