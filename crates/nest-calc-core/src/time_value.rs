use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::NestCalcError;
use crate::types::{Money, Periods, Percent, Rate};
use crate::NestCalcResult;

/// Upper bound on compounding periods accepted by the growth helpers.
pub const MAX_COMPOUND_PERIODS: Decimal = dec!(10000);

/// Period count used when none is given.
pub fn default_periods() -> Periods {
    Decimal::ONE
}

/// Convert a percentage quote (4 = 4%) into a decimal rate (0.04).
pub fn percent_to_rate(percent: Percent) -> Rate {
    percent / dec!(100)
}

fn overflow(field: &str, expr: String) -> NestCalcError {
    NestCalcError::InvalidInput {
        field: field.into(),
        reason: format!("{expr} overflows"),
    }
}

/// `a * b`, with overflow reported against `field`.
pub fn checked_product(a: Decimal, b: Decimal, field: &str) -> NestCalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(field, format!("{a} * {b}")))
}

/// `a + b`, with overflow reported against `field`.
pub fn checked_sum(a: Decimal, b: Decimal, field: &str) -> NestCalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(field, format!("{a} + {b}")))
}

/// `a - b`, with overflow reported against `field`.
pub fn checked_difference(a: Decimal, b: Decimal, field: &str) -> NestCalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(field, format!("{a} - {b}")))
}

/// `a / b`. A zero divisor is `DivisionByZero`; overflow is `InvalidInput`.
pub fn checked_quotient(a: Decimal, b: Decimal, field: &str) -> NestCalcResult<Decimal> {
    if b.is_zero() {
        return Err(NestCalcError::DivisionByZero {
            context: field.into(),
        });
    }
    a.checked_div(b).ok_or_else(|| overflow(field, format!("{a} / {b}")))
}

/// Growth factor (1 + r)^n.
///
/// Whole `n` is multiplied out step by step; fractional `n` goes through
/// `checked_powd`. Overflow is reported instead of panicking.
pub fn growth_factor(rate: Rate, periods: Periods) -> NestCalcResult<Decimal> {
    if periods < Decimal::ZERO {
        return Err(NestCalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be >= 0".into(),
        });
    }
    if periods > MAX_COMPOUND_PERIODS {
        return Err(NestCalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("Number of periods must be <= {MAX_COMPOUND_PERIODS}"),
        });
    }

    let base = checked_sum(Decimal::ONE, rate, "rate")?;
    let too_large = || overflow("periods", format!("Growth factor (1 + {rate})^{periods}"));

    if periods.fract().is_zero() {
        let n = periods.to_u64().ok_or_else(too_large)?;
        let mut factor = Decimal::ONE;
        for _ in 0..n {
            factor = factor.checked_mul(base).ok_or_else(too_large)?;
        }
        Ok(factor)
    } else {
        base.checked_powd(periods).ok_or_else(too_large)
    }
}

/// Gain on `principal` at `rate` per period.
///
/// Simple mode earns one period of interest. Compound mode earns
/// `principal * (1 + r)^n - principal`.
pub fn period_gain(
    principal: Money,
    rate: Rate,
    compound: bool,
    periods: Periods,
) -> NestCalcResult<Money> {
    if !compound {
        return checked_product(principal, rate, "principal");
    }
    let factor = growth_factor(rate, periods)?;
    let grown = checked_product(principal, factor, "principal")?;
    checked_difference(grown, principal, "principal")
}
