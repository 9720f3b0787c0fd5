use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use nest_calc_core::borrowing::fees::UpfrontFee;
use nest_calc_core::borrowing::net_profit::{self, BorrowedFundsInput};
use nest_calc_core::borrowing::reverse::{self, ReverseBorrowedFundsInput};
use nest_calc_core::RateTable;

use crate::input;
use crate::input::text::{parse_amount, parse_periods};

/// Arguments for investing borrowed funds
#[derive(Args)]
pub struct BorrowArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Loan interest rate, percent per --interval
    #[arg(long, value_parser = parse_amount, default_value = "0", allow_hyphen_values = true)]
    pub interest_rate: Decimal,

    /// How long the loan is held, in days
    #[arg(long, value_parser = parse_amount, default_value = "1", allow_hyphen_values = true)]
    pub days: Decimal,

    /// Interval the interest rate is quoted per (e.g. "Monthly")
    #[arg(long, default_value = "Daily")]
    pub interval: String,

    /// Period key the borrowed funds are invested at
    #[arg(long, default_value = "1")]
    pub withdraw_period: String,

    /// Upfront fee; a flat amount unless --fee-percentage is set
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub fee: Option<Decimal>,

    /// Treat --fee as a percentage of the borrowed amount
    #[arg(long, requires = "fee")]
    pub fee_percentage: bool,

    /// Compound the reinvested net returns
    #[arg(long)]
    pub reinvest_compound: bool,

    /// Number of periods to reinvest over
    #[arg(long, value_parser = parse_periods, default_value = "1")]
    pub reinvest_periods: Decimal,
}

/// Arguments for the borrowing needed to sustain a withdrawal
#[derive(Args)]
pub struct ReverseBorrowArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount to withdraw every withdraw period
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub withdraw_amount: Option<Decimal>,

    /// Loan interest rate, percent per --interval
    #[arg(long, value_parser = parse_amount, default_value = "0", allow_hyphen_values = true)]
    pub interest_rate: Decimal,

    /// How long the loan is held, in days
    #[arg(long, value_parser = parse_amount, default_value = "1", allow_hyphen_values = true)]
    pub days: Decimal,

    /// Interval the interest rate is quoted per (e.g. "Monthly")
    #[arg(long, default_value = "Daily")]
    pub interval: String,

    /// Period key the borrowed funds are invested at
    #[arg(long, default_value = "1")]
    pub withdraw_period: String,
}

impl BorrowArgs {
    fn upfront_fee(&self) -> UpfrontFee {
        match self.fee {
            None => UpfrontFee::None,
            Some(percent) if self.fee_percentage => UpfrontFee::Percentage { percent },
            Some(amount) => UpfrontFee::Flat { amount },
        }
    }

    fn to_input(&self) -> Result<BorrowedFundsInput, Box<dyn std::error::Error>> {
        let borrowed_amount = self
            .amount
            .ok_or("--amount is required (or provide --input)")?;
        Ok(BorrowedFundsInput {
            borrowed_amount,
            interest_rate: self.interest_rate,
            borrow_period_days: self.days,
            interval: self.interval.clone(),
            withdraw_period: self.withdraw_period.clone(),
            upfront_fee: self.upfront_fee(),
            reinvest_compound: self.reinvest_compound,
            reinvest_periods: self.reinvest_periods,
        })
    }
}

impl ReverseBorrowArgs {
    fn to_input(&self) -> Result<ReverseBorrowedFundsInput, Box<dyn std::error::Error>> {
        let desired_withdraw_amount = self
            .withdraw_amount
            .ok_or("--withdraw-amount is required (or provide --input)")?;
        Ok(ReverseBorrowedFundsInput {
            desired_withdraw_amount,
            interest_rate: self.interest_rate,
            borrow_period_days: self.days,
            interval: self.interval.clone(),
            withdraw_period: self.withdraw_period.clone(),
        })
    }
}

pub fn run_borrow(args: BorrowArgs, rates: &RateTable) -> Result<Value, Box<dyn std::error::Error>> {
    let borrow_input: BorrowedFundsInput =
        input::resolve(args.input.as_deref(), || args.to_input())?;
    let result = net_profit::borrowed_funds_net_profit(rates, &borrow_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_reverse_borrow(
    args: ReverseBorrowArgs,
    rates: &RateTable,
) -> Result<Value, Box<dyn std::error::Error>> {
    let reverse_input: ReverseBorrowedFundsInput =
        input::resolve(args.input.as_deref(), || args.to_input())?;
    let result = reverse::reverse_borrowed_funds_needed(rates, &reverse_input)?;
    Ok(serde_json::to_value(result)?)
}
