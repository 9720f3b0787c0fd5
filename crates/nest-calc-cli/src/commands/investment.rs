use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use nest_calc_core::investment::returns::{self, InvestmentInput};
use nest_calc_core::investment::target::{self, TargetReturnInput};
use nest_calc_core::RateTable;

use crate::input;
use crate::input::text::{parse_amount, parse_periods};

/// Arguments for an investment return projection
#[derive(Args)]
pub struct ReturnsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Period key from the rate table, in days
    #[arg(long, default_value = "1")]
    pub period: String,

    /// Reinvest returns each period
    #[arg(long)]
    pub compound: bool,

    /// Number of periods to compound over
    #[arg(long, value_parser = parse_periods, default_value = "1")]
    pub compound_periods: Decimal,
}

/// Arguments for the principal needed to hit a target return
#[derive(Args)]
pub struct TargetReturnArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Return wanted from one period
    #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
    pub target: Option<Decimal>,

    /// Period key from the rate table, in days
    #[arg(long, default_value = "1")]
    pub period: String,
}

impl ReturnsArgs {
    fn to_input(&self) -> Result<InvestmentInput, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        Ok(InvestmentInput {
            principal,
            period: self.period.clone(),
            compound: self.compound,
            compound_periods: self.compound_periods,
        })
    }
}

impl TargetReturnArgs {
    fn to_input(&self) -> Result<TargetReturnInput, Box<dyn std::error::Error>> {
        let target_return = self
            .target
            .ok_or("--target is required (or provide --input)")?;
        Ok(TargetReturnInput {
            target_return,
            period: self.period.clone(),
        })
    }
}

pub fn run_returns(args: ReturnsArgs, rates: &RateTable) -> Result<Value, Box<dyn std::error::Error>> {
    let inv_input: InvestmentInput = input::resolve(args.input.as_deref(), || args.to_input())?;
    let result = returns::calculate_investment_return(rates, &inv_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_target_return(
    args: TargetReturnArgs,
    rates: &RateTable,
) -> Result<Value, Box<dyn std::error::Error>> {
    let target_input: TargetReturnInput =
        input::resolve(args.input.as_deref(), || args.to_input())?;
    let result = target::calculate_target_return(rates, &target_input)?;
    Ok(serde_json::to_value(result)?)
}
