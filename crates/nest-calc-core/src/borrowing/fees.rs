use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{checked_product, percent_to_rate};
use crate::types::{ensure_non_negative, Money, Percent};
use crate::NestCalcResult;

/// One-time cost charged when the loan is taken out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpfrontFee {
    #[default]
    None,
    /// Fixed amount regardless of loan size.
    Flat { amount: Money },
    /// Percentage of the borrowed principal (2 = 2%).
    Percentage { percent: Percent },
}

impl UpfrontFee {
    /// Fee in money terms for a loan of `principal`.
    pub fn resolve(&self, principal: Money) -> NestCalcResult<Money> {
        match self {
            UpfrontFee::None => Ok(Decimal::ZERO),
            UpfrontFee::Flat { amount } => {
                ensure_non_negative("upfront_fee.amount", *amount)?;
                Ok(*amount)
            }
            UpfrontFee::Percentage { percent } => {
                ensure_non_negative("upfront_fee.percent", *percent)?;
                checked_product(principal, percent_to_rate(*percent), "upfront_fee.percent")
            }
        }
    }
}
