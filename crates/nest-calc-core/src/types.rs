use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::NestCalcError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.04 = 4%).
pub type Rate = Decimal;

/// Rates expressed as percentages (4 = 4%), the way the rate table and
/// loan terms are quoted.
pub type Percent = Decimal;

/// Number of compounding periods. May be fractional.
pub type Periods = Decimal;

/// Reject negative amounts, naming the offending field.
pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<(), NestCalcError> {
    if value < Decimal::ZERO {
        return Err(NestCalcError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be >= 0"),
        });
    }
    Ok(())
}

/// Why a back-solve has no meaningful answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibleReason {
    /// The rate being divided by is zero.
    ZeroRate,
    /// Loan cost per period exactly equals the withdraw rate.
    DegenerateRate,
    /// Loan cost per period is larger than the withdraw rate.
    LoanCostExceedsReturn,
}

/// Details of an infeasible back-solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infeasibility {
    pub reason: InfeasibleReason,
    /// Return rate available per period (decimal).
    pub return_rate: Rate,
    /// Cost of borrowing over the loan period (decimal).
    pub cost_rate: Rate,
    /// Value the formula produced before classification, if it is finite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<Money>,
    pub message: String,
}

/// Outcome of a back-solve: either a usable answer or an explanation of
/// why the requested target cannot be reached.
///
/// Serialized with an internal `status` tag, so `T` must serialize as a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BackSolve<T> {
    Feasible(T),
    Infeasible(Infeasibility),
}

impl<T> BackSolve<T> {
    pub fn is_feasible(&self) -> bool {
        matches!(self, BackSolve::Feasible(_))
    }

    pub fn feasible(&self) -> Option<&T> {
        match self {
            BackSolve::Feasible(v) => Some(v),
            BackSolve::Infeasible(_) => None,
        }
    }

    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            BackSolve::Feasible(_) => None,
            BackSolve::Infeasible(i) => Some(i),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BackSolve<U> {
        match self {
            BackSolve::Feasible(v) => BackSolve::Feasible(f(v)),
            BackSolve::Infeasible(i) => BackSolve::Infeasible(i),
        }
    }

    /// Treat an infeasible outcome as an error.
    pub fn into_result(self) -> Result<T, NestCalcError> {
        match self {
            BackSolve::Feasible(v) => Ok(v),
            BackSolve::Infeasible(i) => Err(NestCalcError::FinancialImpossibility(i.message)),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
