use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use nest_calc_core::RateTable;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Scenario input plus an optional `rates` object replacing the standard
/// rate table for this call.
#[derive(Deserialize)]
struct Request<T> {
    #[serde(default)]
    rates: Option<RateTable>,
    #[serde(flatten)]
    input: T,
}

fn handle<T, O, F>(input_json: &str, calc: F) -> NapiResult<String>
where
    T: DeserializeOwned,
    O: Serialize,
    F: FnOnce(&RateTable, &T) -> nest_calc_core::NestCalcResult<O>,
{
    let request: Request<T> = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let rates = match &request.rates {
        Some(table) => table,
        None => RateTable::standard(),
    };
    let output = calc(rates, &request.input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn investment_return(input_json: String) -> NapiResult<String> {
    handle(
        &input_json,
        nest_calc_core::investment::returns::calculate_investment_return,
    )
}

#[napi]
pub fn target_return(input_json: String) -> NapiResult<String> {
    handle(
        &input_json,
        nest_calc_core::investment::target::calculate_target_return,
    )
}

// ---------------------------------------------------------------------------
// Borrowing
// ---------------------------------------------------------------------------

#[napi]
pub fn borrowed_funds(input_json: String) -> NapiResult<String> {
    handle(
        &input_json,
        nest_calc_core::borrowing::net_profit::borrowed_funds_net_profit,
    )
}

#[napi]
pub fn reverse_borrowed_funds(input_json: String) -> NapiResult<String> {
    handle(
        &input_json,
        nest_calc_core::borrowing::reverse::reverse_borrowed_funds_needed,
    )
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[napi]
pub fn rate_table() -> NapiResult<String> {
    serde_json::to_string(RateTable::standard()).map_err(to_napi_error)
}
