pub mod error;
pub mod rates;
pub mod time_value;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "borrowing")]
pub mod borrowing;

pub use error::NestCalcError;
pub use rates::RateTable;
pub use types::*;

/// Standard result type for all nest-calc operations
pub type NestCalcResult<T> = Result<T, NestCalcError>;
