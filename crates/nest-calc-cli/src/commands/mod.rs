pub mod borrowing;
pub mod investment;
pub mod rates;
