pub mod fees;
pub mod loan;
pub mod net_profit;
pub mod reverse;
