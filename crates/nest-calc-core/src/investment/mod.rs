pub mod returns;
pub mod target;
