//! Command implementations.

pub mod check;
pub mod filter;
pub mod reach;
pub mod select;
pub mod utils;
