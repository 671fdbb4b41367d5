//! CLI command definitions.

pub mod audit;
pub mod call;
pub mod check;
pub mod serve;
pub mod tools;
