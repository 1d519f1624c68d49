//! Report structures and formatters

pub mod formatter;
pub mod report;
