//! Report envelope and output formatters

pub mod formatter;
pub mod report;
