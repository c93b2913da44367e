//! Operator activity log and its summaries.

pub mod logger;
pub mod reporter;
