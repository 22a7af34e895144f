//! CLI library components for the visitor statistics normalizer.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
