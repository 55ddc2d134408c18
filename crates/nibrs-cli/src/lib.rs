//! CLI library components for the NIBRS explorer.

pub mod commands;
pub mod logging;
pub mod types;
