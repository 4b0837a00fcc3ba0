//! CLI library components for the natality comparison tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
