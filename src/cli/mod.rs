//! CLI command handlers

pub mod commands;

pub use commands::{import_rules, process, rules, show};
