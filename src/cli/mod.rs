//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod chat;
pub mod config;
pub mod tag;
pub mod tension;
