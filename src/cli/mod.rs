//! CLI module for querystore
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP service
//! - check: Verify the document store is reachable

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, CommonArgs};
pub use commands::{check, run, run_command, serve};
pub use config::{Overrides, ServiceConfig, STORE_ADDR_ENV, STORE_PASSWORD_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
