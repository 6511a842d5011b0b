//! CLI module for filekeep
//!
//! A thin, non-interactive front end: one subcommand per engine operation,
//! one JSON response per invocation.

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_store, execute, run};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
