//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `check` - Log in and read the account's rate limit
//! - `discover` - Print the stream catalog
//! - `read` - Sync the selected streams to stdout

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
