#![forbid(unsafe_code)]

//! `runseg`: print the script, orientation, and font-fallback runs of a text.

pub mod cli;
pub mod error;
pub mod report;

pub use cli::{Cli, OutputFormat, run, run_from_env};
pub use error::{CliError, Result};
