//! Thin command-line front end over the ledger facade.

pub mod commands;
pub mod output;

pub use commands::{run_cli, run_with_args, Command};
