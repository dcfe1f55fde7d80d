//! Interactive shell: the terminal stand-in for the budget form and table.

pub mod commands;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod ui;

pub use self::core::{CliError, CliMode};
pub use shell::run_cli;
