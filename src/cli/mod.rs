//! CLI module for subsagg - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
