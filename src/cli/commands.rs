//! CLI command definitions using clap.
//!
//! - run: aggregate subdomains for a target domain
//! - config: inspect and edit the tool configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default recursion depth for `run --recursive`
pub const DEFAULT_DEPTH: usize = 2;

/// subsagg - subdomain aggregator
#[derive(Parser, Debug)]
#[command(name = "subsagg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't print the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect subdomains for a domain
    Run {
        /// Target domain (e.g. example.com)
        domain: String,

        /// Re-run the tools against newly found subdomains
        #[arg(short, long)]
        recursive: bool,

        /// Maximum recursion depth
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        depth: usize,

        /// Directory the result file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Manage the tool configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Add a tool
    AddTool {
        /// Tool name
        name: String,

        /// Command tokens, comma separated (e.g. mytool,-d,{domain})
        #[arg(value_delimiter = ',', required = true)]
        cmd: Vec<String>,
    },

    /// Remove a tool
    RmTool {
        /// Tool name
        name: String,
    },

    /// Set the wordlist path
    SetWordlist {
        path: String,
    },

    /// Set the resolvers file path
    SetResolvers {
        path: String,
    },

    /// Show the current config
    Show,

    /// Reset the config to defaults
    Reset,
}
