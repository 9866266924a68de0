use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;

use cli::Cli;
use cli::commands::{Commands, ConfigCommands};
use subsagg::config::Config;
use subsagg::engine::{Aggregator, Progress, RunOutcome, ToolRun};
use subsagg::sink;
use subsagg::tools::{ProcessInvoker, Tool};

const BANNER: &str = r"
                __
      ___ __ __/ /  ___ ___ ____ ____ _
     (_-</ // / _ \(_-</ _ '/ _ '/ _ '/
    /___/\_,_/_.__/___/\_,_/\_, /\_, /
                           /___//___/";

fn print_banner() {
    println!("{}", BANNER.cyan());
    println!("    Version {}\n", env!("CARGO_PKG_VERSION"));
}

fn setup_logging(verbose: bool) -> Result<()> {
    // Verbose runs trace to the terminal instead of the log file
    if verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .target(env_logger::Target::Stderr)
            .init();
        return Ok(());
    }

    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subsagg")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("subsagg.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: Config) -> Result<()> {
    match &cli.command {
        Commands::Run {
            domain,
            recursive,
            depth,
            output_dir,
        } => handle_run_command(domain, *recursive, *depth, output_dir, &config).await,
        Commands::Config { command } => handle_config_command(command, config, cli.config.as_ref()),
    }
}

async fn handle_run_command(
    domain: &str,
    recursive: bool,
    depth: usize,
    output_dir: &Path,
    config: &Config,
) -> Result<()> {
    info!("Run for {} (recursive: {}, depth: {})", domain, recursive, depth);
    println!("{} Collecting subdomains for {}...", "~".cyan(), domain);

    let invoker = Arc::new(ProcessInvoker::new(config.invoker_policy()));
    let aggregator =
        Aggregator::from_config(invoker, config).with_progress(Arc::new(ConsoleProgress { recursive }));

    let outcome = if recursive {
        aggregator.run_recursive(domain, depth).await
    } else {
        aggregator.run_flat(domain).await
    };

    print_summary(&outcome);

    let path = sink::persist_or_dump(&outcome.results, domain, output_dir, &mut std::io::stdout().lock())
        .inspect_err(|e| eprintln!("{} Error saving: {}", "!".red(), e))
        .context("Failed to save results")?;
    println!(
        "{} {} unique subdomains saved to {}",
        "<+>".green(),
        outcome.results.len(),
        path.display()
    );
    Ok(())
}

/// Prints each tool as it starts and finishes
struct ConsoleProgress {
    recursive: bool,
}

impl Progress for ConsoleProgress {
    fn level_started(&self, domain: &str, depth: usize, max_depth: usize) {
        if self.recursive {
            println!("{} Recursion level {}/{} for {}", "~".cyan(), depth, max_depth, domain);
        }
    }

    fn tool_started(&self, tool: &Tool, _domain: &str, command_line: &[String]) {
        println!("{} {}: {}", "<+>".green(), tool.name, command_line.join(" "));
    }

    fn tool_finished(&self, run: &ToolRun) {
        match &run.error {
            Some(error) => println!("{} {} not complete: {}", "!".red(), run.tool, error),
            None => info!(
                "{} on {}: {} lines, {} new",
                run.tool, run.domain, run.raw_count, run.admitted
            ),
        }
    }
}

fn print_summary(outcome: &RunOutcome) {
    let failed = outcome.report.failures().count();
    println!(
        "{} {} tool runs over {} domains, {} failed",
        "~".cyan(),
        outcome.report.invocation_count(),
        outcome.report.domains().len(),
        failed
    );
}

fn handle_config_command(command: &ConfigCommands, mut config: Config, explicit_path: Option<&PathBuf>) -> Result<()> {
    info!("Handling config command: {:?}", command);
    let path = Config::locate(explicit_path);

    match command {
        ConfigCommands::AddTool { name, cmd } => {
            config.add_tool(name, cmd.clone())?;
            config.save(&path)?;
            println!("{} Tool added.", "<+>".green());
        }
        ConfigCommands::RmTool { name } => {
            if config.remove_tool(name) {
                config.save(&path)?;
                println!("{} Tool removed.", "<+>".green());
            } else {
                println!("{} No tool named {}.", "!".yellow(), name);
            }
        }
        ConfigCommands::SetWordlist { path: wordlist } => {
            config.set_wordlist(wordlist);
            config.save(&path)?;
            println!("{} Wordlist set.", "<+>".green());
        }
        ConfigCommands::SetResolvers { path: resolvers } => {
            config.set_resolvers(resolvers);
            config.save(&path)?;
            println!("{} Resolvers set.", "<+>".green());
        }
        ConfigCommands::Show => {
            print!("{}", config.to_yaml()?);
        }
        ConfigCommands::Reset => {
            Config::default().save(&path)?;
            println!("{} Config set to default.", "<+>".green());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(cli.is_verbose()).context("Failed to setup logging")?;

    if !cli.no_banner {
        print_banner();
    }

    let config = Config::load(cli.config.as_ref());
    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, config).await.context("Application failed")?;

    Ok(())
}
