mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, replay, InitArgs, ReplayArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Strata CLI - replay layer transitions against a canvas store
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default strata.config.json
    Init(InitArgs),

    /// Replay a transition log and print the resulting store
    Replay(ReplayArgs),
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let config = Config::load(cwd)?;
    init_logging(&config);

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Replay(args) => replay(args, cwd, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    if let Err(err) = run(cli, &cwd) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
