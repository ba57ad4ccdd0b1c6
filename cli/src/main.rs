mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{inspect, render};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}

/// `RUST_LOG` wins; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> { run() }
