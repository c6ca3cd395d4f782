use clap::{Parser, Subcommand};

mod commands;

use commands::{ProcessArgs, ShowConfigArgs};

#[derive(Parser)]
#[command(name = "insti-signal")]
#[command(
    about = "Institutional accumulation/distribution signals from OHLCV bars",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute signals for a CSV of bars and print a summary
    Process(ProcessArgs),
    /// Print the effective signal configuration as JSON
    Config(ShowConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so exported data on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::run_process(args)?,
        Commands::Config(args) => commands::run_show_config(&args)?,
    }

    Ok(())
}
