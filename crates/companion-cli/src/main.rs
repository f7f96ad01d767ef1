use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

use commands::context::GlobalArgs;

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Companion save-file maintenance", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved save-file path
    Path,
    /// Decrypt and print the saved snapshot as JSON
    Inspect {
        /// Print the API credential instead of redacting it
        #[arg(long)]
        show_secrets: bool,
    },
    /// Blank the stored API credential and re-save
    ClearApiKey,
    /// Write the default persistence settings file
    InitSettings {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Path => commands::path::run(&cli.global)?,
        Commands::Inspect { show_secrets } => commands::inspect::run(&cli.global, show_secrets)?,
        Commands::ClearApiKey => commands::clear_api_key::run(&cli.global)?,
        Commands::InitSettings { force } => commands::init_settings::run(&cli.global, force)?,
    }

    Ok(())
}
