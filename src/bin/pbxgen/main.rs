//! pbxgen CLI - deterministic Xcode project generation

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pbxgen::core::manifest::ManifestError;
use pbxgen::util::diagnostic::suggestions;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        if matches!(
            e.downcast_ref::<ManifestError>(),
            Some(ManifestError::NotFound { .. })
        ) {
            eprintln!("{}", suggestions::NO_MANIFEST);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pbxgen=debug")
    } else {
        EnvFilter::new("pbxgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match &cli.command {
        Commands::Generate(args) => commands::generate::execute(args.clone(), &cli),
        Commands::Clean(args) => commands::clean::execute(args.clone(), &cli),
    }
}
