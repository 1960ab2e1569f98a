//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// pbxgen - a deterministic Xcode project and workspace generator
#[derive(Parser)]
#[command(name = "pbxgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate project, scheme, and workspace files
    Generate(GenerateArgs),

    /// Remove generated project and workspace files
    Clean(CleanArgs),
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Number of parallel jobs
    #[arg(short, long, env = "PBXGEN_JOBS")]
    pub jobs: Option<usize>,
}

#[derive(Args, Clone)]
pub struct CleanArgs {}
