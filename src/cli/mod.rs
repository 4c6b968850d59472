pub mod completions;
pub mod generate;
pub mod targets;

use clap::{Parser, Subcommand};

/// iconsmith - App icon set generator
#[derive(Parser, Debug)]
#[command(name = "iconsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only print errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every written file
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Android and iOS icon sets from a square image
    Generate(generate::GenerateArgs),

    /// List the resolutions generated for each platform
    Targets(targets::TargetsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
