use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// tajine - recipe normalization
#[derive(Parser)]
#[command(name = "tajine")]
#[command(about = "Normalize, analyze and scale recipes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill empty recipes from the recipe API, then compute masses, nutrients and diet
    Normalize {
        /// Recipe JSON file (one recipe or a list)
        file: PathBuf,

        /// Skip the recipe API lookup
        #[arg(long)]
        offline: bool,
    },
    /// Normalize a recipe and print a copy scaled to the given servings
    Scale {
        /// Recipe JSON file holding a single recipe
        file: PathBuf,

        #[arg(long)]
        servings: u32,
    },
    /// Parse one free-text ingredient line
    ParseIngredient { line: String },
    /// Split free-text instructions into steps
    ParseInstructions { text: String },
    /// Extract the serving count from a description such as "Serves 4-6"
    ParseServings { text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = tajine::config::Config::load(args.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    tajine::observability::init_observability(
        &config.observability.log_level,
        config.observability.json,
    )?;

    match args.command {
        Commands::Normalize { file, offline } => {
            cli::normalize::normalize(config, file, offline).await
        }
        Commands::Scale { file, servings } => cli::scale::scale(config, file, servings).await,
        Commands::ParseIngredient { line } => cli::parse::parse_ingredient(&line),
        Commands::ParseInstructions { text } => cli::parse::parse_instruction_text(&text),
        Commands::ParseServings { text } => cli::parse::parse_servings_text(&text),
    }
}
