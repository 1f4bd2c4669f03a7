//! quizbank CLI: serve numeric self-quiz questions from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Numeric self-quiz with generated distractors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a random question from a bank
    Ask {
        /// Path to a .toml bank or a directory of banks
        #[arg(long)]
        bank: PathBuf,

        /// Only draw from this category
        #[arg(long)]
        category: Option<String>,

        /// Only draw from this item name
        #[arg(long)]
        item: Option<String>,

        /// Only draw items not yet mastered
        #[arg(long)]
        missed: bool,

        /// Distractor generation: 1 or 2 (default from config)
        #[arg(long)]
        generation: Option<String>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Answer the question: an option letter (A, B, ...) or the value itself
        #[arg(long)]
        choice: Option<String>,

        /// Mark the item mastered in its bank file when the choice is correct
        #[arg(long, requires = "choice")]
        record: bool,

        /// Print the question as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate options for a single answer
    Options {
        /// The correct answer
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// Other known answers (comma-separated)
        #[arg(long, default_value = "")]
        pool: String,

        /// Author-curated options for the second generation (comma-separated)
        #[arg(long)]
        predefined: Option<String>,

        /// Distractor generation: 1 or 2 (default from config)
        #[arg(long)]
        generation: Option<String>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the options as a JSON array
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ask {
            bank,
            category,
            item,
            missed,
            generation,
            seed,
            choice,
            record,
            json,
            config,
        } => commands::ask::execute(
            bank,
            category,
            item,
            missed,
            generation,
            seed,
            json,
            config,
            commands::ask::Answering { choice, record },
        ),
        Commands::Options {
            answer,
            pool,
            predefined,
            generation,
            seed,
            json,
            config,
        } => commands::options::execute(answer, pool, predefined, generation, seed, json, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
