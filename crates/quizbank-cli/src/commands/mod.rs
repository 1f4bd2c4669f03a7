//! Subcommand implementations.

pub mod ask;
pub mod init;
pub mod options;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use comfy_table::Table;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbank_core::config::{load_config_from, QuizbankConfig};
use quizbank_core::{DistractorEngine, Generation};

/// Seeded when asked, otherwise from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Load config and build the engine plus the generation to run.
pub fn setup(
    config_path: Option<&Path>,
    generation: Option<&str>,
) -> Result<(DistractorEngine, Generation)> {
    let QuizbankConfig {
        engine,
        default_generation,
    } = load_config_from(config_path)?;
    let generation = match generation {
        Some(g) => g.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => default_generation,
    };
    Ok((DistractorEngine::new(engine)?, generation))
}

/// Render options as a lettered table.
pub fn options_table(options: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "Option"]);
    for (i, option) in options.iter().enumerate() {
        table.add_row(vec![option_label(i), option.clone()]);
    }
    table
}

fn option_label(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => char::from(b'A' + i).to_string(),
        None => (index + 1).to_string(),
    }
}

/// Turn a learner's pick into option text.
///
/// A single letter selects the option with that label; anything else is
/// taken as the answer text itself.
pub fn resolve_choice<'a>(choice: &'a str, options: &'a [String]) -> &'a str {
    let choice = choice.trim();
    let letter = match choice.as_bytes() {
        [b] if b.is_ascii_alphabetic() => Some(usize::from(b.to_ascii_uppercase() - b'A')),
        _ => None,
    };
    match letter.and_then(|i| options.get(i)) {
        Some(option) => option.as_str(),
        None => choice,
    }
}

/// Split a comma-separated CLI list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
