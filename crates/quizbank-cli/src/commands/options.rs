//! The `quizbank options` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::{Answer, AnswerPool};

use super::{make_rng, options_table, setup, split_list};

pub fn execute(
    answer: String,
    pool: String,
    predefined: Option<String>,
    generation: Option<String>,
    seed: Option<u64>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (engine, generation) = setup(config_path.as_deref(), generation.as_deref())?;

    let correct = Answer::parse(&answer);
    let pool: AnswerPool = split_list(&pool).into_iter().collect();
    let predefined = predefined.map(|p| split_list(&p));

    let mut rng = make_rng(seed);
    let options = engine.generate(
        generation,
        &correct,
        &pool,
        predefined.as_deref(),
        &mut rng,
    );

    if json {
        println!("{}", serde_json::to_string(&options)?);
    } else {
        println!("Generation: {generation}");
        println!("{}", options_table(&options));
    }

    Ok(())
}
