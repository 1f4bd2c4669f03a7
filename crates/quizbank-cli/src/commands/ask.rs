//! The `quizbank ask` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::bank::{serve, QuestionBank, QuestionFilter, QuizMode};
use quizbank_core::parser::{load_banks, mark_mastered};

use super::{make_rng, options_table, resolve_choice, setup};

/// What `ask` should do once the question is built.
pub struct Answering {
    /// Letter or text of the learner's pick.
    pub choice: Option<String>,
    /// Write `mastered = true` back to the bank file on a correct pick.
    pub record: bool,
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    bank_path: PathBuf,
    category: Option<String>,
    item: Option<String>,
    missed: bool,
    generation: Option<String>,
    seed: Option<u64>,
    json: bool,
    config_path: Option<PathBuf>,
    answering: Answering,
) -> Result<()> {
    let (engine, generation) = setup(config_path.as_deref(), generation.as_deref())?;

    // Questions may come from any bank under the path.
    let banks = load_banks(&bank_path)?;
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for bank in &banks {
        for item in &bank.items {
            if !seen.insert(item.id.as_str()) {
                tracing::warn!("item id '{}' appears in more than one bank", item.id);
            }
            sources.push(bank.source.clone());
        }
    }
    let bank = QuestionBank {
        id: "combined".into(),
        name: "combined".into(),
        description: String::new(),
        items: banks.iter().flat_map(|b| b.items.iter().cloned()).collect(),
        source: None,
    };
    tracing::debug!("loaded {} items from {}", bank.items.len(), bank_path.display());

    let filter = QuestionFilter {
        category,
        item_name: item,
        mode: if missed { QuizMode::Missed } else { QuizMode::All },
    };

    let mut rng = make_rng(seed);
    let item = match bank.pick(&filter, &mut rng) {
        Ok(item) => item,
        Err(e) => {
            if missed {
                println!("No items left to review in this selection.");
                return Ok(());
            }
            return Err(e.into());
        }
    };

    let question = serve(&bank, item, &engine, generation, &mut rng);

    let verdict = answering.choice.as_deref().map(|choice| {
        let picked = resolve_choice(choice, &question.options).to_string();
        let correct = question.is_correct(&picked);
        (picked, correct)
    });

    if answering.record && matches!(verdict, Some((_, true))) {
        let source = bank
            .items
            .iter()
            .position(|other| std::ptr::eq(other, item))
            .and_then(|index| sources[index].as_deref());
        if let Some(path) = source {
            mark_mastered(path, &item.id)?;
        }
    }

    if json {
        let output = match &verdict {
            Some((picked, correct)) => serde_json::json!({
                "question": question,
                "choice": picked,
                "correct": correct,
            }),
            None => serde_json::to_value(&question)?,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("[{}] {}", item.category, item.item_name);
    match &question.unit {
        Some(unit) => println!("{} ({unit})", question.prompt),
        None => println!("{}", question.prompt),
    }
    println!("{}", options_table(&question.options));

    match verdict {
        Some((_, true)) => println!("Correct!"),
        Some((picked, false)) => println!(
            "Incorrect: you picked {picked}. The answer is {}.",
            question.correct_answer
        ),
        None => {}
    }

    Ok(())
}
