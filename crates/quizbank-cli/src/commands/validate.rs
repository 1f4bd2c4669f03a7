//! The `quizbank validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::parser::{load_banks, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = load_banks(&bank_path)?;
    let mut total_warnings = 0;

    for bank in &banks {
        let mastered = bank.items.iter().filter(|item| item.mastered).count();
        println!("Bank: {} ({} items)", bank.name, bank.items.len());
        println!(
            "  categories: {}; mastered: {mastered}/{}",
            bank.categories().join(", "),
            bank.items.len()
        );

        let warnings = validate_bank(bank);
        for warning in &warnings {
            match &warning.item_id {
                Some(id) => println!("  [{id}] WARNING: {}", warning.message),
                None => println!("  WARNING: {}", warning.message),
            }
        }
        total_warnings += warnings.len();
    }

    match total_warnings {
        0 => println!("All banks valid."),
        n => println!("\n{n} warning(s) found."),
    }

    Ok(())
}
