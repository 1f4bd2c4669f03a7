//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::answer::Answer;
use crate::bank::{QuestionBank, QuizItem, ANSWER_PLACEHOLDER};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    category: String,
    item_name: String,
    #[serde(default)]
    attribute: Option<String>,
    template: String,
    answer: String,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    mastered: bool,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    let mut bank = parse_bank_str(&content, path)?;
    bank.source = Some(path.to_path_buf());
    Ok(bank)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let items = parsed
        .items
        .into_iter()
        .map(|i| QuizItem {
            id: i.id,
            category: i.category.trim().to_string(),
            item_name: i.item_name.trim().to_string(),
            attribute: i
                .attribute
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
            template: i.template,
            answer: i.answer.trim().to_string(),
            unit: i.unit.filter(|u| !u.trim().is_empty()),
            options: i.options.iter().map(|o| o.trim().to_string()).collect(),
            mastered: i.mastered,
        })
        .collect();

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        items,
        source: None,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a single bank file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// Set `mastered = true` on the item `item_id` in the bank file at `path`.
///
/// The file is edited in place, so comments and layout survive. Returns
/// `false` when no item carries that id.
pub fn mark_mastered(path: &Path, item_id: &str) -> Result<bool> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("failed to parse TOML: {}", path.display()))?;

    let Some(items) = doc
        .get_mut("items")
        .and_then(|items| items.as_array_of_tables_mut())
    else {
        return Ok(false);
    };
    let Some(item) = items
        .iter_mut()
        .find(|table| table.get("id").and_then(|id| id.as_str()) == Some(item_id))
    else {
        return Ok(false);
    };
    item["mastered"] = toml_edit::value(true);

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to write bank file: {}", path.display()))?;
    tracing::info!(item = item_id, "marked mastered in {}", path.display());
    Ok(true)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.items.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "bank has no items".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for item in &bank.items {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                item_id: Some(item.id.clone()),
                message,
            })
        };

        if !seen_ids.insert(&item.id) {
            warn(format!("duplicate item ID: {}", item.id));
        }
        if item.answer.is_empty() {
            warn("answer is empty".into());
        }
        if !item.template.contains(ANSWER_PLACEHOLDER) {
            warn(format!("template has no {ANSWER_PLACEHOLDER} placeholder"));
        }
        if item.category.is_empty() || item.item_name.is_empty() {
            warn("category and item_name must not be empty".into());
        }
        if !item.options.is_empty() && !item.options.contains(&item.answer) {
            warn("predefined options do not include the answer".into());
        }
        if !item.answer.is_empty() && !Answer::parse(&item.answer).is_numeric() {
            warn(format!(
                "answer '{}' is not numeric; only label distractors will be generated",
                item.answer
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "cafe"
name = "Cafe Recipes"
description = "Drink builds for the bar"

[[items]]
id = "latte-m-milk"
category = "coffee"
item_name = "Latte (M)"
attribute = "milk"
template = "A medium latte needs [NUM] ml of milk."
answer = "240"
unit = "ml"

[[items]]
id = "latte-m-shot"
category = "coffee"
item_name = "Latte (M)"
attribute = "espresso"
template = "A medium latte needs [NUM] ml of espresso."
answer = " 60 "
options = ["30", "60", "90"]
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("cafe.toml")).unwrap();
        assert_eq!(bank.id, "cafe");
        assert_eq!(bank.name, "Cafe Recipes");
        assert_eq!(bank.items.len(), 2);
        assert_eq!(bank.items[0].attribute.as_deref(), Some("milk"));
        assert_eq!(bank.items[1].answer, "60");
        assert_eq!(bank.items[1].options, vec!["30", "60", "90"]);
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[bank]
id = "minimal"
name = "Minimal"

[[items]]
id = "one"
category = "tea"
item_name = "Chai"
template = "Chai needs [NUM] g of spice."
answer = "5"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(bank.description.is_empty());
        assert!(bank.items[0].attribute.is_none());
        assert!(bank.items[0].unit.is_none());
        assert!(bank.items[0].options.is_empty());
        assert!(!bank.items[0].mastered);
    }

    #[test]
    fn validate_flags_authoring_mistakes() {
        let toml = r#"
[bank]
id = "bad"
name = "Bad"

[[items]]
id = "same"
category = "tea"
item_name = "Chai"
template = "Chai needs some spice."
answer = "5"

[[items]]
id = "same"
category = "tea"
item_name = "Chai"
template = "Chai needs [NUM] of sugar."
answer = "a pinch"
options = ["none", "lots"]

[[items]]
id = "empty"
category = "tea"
item_name = "Chai"
template = "[NUM]"
answer = ""
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("bad.toml")).unwrap();
        let warnings = validate_bank(&bank);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate item ID"));
        assert!(has("no [NUM] placeholder"));
        assert!(has("do not include the answer"));
        assert!(has("not numeric"));
        assert!(has("answer is empty"));
    }

    #[test]
    fn validate_empty_bank() {
        let bank = parse_bank_str("[bank]\nid = \"e\"\nname = \"E\"\n", &PathBuf::from("e.toml"))
            .unwrap();
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].item_id.is_none());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cafe.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "cafe");

        let single = load_banks(&dir.path().join("cafe.toml")).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].source.as_deref(), Some(dir.path().join("cafe.toml").as_path()));
    }

    #[test]
    fn mark_mastered_edits_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cafe.toml");
        std::fs::write(&path, format!("# house recipes\n{VALID_TOML}")).unwrap();

        assert!(mark_mastered(&path, "latte-m-shot").unwrap());
        assert!(!mark_mastered(&path, "nope").unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# house recipes"));
        let bank = parse_bank(&path).unwrap();
        assert!(!bank.items[0].mastered);
        assert!(bank.items[1].mastered);
    }
}
