//! Question bank data model.
//!
//! A bank is a flat list of quiz items. Each item states one numeric (or
//! textual) fact through a sentence template with a `[NUM]` placeholder,
//! e.g. "A medium latte needs [NUM] ml of milk.".

use std::collections::BTreeSet;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::answer::{Answer, AnswerPool};
use crate::engine::{DistractorEngine, Generation};
use crate::error::BankError;

/// Placeholder in a template that marks where the answer goes.
pub const ANSWER_PLACEHOLDER: &str = "[NUM]";

/// What a learner sees in place of the answer.
pub const ANSWER_BLANK: &str = "____";

/// A single fact in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    /// Unique identifier.
    pub id: String,
    /// Grouping, e.g. "coffee".
    pub category: String,
    /// The item the fact is about, e.g. "Latte (M)".
    pub item_name: String,
    /// The measured attribute, e.g. "milk". Shared across items.
    #[serde(default)]
    pub attribute: Option<String>,
    /// Sentence with a `[NUM]` placeholder.
    pub template: String,
    /// The correct answer as authored.
    pub answer: String,
    #[serde(default)]
    pub unit: Option<String>,
    /// Author-curated options, used verbatim by the second generation.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether the learner has already answered this item correctly.
    #[serde(default)]
    pub mastered: bool,
}

impl QuizItem {
    /// The question text with the answer blanked out.
    pub fn prompt(&self) -> String {
        self.template.replace(ANSWER_PLACEHOLDER, ANSWER_BLANK)
    }

    pub fn correct_answer(&self) -> Answer {
        Answer::parse(&self.answer)
    }
}

/// A named collection of quiz items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<QuizItem>,
    /// The file the bank was loaded from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Whether to quiz everything or only items not yet mastered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    #[default]
    All,
    Missed,
}

/// Narrows which items a question may be drawn from.
///
/// `None` or the literal `"all"` leaves a field unrestricted.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub item_name: Option<String>,
    pub mode: QuizMode,
}

impl QuestionFilter {
    pub fn matches(&self, item: &QuizItem) -> bool {
        let field_matches = |wanted: &Option<String>, actual: &str| match wanted.as_deref() {
            None | Some("all") => true,
            Some(wanted) => wanted == actual,
        };
        field_matches(&self.category, &item.category)
            && field_matches(&self.item_name, &item.item_name)
            && (self.mode == QuizMode::All || !item.mastered)
    }
}

impl QuestionBank {
    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.items.iter().map(|i| i.category.as_str()).collect();
        set.into_iter().collect()
    }

    /// Distinct item names, sorted.
    pub fn item_names(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.items.iter().map(|i| i.item_name.as_str()).collect();
        set.into_iter().collect()
    }

    pub fn get(&self, id: &str) -> Result<&QuizItem, BankError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| BankError::UnknownItem(id.to_string()))
    }

    /// Items matching `filter`, in bank order.
    pub fn candidates<'a>(
        &'a self,
        filter: &'a QuestionFilter,
    ) -> impl Iterator<Item = &'a QuizItem> {
        self.items.iter().filter(move |item| filter.matches(item))
    }

    /// Pick one matching item uniformly at random.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        filter: &QuestionFilter,
        rng: &mut R,
    ) -> Result<&QuizItem, BankError> {
        let candidates: Vec<&QuizItem> = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .collect();
        candidates
            .choose(rng)
            .copied()
            .ok_or(BankError::NoMatchingItems)
    }

    /// The answers distractors may be drawn from, excluding `item` itself.
    ///
    /// The first generation compares within a category. The second compares
    /// the same attribute across all items, or the category when the item
    /// names no attribute. Rows are excluded by content, so an item from
    /// another bank that only shares the id still contributes its answer.
    pub fn pool_for(&self, item: &QuizItem, generation: Generation) -> AnswerPool {
        let same_domain = |other: &QuizItem| match (generation, &item.attribute) {
            (Generation::Second, Some(attribute)) => {
                other.attribute.as_deref() == Some(attribute.as_str())
            }
            _ => other.category == item.category,
        };
        self.items
            .iter()
            .filter(|other| *other != item && same_domain(other))
            .map(|other| other.answer.as_str())
            .collect()
    }
}

/// A question ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub item_id: String,
    pub prompt: String,
    pub unit: Option<String>,
    pub generation: Generation,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// Answers are checked by exact string match against the authored answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

/// Build the question for `item`, generating its options with `engine`.
pub fn serve<R: Rng + ?Sized>(
    bank: &QuestionBank,
    item: &QuizItem,
    engine: &DistractorEngine,
    generation: Generation,
    rng: &mut R,
) -> Question {
    let correct = item.correct_answer();
    let pool = bank.pool_for(item, generation);
    let predefined = (!item.options.is_empty()).then_some(item.options.as_slice());
    let options = engine.generate(generation, &correct, &pool, predefined, rng);

    Question {
        item_id: item.id.clone(),
        prompt: item.prompt(),
        unit: item.unit.clone(),
        generation,
        options,
        correct_answer: item.answer.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str, category: &str, name: &str, attribute: &str, answer: &str) -> QuizItem {
        QuizItem {
            id: id.into(),
            category: category.into(),
            item_name: name.into(),
            attribute: Some(attribute.into()),
            template: format!("{name} needs [NUM] ml of {attribute}."),
            answer: answer.into(),
            unit: Some("ml".into()),
            options: vec![],
            mastered: false,
        }
    }

    fn sample_bank() -> QuestionBank {
        let mut mastered = item("mocha-syrup", "coffee", "Mocha", "syrup", "20");
        mastered.mastered = true;
        QuestionBank {
            id: "cafe".into(),
            name: "Cafe".into(),
            description: String::new(),
            items: vec![
                item("latte-milk", "coffee", "Latte", "milk", "240"),
                item("latte-shot", "coffee", "Latte", "espresso", "60"),
                mastered,
                item("matcha-milk", "tea", "Matcha latte", "milk", "200"),
                item("chai-milk", "tea", "Chai", "milk", "180"),
            ],
            source: None,
        }
    }

    #[test]
    fn prompt_blanks_every_placeholder() {
        let mut it = item("a", "c", "X", "y", "1");
        it.template = "[NUM] in, [NUM] out".into();
        assert_eq!(it.prompt(), "____ in, ____ out");
    }

    #[test]
    fn distinct_categories_and_items() {
        let bank = sample_bank();
        assert_eq!(bank.categories(), vec!["coffee", "tea"]);
        assert_eq!(bank.item_names(), vec!["Chai", "Latte", "Matcha latte", "Mocha"]);
    }

    #[test]
    fn filter_by_category_item_and_mode() {
        let bank = sample_bank();
        let filter = QuestionFilter {
            category: Some("coffee".into()),
            item_name: Some("all".into()),
            mode: QuizMode::Missed,
        };
        let ids: Vec<&str> = bank.candidates(&filter).map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["latte-milk", "latte-shot"]);

        let filter = QuestionFilter {
            item_name: Some("Chai".into()),
            ..QuestionFilter::default()
        };
        let ids: Vec<&str> = bank.candidates(&filter).map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["chai-milk"]);
    }

    #[test]
    fn pick_reports_empty_selection() {
        let bank = sample_bank();
        let filter = QuestionFilter {
            category: Some("juice".into()),
            ..QuestionFilter::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(bank.pick(&filter, &mut rng), Err(BankError::NoMatchingItems));
        assert!(bank.pick(&QuestionFilter::default(), &mut rng).is_ok());
    }

    #[test]
    fn get_unknown_item() {
        let bank = sample_bank();
        assert_eq!(bank.get("latte-milk").unwrap().answer, "240");
        assert!(matches!(bank.get("nope"), Err(BankError::UnknownItem(_))));
    }

    #[test]
    fn pools_exclude_own_row() {
        let bank = sample_bank();
        let latte = bank.get("latte-milk").unwrap();

        let first_pool = bank.pool_for(latte, Generation::First);
        let first: Vec<&str> = first_pool
            .iter()
            .map(Answer::text)
            .collect();
        assert_eq!(first, vec!["60", "20"]);

        let second_pool = bank.pool_for(latte, Generation::Second);
        let second: Vec<&str> = second_pool
            .iter()
            .map(Answer::text)
            .collect();
        assert_eq!(second, vec!["200", "180"]);
    }

    #[test]
    fn pools_keep_other_rows_sharing_an_id() {
        let mut bank = sample_bank();
        // Same id as latte-milk, merged in from another bank.
        bank.items.push(item("latte-milk", "coffee", "Latte (L)", "milk", "300"));
        let latte = bank.get("latte-milk").unwrap();

        let first_pool = bank.pool_for(latte, Generation::First);
        let first: Vec<&str> = first_pool
            .iter()
            .map(Answer::text)
            .collect();
        assert_eq!(first, vec!["60", "20", "300"]);
    }

    #[test]
    fn serve_builds_a_checkable_question() {
        let bank = sample_bank();
        let engine = DistractorEngine::default();
        let latte = bank.get("latte-milk").unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let question = serve(&bank, latte, &engine, Generation::First, &mut rng);
        assert_eq!(question.prompt, "Latte needs ____ ml of milk.");
        assert_eq!(question.options.len(), 4);
        assert!(question.options.contains(&"240".to_string()));
        assert!(question.is_correct("240"));
        assert!(!question.is_correct("240.0"));
    }

    #[test]
    fn serve_uses_predefined_options_in_second_generation() {
        let mut bank = sample_bank();
        bank.items[0].options = vec!["200".into(), "240".into(), "300".into()];
        let engine = DistractorEngine::default();
        let latte = bank.items[0].clone();
        let mut rng = StdRng::seed_from_u64(1);

        let question = serve(&bank, &latte, &engine, Generation::Second, &mut rng);
        assert_eq!(question.options, vec!["200", "240", "300"]);

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["generation"], "second");
        assert_eq!(json["correct_answer"], "240");
    }
}
