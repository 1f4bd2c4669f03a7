//! Option set assembly for the first generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::answer::Answer;
use crate::config::EngineConfig;
use crate::filler;
use crate::nearest::Neighbor;

/// An insertion-ordered set of display strings.
///
/// Rejects exact string duplicates, and numeric entries within `epsilon` of
/// an existing numeric entry. Labels only collide on exact text.
#[derive(Debug, Clone)]
pub struct OptionSet {
    entries: Vec<(String, Option<f64>)>,
    epsilon: f64,
}

impl OptionSet {
    pub fn new(epsilon: f64) -> Self {
        Self {
            entries: Vec::new(),
            epsilon,
        }
    }

    /// Whether `text` could be inserted.
    pub fn admits(&self, text: &str) -> bool {
        let value = Answer::parse(text).value();
        !self.entries.iter().any(|(existing, existing_value)| {
            existing == text
                || matches!(
                    (value, existing_value),
                    (Some(a), Some(b)) if (a - b).abs() <= self.epsilon
                )
        })
    }

    /// Insert `text` if admitted. Returns whether it was inserted.
    pub fn insert(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !self.admits(&text) {
            return false;
        }
        let value = Answer::parse(&text).value();
        self.entries.push((text, value));
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(text, _)| text.as_str())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries.into_iter().map(|(text, _)| text).collect()
    }
}

/// Assemble the final shuffled option list.
///
/// The correct answer goes in first, then each neighbor and its rounded
/// confuser, then `filler` output until `option_count` entries exist. The
/// surplus is trimmed from the distractors only, so the correct answer is
/// always present exactly once.
pub fn finalize<R, F>(
    correct: &Answer,
    neighbors: &[Neighbor],
    config: &EngineConfig,
    rng: &mut R,
    mut filler_fn: F,
) -> Vec<String>
where
    R: Rng + ?Sized,
    F: FnMut(&OptionSet, &mut R) -> String,
{
    let mut set = OptionSet::new(config.epsilon);
    set.insert(correct.text());

    for neighbor in neighbors {
        set.insert(neighbor.text.as_str());
        if let Some(rounded) = &neighbor.rounded {
            set.insert(rounded.as_str());
        }
    }

    while set.len() < config.option_count {
        let candidate = filler_fn(&set, rng);
        if !set.insert(candidate) {
            let escape = filler::escape(correct, &set, config);
            tracing::debug!(%escape, "filler collided, using escape value");
            set.insert(escape);
        }
    }

    let mut distractors = set.into_vec().split_off(1);
    distractors.shuffle(rng);
    distractors.truncate(config.option_count.saturating_sub(1));

    let mut options = distractors;
    options.push(correct.text().to_string());
    options.shuffle(rng);
    options
}
