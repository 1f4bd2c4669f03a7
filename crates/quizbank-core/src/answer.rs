//! Answer values and answer pools.
//!
//! Answers are stored as text, but most of them are numbers. The numeric vs
//! label decision is made once when an [`Answer`] is built, so the distractor
//! heuristics never re-parse strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Two numeric options closer than this are considered the same option.
pub const DEFAULT_EPSILON: f64 = 0.1;

/// A single answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Answer {
    /// Text that parses as a finite number. The original text is kept for display.
    Numeric { value: f64, text: String },
    /// Anything else, e.g. "trace amount".
    Label { text: String },
}

impl Answer {
    /// Classify `text` as numeric or label.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Answer::Numeric {
                value,
                text: trimmed.to_string(),
            },
            _ => Answer::Label {
                text: trimmed.to_string(),
            },
        }
    }

    /// The display text of this answer.
    pub fn text(&self) -> &str {
        match self {
            Answer::Numeric { text, .. } | Answer::Label { text } => text,
        }
    }

    /// The numeric value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Answer::Numeric { value, .. } => Some(*value),
            Answer::Label { .. } => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Answer::Numeric { .. })
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Answer::parse(text)
    }
}

/// The other known answers of a domain, in the order the caller supplied them.
///
/// May contain duplicate values. The engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerPool {
    answers: Vec<Answer>,
}

impl AnswerPool {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self { answers }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AnswerPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().map(|s| Answer::parse(s.as_ref())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AnswerPool {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

/// Format a synthesized number for display.
///
/// Whole values print without a decimal point (`30`), fractional values use
/// the shortest representation (`0.5`). Values are first rounded to six
/// decimals so float stepping noise never leaks into the output.
pub fn format_number(value: f64) -> String {
    // Whole values skip the rescale, which would overflow for huge magnitudes.
    let rounded = if value.fract() == 0.0 {
        value
    } else {
        (value * 1e6).round() / 1e6
    };
    // -0.0 prints as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 && rounded.abs() < i64::MAX as f64 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Round to the nearest multiple of ten, ties to even (25 -> 20, 35 -> 40).
pub fn nearest_multiple_of_ten(value: f64) -> f64 {
    (value / 10.0).round_ties_even() * 10.0
}
