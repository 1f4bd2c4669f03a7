//! Rounded-offset filler synthesis (first generation).
//!
//! When the pool cannot supply enough distractors, fillers are made up near
//! the correct value's nearest ten. Every call returns a value the current
//! option set admits, and every call terminates:
//!
//! 1. up to `filler_attempts` random offsets from the offset catalog,
//! 2. the coarse fallback catalog, walked in order,
//! 3. multiples of 50 above the fallback catalog until one is admitted.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::answer::{format_number, nearest_multiple_of_ten, Answer};
use crate::config::EngineConfig;
use crate::finalize::OptionSet;

/// Produce one more distractor that `existing` admits.
pub fn synthesize_filler<R: Rng + ?Sized>(
    correct: &Answer,
    existing: &OptionSet,
    config: &EngineConfig,
    rng: &mut R,
) -> String {
    match correct.value() {
        Some(target) => numeric_filler(target, existing, config, rng)
            .unwrap_or_else(|| escape(correct, existing, config)),
        None => label_filler(correct.text(), existing, config, rng)
            .unwrap_or_else(|| escape(correct, existing, config)),
    }
}

fn numeric_filler<R: Rng + ?Sized>(
    target: f64,
    existing: &OptionSet,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<String> {
    let base = nearest_multiple_of_ten(target);
    let is_valid =
        |value: f64, text: &str| (value - target).abs() > config.epsilon && existing.admits(text);

    for _ in 0..config.filler_attempts {
        let Some(offset) = config.offset_catalog.choose(rng) else {
            break;
        };
        let value = (base + *offset as f64).max(0.0);
        let text = format_number(value);
        if is_valid(value, &text) {
            return Some(text);
        }
    }

    tracing::debug!(
        target_value = target,
        attempts = config.filler_attempts,
        "offset fillers exhausted, walking fallback catalog"
    );

    config.fallback_catalog.iter().find_map(|&fallback| {
        let value = fallback as f64;
        let text = format_number(value);
        is_valid(value, &text).then_some(text)
    })
}

fn label_filler<R: Rng + ?Sized>(
    correct: &str,
    existing: &OptionSet,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<String> {
    let is_valid = |label: &str| label != correct && existing.admits(label);

    for _ in 0..config.filler_attempts {
        match config.label_catalog.choose(rng) {
            Some(label) if is_valid(label) => return Some(label.clone()),
            Some(_) => continue,
            None => break,
        }
    }

    tracing::debug!(correct, "label fillers exhausted, walking catalog");
    config
        .label_catalog
        .iter()
        .find(|label| is_valid(label))
        .cloned()
}

/// Deterministic last resort: the first multiple of 50 above the fallback
/// catalog that is admitted and differs from the correct value.
///
/// `existing` is finite, so the walk always ends.
pub fn escape(correct: &Answer, existing: &OptionSet, config: &EngineConfig) -> String {
    let ceiling = config.fallback_catalog.iter().copied().max().unwrap_or(0).max(0);
    let mut value = (ceiling / 50 + 1) * 50;
    loop {
        let text = format_number(value as f64);
        let clear_of_correct = correct
            .value()
            .map_or(true, |target| (value as f64 - target).abs() > config.epsilon);
        if clear_of_correct && existing.admits(&text) {
            tracing::debug!(%text, "using escape filler");
            return text;
        }
        value += 50;
    }
}
