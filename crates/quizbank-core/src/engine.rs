//! Distractor engine facade.
//!
//! The quiz-serving layer hands the engine a correct answer and an already
//! materialized pool, and gets back display strings. The engine holds no
//! state between calls; randomness is always injected by the caller.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::answer::{Answer, AnswerPool};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::filler::synthesize_filler;
use crate::finalize::finalize;
use crate::nearest::select_nearest;
use crate::symmetric::generate_symmetric;

/// Which distractor heuristic to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Nearest pool answers plus rounded fillers; fixed count, shuffled.
    #[default]
    First,
    /// Step-based range around the answer; variable count, ascending.
    Second,
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::First => write!(f, "first"),
            Generation::Second => write!(f, "second"),
        }
    }
}

impl FromStr for Generation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "first" | "v1" => Ok(Generation::First),
            "2" | "second" | "v2" => Ok(Generation::Second),
            other => Err(format!("unknown generation: {other}")),
        }
    }
}

/// The distractor engine.
#[derive(Debug, Clone, Default)]
pub struct DistractorEngine {
    config: EngineConfig,
}

impl DistractorEngine {
    /// Create an engine, rejecting configs that could break termination.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// First generation: exactly `option_count` distinct options, shuffled,
    /// with the correct answer present once.
    pub fn first_generation<R: Rng + ?Sized>(
        &self,
        correct: &Answer,
        pool: &AnswerPool,
        rng: &mut R,
    ) -> Vec<String> {
        let config = &self.config;
        let neighbors = select_nearest(correct, pool, config.max_candidates, config.epsilon);
        let options = finalize(correct, &neighbors, config, rng, |existing, rng| {
            synthesize_filler(correct, existing, config, rng)
        });
        tracing::debug!(
            correct = correct.text(),
            neighbors = neighbors.len(),
            ?options,
            "first-generation options"
        );
        options
    }

    /// Second generation: predefined options verbatim, otherwise a
    /// step-based ascending range (or the label alone).
    pub fn second_generation<R: Rng + ?Sized>(
        &self,
        correct: &Answer,
        predefined: Option<&[String]>,
        rng: &mut R,
    ) -> Vec<String> {
        let options = generate_symmetric(correct, predefined, &self.config, rng);
        tracing::debug!(
            correct = correct.text(),
            predefined = predefined.is_some_and(|p| !p.is_empty()),
            ?options,
            "second-generation options"
        );
        options
    }

    /// Run the requested generation. The pool is ignored by the second
    /// generation and `predefined` by the first.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        generation: Generation,
        correct: &Answer,
        pool: &AnswerPool,
        predefined: Option<&[String]>,
        rng: &mut R,
    ) -> Vec<String> {
        match generation {
            Generation::First => self.first_generation(correct, pool, rng),
            Generation::Second => self.second_generation(correct, predefined, rng),
        }
    }
}
