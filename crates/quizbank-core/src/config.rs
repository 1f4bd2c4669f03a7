//! Engine configuration and config file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::answer::DEFAULT_EPSILON;
use crate::engine::Generation;
use crate::error::ConfigError;

/// An inclusive range of step counts for the second-generation spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub min: u32,
    pub max: u32,
}

impl Spread {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Tunables for the distractor engine.
///
/// Defaults reproduce the quiz tool's behaviour: four shuffled options,
/// offsets of -20..30 around the nearest ten, a coarse 50..200 fallback and
/// a 2-4 below / 3-5 above step spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Options shown by the first generation, correct answer included.
    pub option_count: usize,
    /// How many nearest pool answers to admit.
    pub max_candidates: usize,
    /// Numeric options closer than this count as equal.
    pub epsilon: f64,
    /// Offsets added to the correct value's nearest ten.
    pub offset_catalog: Vec<i64>,
    /// Round numbers used when offsets keep colliding.
    pub fallback_catalog: Vec<i64>,
    /// Fillers for non-numeric answers.
    pub label_catalog: Vec<String>,
    /// Random draws before the filler falls back.
    pub filler_attempts: u32,
    /// Steps below the correct value in the second generation.
    pub below: Spread,
    /// Steps above the correct value in the second generation.
    pub above: Spread,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            option_count: 4,
            max_candidates: 4,
            epsilon: DEFAULT_EPSILON,
            offset_catalog: vec![-20, -10, 10, 20, 30],
            fallback_catalog: vec![50, 100, 150, 200],
            label_catalog: ["10", "20", "30", "trace amount", "small amount"]
                .into_iter()
                .map(String::from)
                .collect(),
            filler_attempts: 8,
            below: Spread::new(2, 4),
            above: Spread::new(3, 5),
        }
    }
}

impl EngineConfig {
    /// Check the invariants the engine relies on to terminate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_count < 2 {
            return Err(ConfigError::OptionCountTooSmall(self.option_count));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ConfigError::InvalidEpsilon(self.epsilon));
        }
        if self.offset_catalog.is_empty() {
            return Err(ConfigError::EmptyOffsetCatalog);
        }
        if self.fallback_catalog.is_empty() {
            return Err(ConfigError::EmptyFallbackCatalog);
        }
        let required = self.option_count - 1;
        if self.label_catalog.len() < required {
            return Err(ConfigError::LabelCatalogTooSmall {
                required,
                available: self.label_catalog.len(),
            });
        }
        if self.filler_attempts == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        for (name, spread) in [("below", self.below), ("above", self.above)] {
            if spread.min > spread.max {
                return Err(ConfigError::InvalidSpread {
                    name,
                    min: spread.min,
                    max: spread.max,
                });
            }
        }
        Ok(())
    }
}

/// Top-level quizbank configuration (`quizbank.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizbankConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Generation used when the CLI is not told otherwise.
    #[serde(default)]
    pub default_generation: Generation,
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
pub fn load_config() -> Result<QuizbankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizbankConfig::default(),
    };

    Ok(config)
}

/// Parse and validate a config document.
pub fn parse_config_str(content: &str) -> Result<QuizbankConfig> {
    let config: QuizbankConfig = toml::from_str(content)?;
    config.engine.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}
