//! Error types.
//!
//! The distractor engine itself never fails. These errors cover invalid
//! engine configuration and lookups against a question bank.

use thiserror::Error;

/// Errors from validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Fewer than two options would not be a multiple-choice question.
    #[error("option count must be at least 2, got {0}")]
    OptionCountTooSmall(usize),

    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("filler offset catalog is empty")]
    EmptyOffsetCatalog,

    #[error("fallback catalog is empty")]
    EmptyFallbackCatalog,

    /// The label catalog must be able to fill every distractor slot on its own.
    #[error("label catalog needs at least {required} entries but has {available}")]
    LabelCatalogTooSmall { required: usize, available: usize },

    #[error("filler attempt budget must be at least 1")]
    ZeroAttemptBudget,

    #[error("invalid {name} spread range {min}..={max}")]
    InvalidSpread { name: &'static str, min: u32, max: u32 },
}

/// Errors from question bank lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("unknown item id: {0}")]
    UnknownItem(String),

    #[error("no items match the requested filter")]
    NoMatchingItems,
}
