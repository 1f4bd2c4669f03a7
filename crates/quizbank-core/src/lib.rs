//! quizbank-core: Distractor engine and question bank model.
//!
//! This crate turns a correct answer plus a pool of other known answers
//! into a multiple-choice option list, and defines the question bank the
//! quiz front ends serve from.

pub mod answer;
pub mod bank;
pub mod config;
pub mod engine;
pub mod error;
pub mod filler;
pub mod finalize;
pub mod nearest;
pub mod parser;
pub mod symmetric;

pub use answer::{Answer, AnswerPool};
pub use engine::{DistractorEngine, Generation};
