//! # Span Aligner
//!
//! Align character-level subject and object spans from relation extraction data with the tokens
//! produced by a subword tokenizer.
#![forbid(unsafe_code)]

/// Pipelines
pub mod pipelines;

/// Tokenizer adapters
pub mod tokenization;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// Logging macros
#[macro_use]
extern crate log;
