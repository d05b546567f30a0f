//! Top-level module for the word-level Markov chain.
//!
//! This module provides the whole text pipeline:
//! - Tokenization of raw text into case-folded words (`token`)
//! - The weighted successor graph and its builder/normalizer (`graph`, `edge`)
//! - JSON encoding of the graph for storage (`codec`)
//! - Sentence generation by weighted random walk (`generator`, `generation_config`)

/// Splits raw text into words and flags sentence boundaries.
pub mod token;

/// A single observed transition with its count and derived weight.
pub mod edge;

/// Successor graph with `__start__` / `__end__` sentinels.
///
/// Handles incremental building, weight normalization and merging.
pub mod graph;

/// Conversion of a graph to and from its stored JSON form.
pub mod codec;

/// Random walk producing sentences from a graph.
pub mod generator;

/// Retry and length bounds used by the generator.
pub mod generation_config;
