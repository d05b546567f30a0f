//! Word-level Markov chain text library.
//!
//! This crate provides everything needed to learn from text and babble back:
//! - Tokenization with sentence boundary tracking
//! - An incrementally mergeable, weighted successor graph
//! - A stable JSON encoding so callers can store graphs as opaque blobs
//! - Sentence generation by bounded random walk
//!
//! Callers that only move bytes around should use [`build_or_merge`] and
//! [`generate`]; the [`model`] module exposes the pieces for finer control.

/// Core Markov chain model and generation logic.
pub mod model;

/// Error types.
pub mod error;

/// I/O utilities (corpus loading, path helpers).
pub mod io;

mod api;

pub use api::{build_or_merge, generate, generate_with};
pub use error::{DecodeError, EncodeError, Error, GenerationError};
