use rand::Rng;
use tracing::{debug, warn};

use crate::error::Error;
use crate::model::codec::{deserialize, serialize};
use crate::model::generation_config::GenerationConfig;
use crate::model::generator::SentenceGenerator;
use crate::model::graph::Graph;
use crate::model::token::tokenize;

/// Learns `raw_text` on top of a stored graph and returns the new stored graph.
///
/// # Parameters
/// - `raw_text`: text to learn from (any content, never rejected)
/// - `existing`: previously returned bytes; `None` or empty bytes start fresh
///
/// # Errors
/// - [`Error::Decode`] if `existing` is present but malformed
/// - [`Error::Encode`] if the result cannot be written
pub fn build_or_merge(raw_text: &str, existing: Option<&[u8]>) -> Result<Vec<u8>, Error> {
	let existing = match existing {
		Some(bytes) => Some(deserialize(bytes)?),
		None => None,
	};

	let tokens = tokenize(raw_text);
	let mut graph = Graph::build(&tokens, existing);
	graph.normalize();
	debug!(tokens = tokens.len(), sources = graph.len(), edges = graph.edge_count(), "graph built");

	Ok(serialize(&graph)?)
}

/// Generates one sentence from stored graph bytes with default bounds.
///
/// # Errors
/// - [`Error::Decode`] if the bytes are malformed
/// - [`Error::Generation`] if the walk dead-ends or exceeds its bounds
///   (an empty graph always dead-ends)
pub fn generate(graph_bytes: &[u8]) -> Result<String, Error> {
	generate_with(graph_bytes, &mut SentenceGenerator::new(GenerationConfig::default()))
}

/// Same as [`generate`], using the given generator (custom bounds or random source).
pub fn generate_with<R: Rng>(graph_bytes: &[u8], generator: &mut SentenceGenerator<R>) -> Result<String, Error> {
	let graph = deserialize(graph_bytes)?;
	generator.generate(&graph).map_err(|e| {
		warn!(error = %e, "sentence generation failed");
		Error::from(e)
	})
}
