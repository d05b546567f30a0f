use thiserror::Error;

/// Failure to read a serialized graph.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The bytes are not a valid `source -> destination -> edge` map.
	#[error("malformed graph: {0}")]
	Malformed(#[from] serde_json::Error),

	/// An edge weight is not a probability.
	#[error("invalid weight {weight} on edge '{word}' -> '{next_word}'")]
	InvalidWeight {
		word: String,
		next_word: String,
		weight: f64,
	},
}

/// Failure to write a graph.
#[derive(Debug, Error)]
#[error("failed to encode graph: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Failure during a random walk.
#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
	/// The walk reached a word with no outgoing edge.
	#[error("dead end: '{word}' has no outgoing edge")]
	DeadEnd { word: String },

	/// No edge of `word` beat the random draw within the allowed number of draws.
	#[error("no successor of '{word}' accepted after {retries} draws")]
	RetriesExhausted { word: String, retries: usize },

	/// The sentence grew past the configured word limit.
	#[error("sentence exceeded {limit} words")]
	TooManyWords { limit: usize },
}

/// Error returned by the top-level entry points.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Decode(#[from] DecodeError),

	#[error(transparent)]
	Encode(#[from] EncodeError),

	#[error(transparent)]
	Generation(#[from] GenerationError),
}
