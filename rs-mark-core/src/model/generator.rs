use rand::Rng;
use rand::rngs::ThreadRng;

use super::generation_config::GenerationConfig;
use super::graph::{Graph, SENTENCE_START};
use crate::error::GenerationError;

/// Random walk over a [`Graph`] producing one sentence per call.
///
/// The walk starts at `__start__` and stops on the first word known to close
/// a sentence (any successor of `__end__`).
///
/// # Step selection
/// At each step a value `r` is drawn uniformly in `[0, 1)` and every successor
/// whose own weight is greater than `r` becomes a candidate; one candidate is
/// then picked uniformly. When no successor qualifies, `r` is drawn again.
/// This is not a cumulative-distribution sample: several successors can
/// qualify at once and heavier edges qualify more often.
///
/// # Bounds
/// - a step gives up after `max_retries` draws
/// - a sentence gives up after `max_words` words, if set
///
/// The generator owns its random source, so concurrent callers never share
/// random state. `ThreadRng` is used unless another source is supplied.
#[derive(Debug)]
pub struct SentenceGenerator<R = ThreadRng> {
	rng: R,
	config: GenerationConfig,
}

impl SentenceGenerator<ThreadRng> {
	/// Creates a generator backed by the thread-local random source.
	pub fn new(config: GenerationConfig) -> Self {
		Self::with_rng(rand::rng(), config)
	}
}

impl Default for SentenceGenerator<ThreadRng> {
	fn default() -> Self {
		Self::new(GenerationConfig::default())
	}
}

impl<R: Rng> SentenceGenerator<R> {
	/// Creates a generator drawing from `rng` (ex. a seeded `StdRng`).
	pub fn with_rng(rng: R, config: GenerationConfig) -> Self {
		Self { rng, config }
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Walks the graph from `__start__` until a sentence-ending word is reached.
	///
	/// Returns the visited words joined by single spaces.
	///
	/// # Errors
	/// - [`GenerationError::DeadEnd`] if a visited word has no successor
	///   (an empty graph fails on `__start__`)
	/// - [`GenerationError::RetriesExhausted`] if a step runs out of draws
	/// - [`GenerationError::TooManyWords`] if the length cap is hit first
	pub fn generate(&mut self, graph: &Graph) -> Result<String, GenerationError> {
		let mut sentence: Vec<&str> = Vec::new();
		let mut current: &str = SENTENCE_START;

		loop {
			let next = self.next_word(graph, current)?;
			sentence.push(next);

			if graph.is_sentence_end(next) {
				break;
			}
			if let Some(limit) = self.config.max_words() {
				if sentence.len() >= limit {
					return Err(GenerationError::TooManyWords { limit });
				}
			}
			current = next;
		}

		Ok(sentence.join(" "))
	}

	/// Picks the successor of `word` with the accept/reject draw.
	fn next_word<'g>(&mut self, graph: &'g Graph, word: &str) -> Result<&'g str, GenerationError> {
		let successors = match graph.successors(word) {
			Some(successors) if !successors.is_empty() => successors,
			_ => return Err(GenerationError::DeadEnd { word: word.to_owned() }),
		};

		let mut candidates: Vec<&'g str> = Vec::with_capacity(successors.len());
		for _ in 0..self.config.max_retries() {
			let r: f64 = self.rng.random();
			candidates.clear();
			candidates.extend(
				successors
					.iter()
					.filter(|(_, edge)| edge.weight() > r)
					.map(|(next_word, _)| next_word.as_str()),
			);

			if !candidates.is_empty() {
				let idx = self.rng.random_range(0..candidates.len());
				return Ok(candidates[idx]);
			}
		}

		Err(GenerationError::RetriesExhausted {
			word: word.to_owned(),
			retries: self.config.max_retries(),
		})
	}
}
