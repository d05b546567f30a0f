use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::edge::Edge;
use super::token::{tokenize, Token};

/// Source word whose successors are the words that open a sentence.
pub const SENTENCE_START: &str = "__start__";

/// Source word whose successors are the words that close a sentence.
pub const SENTENCE_END: &str = "__end__";

/// Weighted successor graph over words (first-order Markov chain).
///
/// Maps a source word to its successors, each successor carrying an [`Edge`]
/// with the observed count and the derived weight. Two sentinel sources wire
/// sentence boundaries in:
/// - [`SENTENCE_START`] points to every word seen opening a sentence
/// - [`SENTENCE_END`] points to every word seen closing a sentence
///
/// ## Responsibilities
/// - Accumulate transitions from token sequences (fresh or incremental)
/// - Recompute weights from counts
/// - Merge with another graph
///
/// ## Invariants
/// - After [`Graph::normalize`], the weights leaving any source sum to 1.0
/// - Counts are only ever added to, never reset
///
/// Maps are ordered so that the serialized form and seeded walks are reproducible.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Graph {
	words: BTreeMap<String, BTreeMap<String, Edge>>,
}

impl Graph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a normalized graph from raw text.
	pub fn from_text(text: &str) -> Self {
		let mut graph = Self::new();
		graph.add_text(text);
		graph
	}

	/// Adds a token sequence to `existing` (or to a fresh graph) and returns it.
	///
	/// Weights are left untouched; call [`Graph::normalize`] once all batches
	/// have been added.
	pub fn build(tokens: &[Token], existing: Option<Graph>) -> Self {
		let mut graph = existing.unwrap_or_default();
		graph.add_tokens(tokens);
		graph
	}

	/// Tokenizes `text`, adds it to the graph and renormalizes.
	pub fn add_text(&mut self, text: &str) {
		let tokens = tokenize(text);
		self.add_tokens(&tokens);
		self.normalize();
		debug!(tokens = tokens.len(), sources = self.len(), edges = self.edge_count(), "text added to graph");
	}

	/// Accumulates the transitions of a token sequence.
	///
	/// For each token:
	/// - a sentence opener adds `__start__ -> token`
	/// - a sentence closer adds `__end__ -> token`
	/// - any token but the last adds `token -> next token`
	///
	/// The three cases are independent: a closing word still links to the
	/// word opening the next sentence.
	pub fn add_tokens(&mut self, tokens: &[Token]) {
		for (idx, token) in tokens.iter().enumerate() {
			if token.starts_sentence {
				self.add_transition(SENTENCE_START, &token.word);
			}
			if token.ends_sentence {
				self.add_transition(SENTENCE_END, &token.word);
			}
			if let Some(next) = tokens.get(idx + 1) {
				self.add_transition(&token.word, &next.word);
			}
		}
	}

	/// Records one occurrence of `word -> next_word`.
	fn add_transition(&mut self, word: &str, next_word: &str) {
		self.words
			.entry(word.to_owned())
			.or_default()
			.entry(next_word.to_owned())
			.or_default()
			.increment();
	}

	/// Recomputes every weight as `count / total count of the source`.
	///
	/// Idempotent. Sources without successors are left as they are.
	pub fn normalize(&mut self) {
		for successors in self.words.values_mut() {
			let total = successors.values().map(Edge::count).fold(0u64, u64::saturating_add);
			if total == 0 {
				continue;
			}
			for edge in successors.values_mut() {
				let weight = edge.count() as f64 / total as f64;
				edge.set_weight(weight);
			}
		}
	}

	/// Merges another graph into this one.
	///
	/// Counts of shared transitions are summed, missing ones are copied,
	/// then weights are recomputed.
	pub fn merge(&mut self, other: &Self) {
		for (word, successors) in &other.words {
			let own = self.words.entry(word.clone()).or_default();
			for (next_word, edge) in successors {
				own.entry(next_word.clone()).or_default().absorb(edge);
			}
		}
		self.normalize();
	}

	/// Returns the successors of `word`, if it has ever been a source.
	pub fn successors(&self, word: &str) -> Option<&BTreeMap<String, Edge>> {
		self.words.get(word)
	}

	/// Returns the edge `word -> next_word`.
	pub fn edge(&self, word: &str, next_word: &str) -> Option<&Edge> {
		self.words.get(word)?.get(next_word)
	}

	/// Returns `true` if `word` has been seen closing a sentence.
	pub fn is_sentence_end(&self, word: &str) -> bool {
		self.words.get(SENTENCE_END).is_some_and(|enders| enders.contains_key(word))
	}

	/// Iterates over `(source word, successors)` pairs in word order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Edge>)> {
		self.words.iter().map(|(word, successors)| (word.as_str(), successors))
	}

	/// Number of source words (sentinels included).
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Total number of distinct transitions.
	pub fn edge_count(&self) -> usize {
		self.words.values().map(BTreeMap::len).sum()
	}
}

impl fmt::Display for Graph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (word, successors) in &self.words {
			writeln!(f, "{word}")?;
			for (next_word, edge) in successors {
				writeln!(f, "\t{next_word} {} {}", edge.count(), edge.weight())?;
			}
		}
		Ok(())
	}
}
