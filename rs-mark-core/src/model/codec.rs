use tracing::debug;

use super::graph::Graph;
use crate::error::{DecodeError, EncodeError};

/// Encodes a graph as JSON: `{"word": {"next": {"Count": n, "Weight": w}}}`.
///
/// The output is canonical: words and successors are sorted.
pub fn serialize(graph: &Graph) -> Result<Vec<u8>, EncodeError> {
	Ok(serde_json::to_vec(graph)?)
}

/// Decodes a graph produced by [`serialize`].
///
/// Empty (or blank) input means "no prior data" and yields an empty graph.
/// Weights are kept as stored, but must be finite and within `[0, 1]`.
///
/// # Errors
/// - [`DecodeError::Malformed`] if the input is not a graph map
/// - [`DecodeError::InvalidWeight`] if a stored weight is not a probability
pub fn deserialize(bytes: &[u8]) -> Result<Graph, DecodeError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Graph::new());
	}

	let graph: Graph = serde_json::from_slice(bytes)?;
	for (word, successors) in graph.iter() {
		for (next_word, edge) in successors {
			let weight = edge.weight();
			if !(0.0..=1.0).contains(&weight) {
				return Err(DecodeError::InvalidWeight {
					word: word.to_owned(),
					next_word: next_word.to_owned(),
					weight,
				});
			}
		}
	}

	debug!(sources = graph.len(), edges = graph.edge_count(), "graph decoded");
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::graph::{SENTENCE_END, SENTENCE_START};

	#[test]
	fn round_trip_preserves_graph() {
		let graph = Graph::from_text("The cat sat. The dog ran! Did the cat run?");
		let bytes = serialize(&graph).unwrap();
		assert_eq!(deserialize(&bytes).unwrap(), graph);
	}

	#[test]
	fn output_is_canonical() {
		let graph = Graph::from_text("b a.");
		let json = String::from_utf8(serialize(&graph).unwrap()).unwrap();
		assert_eq!(
			json,
			r#"{"__end__":{"a.":{"Count":1,"Weight":1.0}},"__start__":{"b":{"Count":1,"Weight":1.0}},"b":{"a.":{"Count":1,"Weight":1.0}}}"#
		);
	}

	#[test]
	fn empty_input_is_empty_graph() {
		assert!(deserialize(b"").unwrap().is_empty());
		assert!(deserialize(b"  \n").unwrap().is_empty());
		assert!(deserialize(b"{}").unwrap().is_empty());
	}

	#[test]
	fn reads_stored_layout() {
		let bytes = br#"{
			"__start__": {"hi": {"Count": 3, "Weight": 1}},
			"__end__": {"hi": {"Count": 3, "Weight": 1}}
		}"#;
		let graph = deserialize(bytes).unwrap();
		assert_eq!(graph.edge(SENTENCE_START, "hi").map(|e| e.count()), Some(3));
		assert!(graph.is_sentence_end("hi"));
		assert!(graph.edge(SENTENCE_END, "hi").is_some());
	}

	#[test]
	fn rejects_malformed_input() {
		assert!(matches!(deserialize(b"not json"), Err(DecodeError::Malformed(_))));
		assert!(matches!(deserialize(b"[1, 2]"), Err(DecodeError::Malformed(_))));
		assert!(matches!(
			deserialize(br#"{"a": {"b": {"Count": -1, "Weight": 0.5}}}"#),
			Err(DecodeError::Malformed(_))
		));
		assert!(matches!(deserialize(br#"{"a": {"b": {"Weight": 0.5}}}"#), Err(DecodeError::Malformed(_))));
	}

	#[test]
	fn rejects_out_of_range_weight() {
		let err = deserialize(br#"{"a": {"b": {"Count": 1, "Weight": 1.5}}}"#).unwrap_err();
		match err {
			DecodeError::InvalidWeight { word, next_word, weight } => {
				assert_eq!(word, "a");
				assert_eq!(next_word, "b");
				assert_eq!(weight, 1.5);
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn stored_max_count_saturates_on_update() {
		let stored = br#"{"__start__":{"x":{"Count":18446744073709551615,"Weight":1.0}}}"#;
		let updated = crate::build_or_merge("x", Some(&stored[..])).unwrap();
		let graph = deserialize(&updated).unwrap();

		let edge = graph.edge(SENTENCE_START, "x").unwrap();
		assert_eq!(edge.count(), u64::MAX);
		assert_eq!(edge.weight(), 1.0);
	}

	#[test]
	fn overflowing_totals_still_normalize() {
		let mut graph = deserialize(
			br#"{"a":{"b":{"Count":18446744073709551615,"Weight":1.0},"c":{"Count":1,"Weight":0.0}}}"#,
		)
		.unwrap();
		graph.normalize();

		assert_eq!(graph.edge("a", "b").map(|e| e.weight()), Some(1.0));
		let light = graph.edge("a", "c").map(|e| e.weight()).unwrap_or_default();
		assert!(light > 0.0 && light < 1e-12);

		let mut merged = graph.clone();
		merged.merge(&graph);
		assert_eq!(merged.edge("a", "b").map(|e| e.count()), Some(u64::MAX));
		assert_eq!(merged.edge("a", "c").map(|e| e.count()), Some(2));
	}
}
