use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_mark_core::model::codec::deserialize;
use rs_mark_core::model::generation_config::GenerationConfig;
use rs_mark_core::model::generator::SentenceGenerator;
use rs_mark_core::{build_or_merge, generate, generate_with, Error, GenerationError};

const CORPUS: &str = "The quick fox jumps. The lazy dog sleeps!\nDoes the fox care? The dog does not.";

#[test]
fn stored_graph_grows_across_updates() {
	let mut stored: Option<Vec<u8>> = None;
	for batch in CORPUS.split('\n') {
		stored = Some(build_or_merge(batch, stored.as_deref()).unwrap());
	}
	let incremental = deserialize(stored.as_deref().unwrap_or_default()).unwrap();

	let once = deserialize(&build_or_merge("The quick fox jumps. The lazy dog sleeps!", None).unwrap()).unwrap();
	let first = once.edge("__start__", "the").map(|e| e.count()).unwrap_or_default();
	let total = incremental.edge("__start__", "the").map(|e| e.count()).unwrap_or_default();

	assert_eq!(first, 2);
	assert_eq!(total, 3);
	assert!(incremental.is_sentence_end("not."));
}

#[test]
fn generated_sentences_end_on_known_enders() {
	let bytes = build_or_merge(CORPUS, None).unwrap();
	let graph = deserialize(&bytes).unwrap();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(2024), GenerationConfig::default());

	for _ in 0..25 {
		let sentence = generate_with(&bytes, &mut generator).unwrap();
		let last = sentence.rsplit(' ').next().unwrap_or_default();
		assert!(graph.is_sentence_end(last), "'{sentence}' does not end a sentence");
	}
}

#[test]
fn empty_blob_cannot_generate() {
	let err = generate(b"").unwrap_err();
	assert!(matches!(err, Error::Generation(GenerationError::DeadEnd { ref word }) if word == "__start__"));
}

#[test]
fn word_cap_surfaces_as_generation_error() {
	// "a" loops on itself and never reaches the only ender before the cap.
	let bytes = br#"{"__start__":{"a":{"Count":1,"Weight":1.0}},"a":{"a":{"Count":4,"Weight":1.0}},"__end__":{"z":{"Count":1,"Weight":1.0}}}"#;
	let mut config = GenerationConfig::default();
	config.set_max_words(Some(3)).unwrap();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(5), config);

	let err = generate_with(bytes, &mut generator).unwrap_err();
	assert!(matches!(err, Error::Generation(GenerationError::TooManyWords { limit: 3 })));
}
