/// Characters that close a sentence when they end a word.
const SENTENCE_ENDERS: [char; 3] = ['.', '!', '?'];

/// A single case-folded word of the input text.
///
/// Besides the word itself, a token remembers where it sits in the sentence
/// structure of the text it was read from:
/// - `starts_sentence`: first token of the text, or the token right after a sentence end
/// - `ends_sentence`: last token of the text, or a word ending with `.`, `!` or `?`
///
/// ## Invariants
/// - `word` is never empty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	pub word: String,
	pub starts_sentence: bool,
	pub ends_sentence: bool,
}

/// Returns `true` if `word` ends with a sentence terminator.
///
/// An empty word never ends a sentence.
pub fn is_end_of_sentence(word: &str) -> bool {
	word.chars().next_back().is_some_and(|c| SENTENCE_ENDERS.contains(&c))
}

/// Splits raw text into tokens.
///
/// # Behavior
/// - Newlines become single spaces, then the text is split on every space.
/// - Each segment is trimmed and lowercased; empty segments are dropped.
/// - Sentence flags are computed on the remaining tokens only, so the last
///   *non-empty* word always ends a sentence.
///
/// Never fails: empty or blank text yields an empty sequence.
pub fn tokenize(text: &str) -> Vec<Token> {
	let words: Vec<String> = text
		.replace('\n', " ")
		.split(' ')
		.map(|segment| segment.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect();

	let last = words.len().saturating_sub(1);
	let mut at_sentence_start = true;
	let mut tokens = Vec::with_capacity(words.len());

	for (idx, word) in words.into_iter().enumerate() {
		let ends_sentence = idx == last || is_end_of_sentence(&word);
		tokens.push(Token {
			starts_sentence: at_sentence_start,
			ends_sentence,
			word,
		});
		at_sentence_start = ends_sentence;
	}

	tokens
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(tokens: &[Token]) -> Vec<&str> {
		tokens.iter().map(|t| t.word.as_str()).collect()
	}

	#[test]
	fn splits_and_folds_case() {
		let tokens = tokenize("The cat sat. The dog ran!");
		assert_eq!(words(&tokens), ["the", "cat", "sat.", "the", "dog", "ran!"]);
	}

	#[test]
	fn flags_sentence_boundaries() {
		let tokens = tokenize("The cat sat. The dog ran!");
		let starts: Vec<bool> = tokens.iter().map(|t| t.starts_sentence).collect();
		let ends: Vec<bool> = tokens.iter().map(|t| t.ends_sentence).collect();
		assert_eq!(starts, [true, false, false, true, false, false]);
		assert_eq!(ends, [false, false, true, false, false, true]);
	}

	#[test]
	fn last_word_ends_sentence_without_punctuation() {
		let tokens = tokenize("no punctuation here");
		assert!(tokens[2].ends_sentence);
		assert!(!tokens[1].ends_sentence);
	}

	#[test]
	fn newlines_and_extra_spaces_are_ignored() {
		let tokens = tokenize("  Hello\nWorld   again \r\n ");
		assert_eq!(words(&tokens), ["hello", "world", "again"]);
		assert!(tokens[0].starts_sentence);
		assert!(tokens[2].ends_sentence);
	}

	#[test]
	fn question_mark_starts_next_sentence() {
		let tokens = tokenize("Why? Because");
		assert!(tokens[0].ends_sentence);
		assert!(tokens[1].starts_sentence);
		assert!(tokens[1].ends_sentence);
	}

	#[test]
	fn blank_text_has_no_tokens() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" \n  \n").is_empty());
	}

	#[test]
	fn single_word_both_starts_and_ends() {
		let tokens = tokenize("hi");
		assert_eq!(tokens, [Token { word: "hi".to_owned(), starts_sentence: true, ends_sentence: true }]);
	}

	#[test]
	fn end_of_sentence_detection() {
		assert!(is_end_of_sentence("done."));
		assert!(is_end_of_sentence("wow!"));
		assert!(is_end_of_sentence("really?"));
		assert!(!is_end_of_sentence("comma,"));
		assert!(!is_end_of_sentence(""));
	}
}
