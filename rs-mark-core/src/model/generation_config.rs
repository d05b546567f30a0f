use serde::Deserialize;

/// Default number of draws allowed for a single step of the walk.
pub const DEFAULT_MAX_RETRIES: usize = 100_000;

fn default_max_retries() -> usize {
	DEFAULT_MAX_RETRIES
}

/// Bounds applied to a sentence generation.
///
/// # Responsibilities
/// - `max_retries`: how many random draws one step may take before giving up
/// - `max_words`: optional cap on the sentence length (`None` = unbounded)
///
/// # Invariants
/// - `max_retries` is always > 0
/// - `max_words`, when set, is always > 0
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct GenerationConfig {
	#[serde(default = "default_max_retries")]
	max_retries: usize,

	#[serde(default)]
	max_words: Option<usize>,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			max_retries: DEFAULT_MAX_RETRIES,
			max_words: None,
		}
	}
}

impl GenerationConfig {
	pub fn max_retries(&self) -> usize {
		self.max_retries
	}

	pub fn max_words(&self) -> Option<usize> {
		self.max_words
	}

	/// Sets the number of draws allowed per step.
	///
	/// # Errors
	/// Returns an error if `max_retries` is 0.
	pub fn set_max_retries(&mut self, max_retries: usize) -> Result<(), String> {
		if max_retries == 0 {
			return Err("max_retries must be > 0".to_owned());
		}
		self.max_retries = max_retries;
		Ok(())
	}

	/// Sets (or removes) the sentence length cap.
	///
	/// # Errors
	/// Returns an error if the cap is `Some(0)`.
	pub fn set_max_words(&mut self, max_words: Option<usize>) -> Result<(), String> {
		if max_words == Some(0) {
			return Err("max_words must be > 0".to_owned());
		}
		self.max_words = max_words;
		Ok(())
	}

	/// Checks values coming from deserialization.
	pub fn validate(&self) -> Result<(), String> {
		if self.max_retries == 0 {
			return Err("max_retries must be > 0".to_owned());
		}
		if self.max_words == Some(0) {
			return Err("max_words must be > 0".to_owned());
		}
		Ok(())
	}
}
