use serde::{Deserialize, Serialize};

/// A directed transition from one word to the next.
///
/// `count` is the number of times the transition was observed; `weight` is
/// the share of this transition among all transitions leaving the same word.
/// The weight is derived and only the owning graph recomputes it.
///
/// Field names on the wire are `Count` and `Weight`.
///
/// ## Invariants
/// - `count` never decreases (it saturates instead of wrapping)
/// - `weight` is in `[0, 1]`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Edge {
	#[serde(rename = "Count")]
	count: u64,
	#[serde(rename = "Weight")]
	weight: f64,
}

impl Edge {
	/// Number of observed transitions.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Probability of taking this transition from its source word.
	pub fn weight(&self) -> f64 {
		self.weight
	}

	/// Records one more observation. Saturates at `u64::MAX`.
	pub(crate) fn increment(&mut self) {
		self.count = self.count.saturating_add(1);
	}

	/// Adds the observations of another edge with the same endpoints.
	/// Saturates at `u64::MAX`.
	pub(crate) fn absorb(&mut self, other: &Self) {
		self.count = self.count.saturating_add(other.count);
	}

	pub(crate) fn set_weight(&mut self, weight: f64) {
		self.weight = weight;
	}
}
