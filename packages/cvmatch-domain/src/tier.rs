use serde::{Deserialize, Serialize};

/// Discrete classification of a total weighted score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
	High,
	Medium,
	Low,
	VeryLow,
}

impl MatchTier {
	/// Pure thresholding; each tier is inclusive on its lower edge.
	pub fn classify(total_score: f32) -> Self {
		if total_score >= 0.70 {
			Self::High
		} else if total_score >= 0.50 {
			Self::Medium
		} else if total_score >= 0.30 {
			Self::Low
		} else {
			Self::VeryLow
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::High => "high",
			Self::Medium => "medium",
			Self::Low => "low",
			Self::VeryLow => "very_low",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tier_boundaries_are_inclusive_on_the_lower_edge() {
		assert_eq!(MatchTier::classify(0.70), MatchTier::High);
		assert_eq!(MatchTier::classify(0.6999), MatchTier::Medium);
		assert_eq!(MatchTier::classify(0.50), MatchTier::Medium);
		assert_eq!(MatchTier::classify(0.4999), MatchTier::Low);
		assert_eq!(MatchTier::classify(0.30), MatchTier::Low);
		assert_eq!(MatchTier::classify(0.0), MatchTier::VeryLow);
	}

	#[test]
	fn serializes_as_snake_case() {
		let json = serde_json::to_string(&MatchTier::VeryLow).unwrap();

		assert_eq!(json, "\"very_low\"");
	}
}
