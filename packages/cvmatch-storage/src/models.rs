use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One persisted CV/JD comparison, named after both documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
	pub cv_name: String,
	pub jd_name: String,
	pub scores: BTreeMap<String, f32>,
	pub total_score: f32,
}
