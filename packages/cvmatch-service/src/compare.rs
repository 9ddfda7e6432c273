use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use cvmatch_domain::{CvDocument, JdDocument, MAPPED_PAIRS};

use crate::{Embedder, Result};

/// Weight applied to a mapped pair with no entry in the weight table.
pub const DEFAULT_PAIR_WEIGHT: f32 = 0.25;

/// Per-pair cosine scores and their weighted sum. Created once per
/// (CV, JD) comparison and never mutated afterwards; the total is the raw
/// weighted sum, not renormalized by the weight mass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comparison {
	pub section_scores: BTreeMap<String, f32>,
	pub total_score: f32,
}

/// Scores one CV against one JD across the fixed section mapping. Both
/// sides of a pair embed with the pair's encoder kind; empty sections
/// contribute exactly 0.
pub async fn compare(
	embedder: &Embedder,
	cv: &CvDocument,
	jd: &JdDocument,
	weights: &HashMap<String, f32>,
) -> Result<Comparison> {
	let mut section_scores = BTreeMap::new();
	let mut total_score = 0.0_f32;

	for pair in MAPPED_PAIRS {
		let cv_text = cv.field(pair.cv).unwrap_or_default();
		let jd_text = jd.field(pair.jd).unwrap_or_default();
		let cv_vector = embedder.embed(cv_text, pair.encoder).await?;
		let jd_vector = embedder.embed(jd_text, pair.encoder).await?;
		let score = cosine_similarity(&cv_vector, &jd_vector);
		let key = pair.key();
		let weight = weights.get(&key).copied().unwrap_or(DEFAULT_PAIR_WEIGHT);

		total_score += score * weight;

		section_scores.insert(key, score);
	}

	Ok(Comparison { section_scores, total_score })
}

/// Cosine similarity clamped into [0, 1]. An all-zero vector on either
/// side means "nothing to compare" and scores exactly 0 without touching
/// the division; negative raw cosine floors to 0 since section texts are
/// never treated as semantically opposite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	if a.iter().all(|v| *v == 0.0) || b.iter().all(|v| *v == 0.0) {
		return 0.0;
	}

	let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
	let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();

	(dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}
