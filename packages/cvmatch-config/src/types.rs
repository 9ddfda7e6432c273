use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub runner: Runner,
	pub providers: Providers,
	#[serde(default)]
	pub scoring: Scoring,
}

#[derive(Debug, Deserialize)]
pub struct Runner {
	pub cv_dir: PathBuf,
	pub jd_dir: PathBuf,
	pub output_dir: PathBuf,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub short: EmbeddingProviderConfig,
	pub long: EmbeddingProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Scoring {
	/// Weight per mapped-pair key; pairs absent from the table score with
	/// the engine's default weight.
	#[serde(default = "default_weights")]
	pub weights: HashMap<String, f32>,
	#[serde(default = "default_cache_capacity")]
	pub cache_capacity: usize,
}

impl Default for Scoring {
	fn default() -> Self {
		Self { weights: default_weights(), cache_capacity: default_cache_capacity() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

pub(crate) fn default_weights() -> HashMap<String, f32> {
	HashMap::from([
		("profile_description".to_string(), 0.15),
		("experience_responsibilities".to_string(), 0.35),
		("education_education".to_string(), 0.20),
		("skills_skills".to_string(), 0.30),
	])
}

fn default_cache_capacity() -> usize {
	512
}
