use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::Map;

use cvmatch_config::{Config, EmbeddingProviderConfig, Providers, Runner, Scoring};
use cvmatch_domain::{CvDocument, EncoderKind, JdDocument, MatchTier};
use cvmatch_service::{BoxFuture, EmbeddingProvider, MatchService};
use cvmatch_testkit::pseudo_embedding;

fn provider_config(model: &str, dimensions: u32) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		provider_id: "test".to_string(),
		api_base: "http://localhost".to_string(),
		api_key: "key".to_string(),
		path: "/v1/embeddings".to_string(),
		model: model.to_string(),
		dimensions,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	}
}

fn test_config() -> Config {
	Config {
		runner: Runner {
			cv_dir: "data/cvs".into(),
			jd_dir: "data/jds".into(),
			output_dir: "outputs".into(),
			log_level: "info".to_string(),
		},
		providers: Providers {
			short: provider_config("short-test", 384),
			long: provider_config("long-test", 768),
		},
		scoring: Scoring::default(),
	}
}

struct SpyEmbedding {
	calls: Arc<AtomicUsize>,
}

impl SpyEmbedding {
	fn new() -> Self {
		Self { calls: Arc::new(AtomicUsize::new(0)) }
	}
}

impl EmbeddingProvider for SpyEmbedding {
	fn embed<'a>(
		&'a self,
		_kind: EncoderKind,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, cvmatch_providers::Result<Vec<Vec<f32>>>> {
		self.calls.fetch_add(texts.len(), Ordering::SeqCst);

		let vectors: Vec<Vec<f32>> =
			texts.iter().map(|text| pseudo_embedding(text, cfg.dimensions as usize)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

struct FailingEmbedding;

impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_kind: EncoderKind,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, cvmatch_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			Err(cvmatch_providers::Error::InvalidResponse {
				message: "backend unavailable".to_string(),
			})
		})
	}
}

fn spy_service() -> (MatchService, Arc<AtomicUsize>) {
	let spy = SpyEmbedding::new();
	let calls = spy.calls.clone();

	(MatchService::with_provider(test_config(), Arc::new(spy)), calls)
}

fn sample_cv() -> CvDocument {
	CvDocument {
		profile: "software engineer with 5 years experience in python".to_string(),
		experience: "developed backend systems 2019-2023".to_string(),
		education: "ingeniería en sistemas".to_string(),
		skills: "python, docker, aws".to_string(),
	}
}

fn sample_jd() -> JdDocument {
	JdDocument {
		description: "looking for software engineer".to_string(),
		responsibilities: "develop backend systems".to_string(),
		education: "ingeniería requerida".to_string(),
		skills: "python, aws, kubernetes".to_string(),
	}
}

const PAIR_KEYS: [&str; 4] =
	["profile_description", "experience_responsibilities", "education_education", "skills_skills"];

#[tokio::test]
async fn empty_text_embeds_to_a_zero_vector_without_backend_calls() {
	let (service, calls) = spy_service();

	let short = service.embedder.embed("", EncoderKind::Short).await.unwrap();
	let long = service.embedder.embed("   \n\t", EncoderKind::Long).await.unwrap();

	assert_eq!(short.len(), 384);
	assert_eq!(long.len(), 768);
	assert!(short.iter().all(|v| *v == 0.0));
	assert!(long.iter().all(|v| *v == 0.0));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn identical_inputs_are_served_from_the_cache() {
	let (service, calls) = spy_service();

	let first = service.embedder.embed("rust developer", EncoderKind::Short).await.unwrap();
	let second = service.embedder.embed("rust developer", EncoderKind::Short).await.unwrap();

	assert_eq!(first, second);
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	// Same text under the other encoder is a distinct cache entry.
	let long = service.embedder.embed("rust developer", EncoderKind::Long).await.unwrap();

	assert_eq!(long.len(), 768);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn backend_failure_propagates_instead_of_scoring_zero() {
	let service = MatchService::with_provider(test_config(), Arc::new(FailingEmbedding));

	assert!(service.embedder.embed("anything", EncoderKind::Short).await.is_err());
	assert!(service.compare(&sample_cv(), &sample_jd()).await.is_err());
}

#[tokio::test]
async fn related_documents_outscore_unrelated_replacements() {
	let (service, _) = spy_service();
	let cv = sample_cv();
	let jd = sample_jd();
	let baseline = service.compare(&cv, &jd).await.unwrap();

	for key in PAIR_KEYS {
		assert!(baseline.section_scores[key] > 0.0, "pair {key} scored zero");
	}

	let unrelated = "pastry chef bakery recipes".to_string();

	for key in PAIR_KEYS {
		let mut altered = jd.clone();

		match key {
			"profile_description" => altered.description = unrelated.clone(),
			"experience_responsibilities" => altered.responsibilities = unrelated.clone(),
			"education_education" => altered.education = unrelated.clone(),
			_ => altered.skills = unrelated.clone(),
		}

		let result = service.compare(&cv, &altered).await.unwrap();

		assert!(
			result.section_scores[key] < baseline.section_scores[key],
			"replacing {key} with unrelated text did not lower its score",
		);
	}
}

#[tokio::test]
async fn comparison_is_deterministic_and_reproducible_by_hand() {
	let (service, _) = spy_service();
	let cv = sample_cv();
	let jd = sample_jd();
	let first = service.compare(&cv, &jd).await.unwrap();
	let second = service.compare(&cv, &jd).await.unwrap();

	assert_eq!(first.total_score, second.total_score);
	assert_eq!(first.section_scores, second.section_scores);

	// The total must be exactly the weighted sum, accumulated in mapping
	// order with the configured weights.
	let weights = &service.cfg.scoring.weights;
	let mut expected = 0.0_f32;

	for key in PAIR_KEYS {
		expected += first.section_scores[key] * weights[key];
	}

	assert_eq!(first.total_score, expected);
}

#[tokio::test]
async fn absent_weights_default_to_a_quarter() {
	let mut cfg = test_config();

	cfg.scoring = Scoring { weights: HashMap::new(), cache_capacity: 512 };

	let service = MatchService::with_provider(cfg, Arc::new(SpyEmbedding::new()));
	let result = service.compare(&sample_cv(), &sample_jd()).await.unwrap();
	let mut expected = 0.0_f32;

	for key in PAIR_KEYS {
		expected += result.section_scores[key] * 0.25;
	}

	assert_eq!(result.total_score, expected);
}

#[tokio::test]
async fn repeated_comparisons_reuse_cached_embeddings() {
	let (service, calls) = spy_service();
	let cv = sample_cv();
	let jd = sample_jd();

	service.compare(&cv, &jd).await.unwrap();

	let after_first = calls.load(Ordering::SeqCst);

	assert_eq!(after_first, 8);

	service.compare(&cv, &jd).await.unwrap();

	assert_eq!(calls.load(Ordering::SeqCst), after_first);
}

#[tokio::test]
async fn empty_sections_score_zero_and_classify_very_low() {
	let (service, _) = spy_service();
	let result = service.compare(&CvDocument::default(), &sample_jd()).await.unwrap();

	for key in PAIR_KEYS {
		assert_eq!(result.section_scores[key], 0.0);
	}

	assert_eq!(result.total_score, 0.0);
	assert_eq!(MatchTier::classify(result.total_score), MatchTier::VeryLow);
}
