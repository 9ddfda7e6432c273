use cvmatch_config::{Config, validate};

fn base_toml() -> String {
	r#"
[runner]
cv_dir = "data/cvs"
jd_dir = "data/jds"
output_dir = "outputs"
log_level = "info"

[providers.short]
provider_id = "local"
api_base = "http://localhost:8080/"
api_key = "key"
path = "/v1/embeddings"
model = "all-MiniLM-L6-v2"
dimensions = 384
timeout_ms = 30000

[providers.long]
provider_id = "local"
api_base = "http://localhost:8080"
api_key = "key"
path = "/v1/embeddings"
model = "all-mpnet-base-v2"
dimensions = 768
timeout_ms = 30000
"#
	.to_string()
}

fn parse(raw: &str) -> Config {
	toml::from_str(raw).expect("config parse failed")
}

#[test]
fn accepts_minimal_config_with_scoring_defaults() {
	let cfg = parse(&base_toml());

	assert!(validate(&cfg).is_ok());
	assert_eq!(cfg.scoring.cache_capacity, 512);

	let total: f32 = cfg.scoring.weights.values().sum();

	assert!((total - 1.0).abs() < 1e-6);
	assert_eq!(cfg.scoring.weights["experience_responsibilities"], 0.35);
}

#[test]
fn rejects_wrong_short_dimensions() {
	let raw = base_toml().replace("dimensions = 384", "dimensions = 512");
	let cfg = parse(&raw);

	assert!(validate(&cfg).is_err());
}

#[test]
fn rejects_empty_api_key() {
	let raw = base_toml().replace("api_key = \"key\"", "api_key = \" \"");
	let cfg = parse(&raw);

	assert!(validate(&cfg).is_err());
}

#[test]
fn rejects_out_of_range_weight() {
	let raw = format!("{}\n[scoring]\nweights = {{ skills_skills = 1.5 }}\n", base_toml());
	let cfg = parse(&raw);

	assert!(validate(&cfg).is_err());
}

#[test]
fn rejects_undersized_cache() {
	let raw = format!("{}\n[scoring]\ncache_capacity = 10\n", base_toml());
	let cfg = parse(&raw);

	assert!(validate(&cfg).is_err());
}
