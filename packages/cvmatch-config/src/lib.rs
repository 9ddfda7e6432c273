mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EmbeddingProviderConfig, Providers, Runner, Scoring};

use std::{fs, path::Path};

/// Vector widths the two encoder endpoints must produce. The engine's
/// encoder kinds are fixed to these dimensions; the config check keeps a
/// misconfigured endpoint from surfacing later as a scoring error.
pub const SHORT_DIMENSIONS: u32 = 384;
pub const LONG_DIMENSIONS: u32 = 768;

/// Smallest permitted memoization table; below this, repeated batch runs
/// re-embed the same sections constantly.
pub const MIN_CACHE_CAPACITY: usize = 100;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.runner.log_level.trim().is_empty() {
		return Err(Error::Validation { message: "runner.log_level must be non-empty.".to_string() });
	}

	for (label, provider, dimensions) in [
		("short", &cfg.providers.short, SHORT_DIMENSIONS),
		("long", &cfg.providers.long, LONG_DIMENSIONS),
	] {
		if provider.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if provider.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
		if provider.dimensions != dimensions {
			return Err(Error::Validation {
				message: format!("Provider {label} dimensions must be {dimensions}."),
			});
		}
	}

	for (key, weight) in &cfg.scoring.weights {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("scoring.weights.{key} must be a finite number."),
			});
		}
		if !(0.0..=1.0).contains(weight) {
			return Err(Error::Validation {
				message: format!("scoring.weights.{key} must be in the range 0.0-1.0."),
			});
		}
	}

	if cfg.scoring.cache_capacity < MIN_CACHE_CAPACITY {
		return Err(Error::Validation {
			message: format!("scoring.cache_capacity must be at least {MIN_CACHE_CAPACITY}."),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for provider in [&mut cfg.providers.short, &mut cfg.providers.long] {
		while provider.api_base.ends_with('/') {
			provider.api_base.pop();
		}
	}
}
