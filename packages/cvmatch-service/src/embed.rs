use std::{
	collections::HashMap,
	sync::{Arc, Mutex, MutexGuard},
};

use cvmatch_config::EmbeddingProviderConfig;
use cvmatch_domain::EncoderKind;

use crate::{EmbeddingProvider, Error, Result};

const EMBED_CACHE_SCHEMA_VERSION: i32 = 1;

/// Embedding front end: zero vectors for vacuous input, a bounded LRU
/// memo over (text, encoder kind), backend failures passed through as
/// hard errors.
pub struct Embedder {
	short: EmbeddingProviderConfig,
	long: EmbeddingProviderConfig,
	provider: Arc<dyn EmbeddingProvider>,
	cache: Mutex<EmbeddingCache>,
}

impl Embedder {
	pub fn new(
		short: EmbeddingProviderConfig,
		long: EmbeddingProviderConfig,
		cache_capacity: usize,
		provider: Arc<dyn EmbeddingProvider>,
	) -> Self {
		Self { short, long, provider, cache: Mutex::new(EmbeddingCache::new(cache_capacity)) }
	}

	pub fn provider_config(&self, kind: EncoderKind) -> &EmbeddingProviderConfig {
		match kind {
			EncoderKind::Short => &self.short,
			EncoderKind::Long => &self.long,
		}
	}

	/// Embeds one text with the kind's encoder. Empty or whitespace-only
	/// text is a zero vector of the kind's width and never reaches the
	/// backend; identical (text, kind) inputs are served from the memo
	/// table without a backend call.
	pub async fn embed(&self, text: &str, kind: EncoderKind) -> Result<Vec<f32>> {
		if text.trim().is_empty() {
			return Ok(vec![0.0; kind.dimensions()]);
		}

		let cfg = self.provider_config(kind);
		let key = cache_key(kind, &cfg.model, text)?;

		if let Some(vector) = self.lock_cache().get(&key) {
			return Ok(vector);
		}

		let texts = [text.to_string()];
		let mut vectors = self.provider.embed(kind, cfg, &texts).await?;

		if vectors.len() != 1 {
			return Err(Error::Provider {
				message: format!("Backend returned {} vectors for one input.", vectors.len()),
			});
		}

		let vector = vectors.remove(0);

		if vector.len() != kind.dimensions() {
			return Err(Error::Provider {
				message: format!(
					"Backend returned a {}-dimension vector for the {} encoder.",
					vector.len(),
					kind.as_str(),
				),
			});
		}

		self.lock_cache().insert(key, vector.clone());

		Ok(vector)
	}

	fn lock_cache(&self) -> MutexGuard<'_, EmbeddingCache> {
		self.cache.lock().unwrap_or_else(|err| err.into_inner())
	}
}

fn cache_key(kind: EncoderKind, model: &str, text: &str) -> Result<String> {
	let payload = serde_json::json!({
		"kind": "embedding",
		"schema_version": EMBED_CACHE_SCHEMA_VERSION,
		"encoder": kind.as_str(),
		"model": model,
		"text": text,
	});
	let raw = serde_json::to_vec(&payload).map_err(|err| Error::Cache {
		message: format!("Failed to encode cache key payload: {err}"),
	})?;

	Ok(blake3::hash(&raw).to_hex().to_string())
}

struct CacheEntry {
	vector: Vec<f32>,
	last_used: u64,
}

/// Capacity-bounded memo table. Recency is a monotonic tick; overflow
/// evicts the least-recently-used entry.
struct EmbeddingCache {
	capacity: usize,
	tick: u64,
	entries: HashMap<String, CacheEntry>,
}

impl EmbeddingCache {
	fn new(capacity: usize) -> Self {
		Self { capacity: capacity.max(1), tick: 0, entries: HashMap::new() }
	}

	fn get(&mut self, key: &str) -> Option<Vec<f32>> {
		self.tick += 1;

		let tick = self.tick;
		let entry = self.entries.get_mut(key)?;

		entry.last_used = tick;

		Some(entry.vector.clone())
	}

	fn insert(&mut self, key: String, vector: Vec<f32>) {
		self.tick += 1;

		if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
			self.evict_least_recent();
		}

		self.entries.insert(key, CacheEntry { vector, last_used: self.tick });
	}

	fn evict_least_recent(&mut self) {
		let Some(oldest) =
			self.entries.iter().min_by_key(|(_, entry)| entry.last_used).map(|(key, _)| key.clone())
		else {
			return;
		};

		self.entries.remove(&oldest);
	}
}
