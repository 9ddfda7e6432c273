pub mod compare;
pub mod embed;

mod error;

pub use compare::{Comparison, DEFAULT_PAIR_WEIGHT, compare, cosine_similarity};
pub use embed::Embedder;
pub use error::{Error, Result};

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex},
};

use reqwest::Client;

use cvmatch_config::{Config, EmbeddingProviderConfig};
use cvmatch_domain::{CvDocument, EncoderKind, JdDocument};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Embedding backend abstraction. The HTTP backend is the default; tests
/// substitute deterministic fakes.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		kind: EncoderKind,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, cvmatch_providers::Result<Vec<Vec<f32>>>>;
}

/// Default backend: one lazily-built reqwest client per encoder kind.
/// The mutex makes initialization at-most-once on success; concurrent
/// callers block instead of building duplicate clients.
struct HttpEmbedding {
	short_client: Mutex<Option<Client>>,
	long_client: Mutex<Option<Client>>,
}

impl HttpEmbedding {
	fn new() -> Self {
		Self { short_client: Mutex::new(None), long_client: Mutex::new(None) }
	}

	fn client(
		&self,
		kind: EncoderKind,
		cfg: &EmbeddingProviderConfig,
	) -> cvmatch_providers::Result<Client> {
		let cell = match kind {
			EncoderKind::Short => &self.short_client,
			EncoderKind::Long => &self.long_client,
		};
		let mut guard = cell.lock().unwrap_or_else(|err| err.into_inner());

		if let Some(client) = guard.as_ref() {
			return Ok(client.clone());
		}

		let client = cvmatch_providers::build_client(cfg)?;

		*guard = Some(client.clone());

		Ok(client)
	}
}

impl EmbeddingProvider for HttpEmbedding {
	fn embed<'a>(
		&'a self,
		kind: EncoderKind,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, cvmatch_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			let client = self.client(kind, cfg)?;

			cvmatch_providers::embedding::embed(&client, cfg, texts).await
		})
	}
}

/// Owns the configuration and the embedding front end; scoring operations
/// hang off this.
pub struct MatchService {
	pub cfg: Config,
	pub embedder: Embedder,
}

impl MatchService {
	pub fn new(cfg: Config) -> Self {
		Self::with_provider(cfg, Arc::new(HttpEmbedding::new()))
	}

	pub fn with_provider(cfg: Config, provider: Arc<dyn EmbeddingProvider>) -> Self {
		let embedder = Embedder::new(
			cfg.providers.short.clone(),
			cfg.providers.long.clone(),
			cfg.scoring.cache_capacity,
			provider,
		);

		Self { cfg, embedder }
	}

	pub async fn compare(&self, cv: &CvDocument, jd: &JdDocument) -> Result<Comparison> {
		compare::compare(&self.embedder, cv, jd, &self.cfg.scoring.weights).await
	}
}
