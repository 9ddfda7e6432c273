mod error;

pub use error::{Error, Result};

use std::{
	fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Deterministic stand-in for a sentence encoder: a hashed bag-of-tokens
/// projection. Texts sharing vocabulary land on shared components and
/// score a higher cosine than unrelated texts, which is all the scoring
/// tests need from an encoder.
pub fn pseudo_embedding(text: &str, dimensions: usize) -> Vec<f32> {
	let mut vector = vec![0.0_f32; dimensions];

	if dimensions == 0 {
		return vector;
	}

	for token in text.split(|ch: char| !ch.is_alphanumeric()).filter(|token| !token.is_empty()) {
		let digest = blake3::hash(token.as_bytes());

		for chunk in digest.as_bytes().chunks_exact(4).take(4) {
			let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

			vector[value as usize % dimensions] += 1.0;
		}
	}

	vector
}

/// Disposable uniquely-named directory under the system temp dir; removed
/// on drop.
pub struct ScratchDir {
	path: PathBuf,
}

impl ScratchDir {
	pub fn new(prefix: &str) -> Result<Self> {
		let path = std::env::temp_dir().join(format!("{prefix}-{}", Uuid::new_v4().simple()));

		fs::create_dir_all(&path)
			.map_err(|err| Error::Message(format!("Failed to create scratch dir: {err}.")))?;

		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for ScratchDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pseudo_embeddings_are_deterministic() {
		let a = pseudo_embedding("backend engineer", 384);
		let b = pseudo_embedding("backend engineer", 384);

		assert_eq!(a, b);
	}

	#[test]
	fn shared_vocabulary_shares_components() {
		let a = pseudo_embedding("backend engineer", 384);
		let b = pseudo_embedding("backend developer", 384);
		let dot: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();

		assert!(dot > 0.0);
	}

	#[test]
	fn tokenization_ignores_punctuation() {
		assert_eq!(pseudo_embedding("python, aws", 128), pseudo_embedding("python aws", 128));
	}

	#[test]
	fn scratch_dir_is_removed_on_drop() {
		let kept_path;

		{
			let scratch = ScratchDir::new("cvmatch-testkit").expect("scratch dir failed");

			kept_path = scratch.path().to_path_buf();

			assert!(kept_path.is_dir());
		}

		assert!(!kept_path.exists());
	}
}
