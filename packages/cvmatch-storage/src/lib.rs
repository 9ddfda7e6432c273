mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::ComparisonRecord;

use std::{
	fs,
	path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

/// Persists one extracted document as `{dir}/{stem}.json`.
pub fn write_document<T>(dir: &Path, stem: &str, document: &T) -> Result<PathBuf>
where
	T: Serialize,
{
	fs::create_dir_all(dir).map_err(|err| Error::Io { path: dir.to_path_buf(), source: err })?;

	let path = dir.join(format!("{stem}.json"));
	let raw = serde_json::to_vec_pretty(document)
		.map_err(|err| Error::Encode { label: "document", message: err.to_string() })?;

	fs::write(&path, raw).map_err(|err| Error::Io { path: path.clone(), source: err })?;

	Ok(path)
}

pub fn read_document<T>(path: &Path) -> Result<T>
where
	T: DeserializeOwned,
{
	let raw =
		fs::read_to_string(path).map_err(|err| Error::Io { path: path.to_path_buf(), source: err })?;

	serde_json::from_str(&raw)
		.map_err(|err| Error::Decode { path: path.to_path_buf(), message: err.to_string() })
}

/// Persists one comparison as `{dir}/{cv_name}_vs_{jd_name}.json`.
pub fn write_comparison(dir: &Path, record: &ComparisonRecord) -> Result<PathBuf> {
	fs::create_dir_all(dir).map_err(|err| Error::Io { path: dir.to_path_buf(), source: err })?;

	let path = dir.join(format!("{}_vs_{}.json", record.cv_name, record.jd_name));
	let raw = serde_json::to_vec_pretty(record)
		.map_err(|err| Error::Encode { label: "comparison", message: err.to_string() })?;

	fs::write(&path, raw).map_err(|err| Error::Io { path: path.clone(), source: err })?;

	Ok(path)
}

/// Scans the persisted comparisons for one CV and returns the highest
/// scoring one. Files that fail to parse are skipped with a warning, not
/// an error; a batch directory accumulates artifacts from many runs.
pub fn best_match_for(dir: &Path, cv_name: &str) -> Result<Option<ComparisonRecord>> {
	let entries =
		fs::read_dir(dir).map_err(|err| Error::Io { path: dir.to_path_buf(), source: err })?;
	let prefix = format!("{cv_name}_vs_");
	let mut best: Option<ComparisonRecord> = None;

	for entry in entries {
		let entry = entry.map_err(|err| Error::Io { path: dir.to_path_buf(), source: err })?;
		let path = entry.path();
		let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
			continue;
		};

		if !file_name.starts_with(&prefix) || !file_name.ends_with(".json") {
			continue;
		}

		let record: ComparisonRecord = match read_document(&path) {
			Ok(record) => record,
			Err(err) => {
				tracing::warn!(path = %path.display(), error = %err, "Skipping unreadable comparison file.");

				continue;
			},
		};

		if best.as_ref().map(|current| record.total_score > current.total_score).unwrap_or(true) {
			best = Some(record);
		}
	}

	Ok(best)
}
