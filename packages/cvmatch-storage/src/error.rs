pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("I/O failure at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to encode {label}: {message}")]
	Encode { label: &'static str, message: String },
	#[error("Failed to decode {path:?}: {message}")]
	Decode { path: std::path::PathBuf, message: String },
}
