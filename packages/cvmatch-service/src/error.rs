pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Cache error: {message}")]
	Cache { message: String },
}

impl From<cvmatch_providers::Error> for Error {
	fn from(err: cvmatch_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
