pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to open {path:?}.")]
	Open { path: std::path::PathBuf, source: std::io::Error },
	#[error(transparent)]
	Csv(#[from] csv::Error),
	#[error("Could not match the {needed:?} columns in {path:?} (headers: {headers:?}).")]
	MissingColumns { path: std::path::PathBuf, needed: &'static str, headers: Vec<String> },
}
