pub mod embedding;
pub mod qdrant;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin};

use serde_json::{Map, Value};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One candidate from the similarity-search backend. `distance` follows the
/// backend's convention: lower means more similar to the query.
#[derive(Debug, Clone)]
pub struct SearchHit {
	pub id: String,
	pub document: String,
	pub payload: Map<String, Value>,
	pub distance: f32,
}

/// Boundary to the similarity-search backend. The orchestrators only ever
/// see ranked hits with metadata; the backend is a black box with no retry
/// semantics of its own.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn query<'a>(
		&'a self,
		collection: &'a str,
		text: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<SearchHit>>>;

	fn get_all<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<SearchHit>>>;
}
