use std::sync::Arc;

use larder_search::{SearchBackend, qdrant::QdrantSearch};
use larder_service::LarderService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<LarderService>,
}
impl AppState {
	pub fn new(config: larder_config::Config) -> color_eyre::Result<Self> {
		let search =
			QdrantSearch::new(&config.storage.qdrant, config.providers.embedding.clone())?;

		Ok(Self::with_backend(config, Arc::new(search)))
	}

	/// Seam for tests and alternative backends.
	pub fn with_backend(config: larder_config::Config, search: Arc<dyn SearchBackend>) -> Self {
		Self { service: Arc::new(LarderService::new(config, search)) }
	}
}
