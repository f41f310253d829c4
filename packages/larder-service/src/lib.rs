pub mod inventory;
pub mod owner;
pub mod patron;

use std::sync::{Arc, PoisonError, RwLock};

use larder_config::Config;
use larder_domain::{InventorySnapshot, Thresholds};
use larder_search::SearchBackend;

pub use inventory::ReloadReport;
pub use owner::{InventoryResult, OwnerSearchRequest, OwnerSearchResponse};
pub use patron::{MenuResult, PatronSearchRequest, PatronSearchResponse};

/// Composes the inventory engine with the similarity-search backend.
///
/// Every orchestration is fail-soft: a missing data file or an unreachable
/// backend degrades to an empty result plus a log entry, never an error to
/// the caller. The snapshot is the only shared mutable slot; readers clone
/// the `Arc` and work against one consistent snapshot per request, while a
/// reload builds the replacement in full before swapping it in.
pub struct LarderService {
	pub cfg: Config,
	pub search: Arc<dyn SearchBackend>,
	thresholds: Thresholds,
	inventory: RwLock<Arc<InventorySnapshot>>,
}
impl LarderService {
	pub fn new(cfg: Config, search: Arc<dyn SearchBackend>) -> Self {
		let thresholds = inventory::load_thresholds(&cfg);
		let (snapshot, _) = inventory::build_snapshot(&cfg, &thresholds);

		Self { cfg, search, thresholds, inventory: RwLock::new(Arc::new(snapshot)) }
	}

	pub fn snapshot(&self) -> Arc<InventorySnapshot> {
		let guard = self.inventory.read().unwrap_or_else(PoisonError::into_inner);

		Arc::clone(&guard)
	}

	pub fn thresholds(&self) -> &Thresholds {
		&self.thresholds
	}

	pub(crate) fn swap_snapshot(&self, next: InventorySnapshot) {
		let mut guard = self.inventory.write().unwrap_or_else(PoisonError::into_inner);

		*guard = Arc::new(next);
	}
}
