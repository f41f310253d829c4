use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use larder_domain::{StockStatus, classify};
use larder_search::SearchHit;

use crate::{LarderService, patron::MenuResult};

/// Score reported for full-listing rows, which have no query to be scored
/// against.
pub const FULL_LISTING_SCORE: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSearchRequest {
	pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResult {
	pub ingredient_name: String,
	pub category: String,
	pub current_quantity: f64,
	pub unit: String,
	pub score: f64,
	pub status: StockStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSearchResponse {
	pub results: Vec<InventoryResult>,
	pub patron_results: Vec<MenuResult>,
}

impl LarderService {
	/// Owner flow: backend order is kept as-is. Owners read raw relevance
	/// with stock status attached, deliberately unlike the patron flow's
	/// availability-first ranking.
	pub async fn owner_search(&self, req: OwnerSearchRequest) -> OwnerSearchResponse {
		let hits = match self
			.search
			.query(
				&self.cfg.storage.qdrant.inventory_collection,
				&req.query,
				self.cfg.inventory.search_top_k,
			)
			.await
		{
			Ok(hits) => hits,
			Err(err) => {
				warn!(error = %err, "Inventory search unavailable; returning no results.");

				return OwnerSearchResponse { results: Vec::new(), patron_results: Vec::new() };
			},
		};

		OwnerSearchResponse {
			results: self.project_inventory(&hits, None),
			patron_results: Vec::new(),
		}
	}

	/// Zero-state view: the whole tracked inventory, no query involved.
	pub async fn inventory_listing(&self) -> Vec<InventoryResult> {
		let hits =
			match self.search.get_all(&self.cfg.storage.qdrant.inventory_collection).await {
				Ok(hits) => hits,
				Err(err) => {
					warn!(error = %err, "Inventory listing unavailable; returning no results.");

					return Vec::new();
				},
			};

		self.project_inventory(&hits, Some(FULL_LISTING_SCORE))
	}

	/// The backend returns one hit per lot; keep the first per ingredient and
	/// attach the live aggregated quantity. The per-lot metadata quantity is
	/// only trusted for ingredients the snapshot does not track.
	fn project_inventory(
		&self,
		hits: &[SearchHit],
		score_override: Option<f64>,
	) -> Vec<InventoryResult> {
		let snapshot = self.snapshot();
		let mut seen = HashSet::new();
		let mut results = Vec::new();

		for hit in hits {
			let Some(name) = hit.payload.get("ingredient_name").and_then(Value::as_str) else {
				continue;
			};

			if !seen.insert(name.to_string()) {
				continue;
			}

			let metadata_quantity =
				hit.payload.get("current_quantity").and_then(Value::as_f64).unwrap_or(0.0);
			let (quantity, threshold) = match snapshot.get(name) {
				Some(state) => (state.quantity, state.threshold),
				None => (metadata_quantity, self.thresholds().resolve(name)),
			};

			results.push(InventoryResult {
				ingredient_name: name.to_string(),
				category: payload_or(hit, "category", "General"),
				current_quantity: quantity,
				unit: payload_or(hit, "unit", "units"),
				score: score_override.unwrap_or(hit.distance as f64),
				status: classify(quantity, threshold),
			});
		}

		results
	}
}

fn payload_or(hit: &SearchHit, key: &str, fallback: &str) -> String {
	hit.payload
		.get(key)
		.and_then(Value::as_str)
		.filter(|value| !value.trim().is_empty())
		.unwrap_or(fallback)
		.to_string()
}
