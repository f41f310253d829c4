use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use larder_domain::{
	Availability, MenuCandidate, SubstitutionRule, SubstitutionSuggestion, rank,
	resolve_substitution,
};
use larder_search::SearchHit;

use crate::LarderService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatronSearchRequest {
	pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResult {
	pub id: String,
	pub name: String,
	pub description: String,
	pub price: f64,
	pub score: f64,
	pub substitution: Option<SubstitutionSuggestion>,
	pub availability_status: Availability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatronSearchResponse {
	pub results: Vec<MenuResult>,
}

impl LarderService {
	/// Patron flow: retrieve menu candidates, overlay live stock, drop
	/// anything unserviceable, rank the rest. Patrons never see an
	/// out-of-stock item, however relevant.
	pub async fn patron_search(&self, req: PatronSearchRequest) -> PatronSearchResponse {
		let hits = match self
			.search
			.query(
				&self.cfg.storage.qdrant.menu_collection,
				&req.query,
				self.cfg.inventory.search_top_k,
			)
			.await
		{
			Ok(hits) => hits,
			Err(err) => {
				warn!(error = %err, "Menu search unavailable; returning no results.");

				return PatronSearchResponse { results: Vec::new() };
			},
		};
		let snapshot = self.snapshot();
		let mut candidates: Vec<MenuCandidate> = hits
			.iter()
			.map(menu_candidate)
			.map(|candidate| resolve_substitution(candidate, &snapshot))
			.collect();

		candidates.retain(|candidate| candidate.availability != Availability::OutOfStock);
		rank(&mut candidates);

		PatronSearchResponse { results: candidates.into_iter().map(menu_result).collect() }
	}
}

fn menu_candidate(hit: &SearchHit) -> MenuCandidate {
	MenuCandidate {
		id: payload_str(hit, "item_id").unwrap_or_else(|| hit.id.clone()),
		name: payload_str(hit, "name").unwrap_or_default(),
		description: hit.document.clone(),
		price: hit.payload.get("price").and_then(Value::as_f64).unwrap_or(0.0),
		score: hit.distance as f64,
		rules: parse_rules(hit),
		substitution: None,
		availability: Availability::InStock,
	}
}

fn parse_rules(hit: &SearchHit) -> Vec<SubstitutionRule> {
	let Some(raw) = hit.payload.get("suggested_substitutions").and_then(Value::as_str) else {
		return Vec::new();
	};

	match serde_json::from_str(raw) {
		Ok(rules) => rules,
		Err(err) => {
			warn!(error = %err, item = hit.id, "Unreadable substitution rules; treating the item as rule-free.");

			Vec::new()
		},
	}
}

fn payload_str(hit: &SearchHit, key: &str) -> Option<String> {
	hit.payload.get(key).and_then(Value::as_str).map(str::to_string)
}

fn menu_result(candidate: MenuCandidate) -> MenuResult {
	MenuResult {
		id: candidate.id,
		name: candidate.name,
		description: candidate.description,
		price: candidate.price,
		score: candidate.score,
		substitution: candidate.substitution,
		availability_status: candidate.availability,
	}
}
