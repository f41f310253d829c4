use serde::{Deserialize, Serialize};

use crate::inventory::InventorySnapshot;

/// Shown when a rule carries no justification text of its own.
pub const FALLBACK_JUSTIFICATION: &str = "Better availability";

/// One (trigger ingredient -> suggested replacement) rule attached to a menu
/// item. Rules are evaluated in stored order; the order is part of the
/// contract. Field names match the serialized rule list in menu-item payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionRule {
	#[serde(default)]
	pub trigger_ingredient: String,
	#[serde(default)]
	pub suggest_item_name: String,
	#[serde(default)]
	pub suggest_item_id: Option<String>,
	#[serde(default)]
	pub rag_justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionSuggestion {
	pub original_item: String,
	pub suggested_item: String,
	pub reason: String,
}

/// Availability tier is the primary patron-facing sort key; the discriminant
/// order here is the ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
	#[serde(rename = "In Stock")]
	InStock,
	#[serde(rename = "Substituted")]
	Substituted,
	#[serde(rename = "Low Stock")]
	LowStock,
	#[serde(rename = "Out of Stock")]
	OutOfStock,
}
impl Availability {
	pub fn tier(self) -> u8 {
		match self {
			Self::InStock => 0,
			Self::Substituted => 1,
			Self::LowStock => 2,
			Self::OutOfStock => 3,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::InStock => "In Stock",
			Self::Substituted => "Substituted",
			Self::LowStock => "Low Stock",
			Self::OutOfStock => "Out of Stock",
		}
	}
}

/// A menu item as returned by the search backend, before and after stock
/// resolution. Per-query and transient.
#[derive(Debug, Clone)]
pub struct MenuCandidate {
	pub id: String,
	pub name: String,
	pub description: String,
	pub price: f64,
	pub score: f64,
	pub rules: Vec<SubstitutionRule>,
	pub substitution: Option<SubstitutionSuggestion>,
	pub availability: Availability,
}

/// Overlays live stock state onto a candidate.
///
/// Two passes, both in stored rule order. The first pass decides the worst
/// trigger status: an `Out` trigger wins immediately, a `Low` trigger is
/// remembered but a later `Out` still overrides it. Only then does the second
/// pass pick the first rule for the remembered trigger that names a
/// substitute and build a suggestion. Collapsing the passes would let an
/// early, milder substitution mask a worse problem found later.
pub fn resolve_substitution(
	mut candidate: MenuCandidate,
	inventory: &InventorySnapshot,
) -> MenuCandidate {
	let mut trigger_status = None;
	let mut active_trigger = None;

	for rule in &candidate.rules {
		let trigger = rule.trigger_ingredient.as_str();

		if inventory.is_out(trigger) {
			trigger_status = Some(Availability::OutOfStock);
			active_trigger = Some(trigger.to_string());

			break;
		} else if inventory.is_low(trigger) {
			trigger_status = Some(Availability::LowStock);
			active_trigger = Some(trigger.to_string());
		}
	}

	let (Some(trigger_status), Some(active_trigger)) = (trigger_status, active_trigger) else {
		return candidate;
	};

	// A rule only counts as a substitute if it actually names one. A trigger
	// with no viable rule leaves the raw status in place, which the patron
	// flow then filters out.
	let suggestion = candidate
		.rules
		.iter()
		.find(|rule| {
			rule.trigger_ingredient == active_trigger && !rule.suggest_item_name.trim().is_empty()
		})
		.map(|rule| SubstitutionSuggestion {
			original_item: candidate.name.clone(),
			suggested_item: rule.suggest_item_name.clone(),
			reason: rule
				.rag_justification
				.clone()
				.filter(|reason| !reason.trim().is_empty())
				.unwrap_or_else(|| FALLBACK_JUSTIFICATION.to_string()),
		});

	match suggestion {
		Some(suggestion) => {
			candidate.substitution = Some(suggestion);
			candidate.availability = Availability::Substituted;
		},
		None => candidate.availability = trigger_status,
	}

	candidate
}
