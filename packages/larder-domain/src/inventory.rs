use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::threshold::Thresholds;

/// A discrete purchased batch of an ingredient. `expiration` is kept as the
/// raw cell text so the fail-open parse policy lives next to the aggregation
/// that applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct LotRecord {
	pub ingredient: String,
	pub quantity: f64,
	pub expiration: Option<String>,
	pub lot_id: Option<String>,
	pub category: Option<String>,
	pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
	High,
	Low,
	Out,
}
impl StockStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::High => "High",
			Self::Low => "Low",
			Self::Out => "Out",
		}
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientState {
	pub name: String,
	pub quantity: f64,
	pub threshold: f64,
	pub status: StockStatus,
	pub category: Option<String>,
	pub unit: Option<String>,
}

const US_DATE: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Dates that do not parse are treated as "not expired": spoiled stock is only
/// excluded when provably expired.
pub fn parse_expiration(raw: &str) -> Option<Date> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	Date::parse(trimmed, US_DATE).or_else(|_| Date::parse(trimmed, ISO_DATE)).ok()
}

/// Sums lot quantities per ingredient, excluding lots whose expiration date is
/// strictly before `as_of` (date-only comparison). An ingredient seen only
/// through expired lots keeps a 0.0 entry, so it stays tracked as out rather
/// than vanishing from the snapshot.
pub fn aggregate<'a, I>(lots: I, as_of: Date) -> HashMap<String, f64>
where
	I: IntoIterator<Item = &'a LotRecord>,
{
	let mut totals = HashMap::new();

	for lot in lots {
		let total = totals.entry(lot.ingredient.clone()).or_insert(0.0);

		if let Some(raw) = lot.expiration.as_deref()
			&& let Some(expires) = parse_expiration(raw)
			&& expires < as_of
		{
			continue;
		}

		*total += lot.quantity;
	}

	totals
}

pub fn classify(quantity: f64, threshold: f64) -> StockStatus {
	if quantity <= 0.0 {
		StockStatus::Out
	} else if quantity < threshold {
		StockStatus::Low
	} else {
		StockStatus::High
	}
}

/// Per-ingredient live state, rebuilt wholesale on each reload. The service
/// replaces the whole snapshot behind a single indirection; nothing mutates an
/// existing snapshot in place.
#[derive(Debug)]
pub struct InventorySnapshot {
	states: HashMap<String, IngredientState>,
	default_threshold: f64,
}
impl InventorySnapshot {
	pub fn empty(default_threshold: f64) -> Self {
		Self { states: HashMap::new(), default_threshold }
	}

	pub fn build(lots: &[LotRecord], thresholds: &Thresholds, as_of: Date) -> Self {
		let totals = aggregate(lots, as_of);
		let mut states = HashMap::with_capacity(totals.len());

		for (name, quantity) in totals {
			let threshold = thresholds.resolve(&name);
			let status = classify(quantity, threshold);

			states.insert(
				name.clone(),
				IngredientState { name, quantity, threshold, status, category: None, unit: None },
			);
		}

		// First-seen category/unit per ingredient, from the lot rows.
		for lot in lots {
			let Some(state) = states.get_mut(&lot.ingredient) else {
				continue;
			};

			if state.category.is_none() {
				state.category = lot.category.clone();
			}
			if state.unit.is_none() {
				state.unit = lot.unit.clone();
			}
		}

		Self { states, default_threshold: thresholds.fallback() }
	}

	pub fn get(&self, name: &str) -> Option<&IngredientState> {
		self.states.get(name)
	}

	/// Untracked ingredients count as zero on hand.
	pub fn quantity(&self, name: &str) -> f64 {
		self.states.get(name).map(|state| state.quantity).unwrap_or(0.0)
	}

	pub fn threshold(&self, name: &str) -> f64 {
		self.states.get(name).map(|state| state.threshold).unwrap_or(self.default_threshold)
	}

	pub fn status(&self, name: &str) -> StockStatus {
		self.states.get(name).map(|state| state.status).unwrap_or(StockStatus::Out)
	}

	/// Strict comparison: an ingredient at exactly its threshold is not low.
	pub fn is_low(&self, name: &str) -> bool {
		self.quantity(name) < self.threshold(name)
	}

	pub fn is_out(&self, name: &str) -> bool {
		self.quantity(name) <= 0.0
	}

	pub fn states(&self) -> impl Iterator<Item = &IngredientState> {
		self.states.values()
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}
