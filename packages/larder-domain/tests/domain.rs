use std::collections::HashMap;

use time::macros::date;

use larder_domain::{
	Availability, InventorySnapshot, LotRecord, MenuCandidate, StockStatus, SubstitutionRule,
	Thresholds, classify, rank, resolve_substitution,
};

fn lot(name: &str, quantity: f64, expiration: Option<&str>) -> LotRecord {
	LotRecord {
		ingredient: name.to_string(),
		quantity,
		expiration: expiration.map(str::to_string),
		lot_id: None,
		category: None,
		unit: None,
	}
}

fn rule(trigger: &str, suggest: &str, justification: Option<&str>) -> SubstitutionRule {
	SubstitutionRule {
		trigger_ingredient: trigger.to_string(),
		suggest_item_name: suggest.to_string(),
		suggest_item_id: None,
		rag_justification: justification.map(str::to_string),
	}
}

fn candidate(name: &str, score: f64, rules: Vec<SubstitutionRule>) -> MenuCandidate {
	MenuCandidate {
		id: name.to_lowercase(),
		name: name.to_string(),
		description: String::new(),
		price: 9.5,
		score,
		rules,
		substitution: None,
		availability: Availability::InStock,
	}
}

fn snapshot(quantities: &[(&str, f64)], thresholds: Thresholds) -> InventorySnapshot {
	let lots: Vec<LotRecord> =
		quantities.iter().map(|(name, quantity)| lot(name, *quantity, None)).collect();

	InventorySnapshot::build(&lots, &thresholds, date!(2026 - 08 - 30))
}

#[test]
fn aggregate_sums_lots_per_ingredient() {
	let lots =
		vec![lot("Lettuce", 5.0, None), lot("Lettuce", 7.5, None), lot("Beef", 2.0, None)];
	let totals = larder_domain::inventory::aggregate(&lots, date!(2026 - 08 - 30));

	assert_eq!(totals.get("Lettuce"), Some(&12.5));
	assert_eq!(totals.get("Beef"), Some(&2.0));
}

#[test]
fn expired_lots_are_excluded_from_the_sum() {
	let as_of = date!(2026 - 08 - 30);
	let lots = vec![
		lot("Lettuce", 5.0, Some("08/29/2026")),
		lot("Lettuce", 3.0, Some("08/30/2026")),
		lot("Lettuce", 2.0, Some("09/15/2026")),
	];
	let totals = larder_domain::inventory::aggregate(&lots, as_of);

	// Yesterday's lot is spoiled; today's still counts.
	assert_eq!(totals.get("Lettuce"), Some(&5.0));
}

#[test]
fn unparseable_expiration_dates_are_included() {
	let lots = vec![lot("Milk", 4.0, Some("next tuesday")), lot("Milk", 1.0, Some(""))];
	let totals = larder_domain::inventory::aggregate(&lots, date!(2026 - 08 - 30));

	assert_eq!(totals.get("Milk"), Some(&5.0));
}

#[test]
fn fully_expired_ingredients_stay_tracked_at_zero() {
	let as_of = date!(2026 - 08 - 30);
	let lots = vec![lot("Milk", 9.0, Some("01/01/2026")), lot("Milk", 4.0, Some("08/01/2026"))];
	let totals = larder_domain::inventory::aggregate(&lots, as_of);

	assert_eq!(totals.get("Milk"), Some(&0.0));

	let inventory = InventorySnapshot::build(&lots, &Thresholds::uniform(15.0), as_of);

	assert!(inventory.is_out("Milk"));
	assert_eq!(inventory.status("Milk"), StockStatus::Out);
}

#[test]
fn iso_expiration_dates_parse_too() {
	let lots = vec![lot("Cream", 2.0, Some("2026-08-29")), lot("Cream", 6.0, Some("2026-08-31"))];
	let totals = larder_domain::inventory::aggregate(&lots, date!(2026 - 08 - 30));

	assert_eq!(totals.get("Cream"), Some(&6.0));
}

#[test]
fn quantity_at_exactly_the_threshold_is_not_low() {
	let inventory = snapshot(&[("Lettuce", 15.0)], Thresholds::uniform(15.0));

	assert!(!inventory.is_low("Lettuce"));
	assert_eq!(inventory.status("Lettuce"), StockStatus::High);
}

#[test]
fn quantity_below_the_threshold_is_low() {
	let inventory = snapshot(&[("Lettuce", 14.9)], Thresholds::uniform(15.0));

	assert!(inventory.is_low("Lettuce"));
	assert!(!inventory.is_out("Lettuce"));
	assert_eq!(inventory.status("Lettuce"), StockStatus::Low);
}

#[test]
fn per_ingredient_overrides_beat_the_fallback() {
	let thresholds = Thresholds::new(HashMap::from([("Beef".to_string(), 5.0)]), 15.0);
	let inventory = snapshot(&[("Beef", 10.0), ("Lettuce", 10.0)], thresholds);

	assert_eq!(inventory.status("Beef"), StockStatus::High);
	assert_eq!(inventory.status("Lettuce"), StockStatus::Low);
}

#[test]
fn untracked_ingredients_count_as_out() {
	let inventory = snapshot(&[], Thresholds::uniform(15.0));

	assert_eq!(inventory.quantity("Ghost Pepper"), 0.0);
	assert!(inventory.is_out("Ghost Pepper"));
	assert!(inventory.is_low("Ghost Pepper"));
	assert_eq!(inventory.status("Ghost Pepper"), StockStatus::Out);
}

#[test]
fn classify_matches_the_status_precedence() {
	assert_eq!(classify(0.0, 15.0), StockStatus::Out);
	assert_eq!(classify(-1.0, 15.0), StockStatus::Out);
	assert_eq!(classify(5.0, 15.0), StockStatus::Low);
	assert_eq!(classify(15.0, 15.0), StockStatus::High);
}

#[test]
fn snapshot_carries_first_seen_category_and_unit() {
	let mut first = lot("Lettuce", 5.0, None);

	first.category = Some("Produce".to_string());
	first.unit = Some("kg".to_string());

	let mut second = lot("Lettuce", 3.0, None);

	second.category = Some("Vegetables".to_string());

	let inventory =
		InventorySnapshot::build(&[first, second], &Thresholds::uniform(15.0), date!(2026 - 08 - 30));
	let state = inventory.get("Lettuce").expect("Lettuce must be tracked");

	assert_eq!(state.category.as_deref(), Some("Produce"));
	assert_eq!(state.unit.as_deref(), Some("kg"));
}

#[test]
fn fully_stocked_candidate_is_returned_unchanged() {
	let inventory = snapshot(&[("Lettuce", 30.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Salad", 0.1, vec![rule("Lettuce", "Cabbage Slaw", None)]),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::InStock);
	assert!(resolved.substitution.is_none());
}

#[test]
fn low_trigger_produces_a_substitution() {
	let inventory = snapshot(&[("Lettuce", 5.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Salad", 0.1, vec![rule("Lettuce", "Cabbage Slaw", Some("similar crunch"))]),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::Substituted);

	let suggestion = resolved.substitution.expect("Substituted must carry a suggestion");

	assert_eq!(suggestion.original_item, "Salad");
	assert_eq!(suggestion.suggested_item, "Cabbage Slaw");
	assert_eq!(suggestion.reason, "similar crunch");
}

#[test]
fn missing_justification_falls_back_to_the_generic_reason() {
	let inventory = snapshot(&[("Lettuce", 0.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Salad", 0.1, vec![rule("Lettuce", "Cabbage Slaw", None)]),
		&inventory,
	);
	let suggestion = resolved.substitution.expect("Substituted must carry a suggestion");

	assert_eq!(suggestion.reason, larder_domain::substitution::FALLBACK_JUSTIFICATION);
}

#[test]
fn later_out_trigger_overrides_an_earlier_low_one() {
	// A is low, B is out. The out trigger must win even though the low one is
	// seen first.
	let thresholds = Thresholds::uniform(15.0);
	let inventory = snapshot(&[("A", 5.0), ("B", 0.0)], thresholds);
	let resolved = resolve_substitution(
		candidate(
			"Combo",
			0.1,
			vec![rule("A", "Sub A", Some("mild")), rule("B", "Sub B", Some("critical"))],
		),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::Substituted);
	assert_eq!(
		resolved.substitution.expect("Substituted must carry a suggestion").suggested_item,
		"Sub B"
	);
}

#[test]
fn first_rule_for_the_active_trigger_wins() {
	let inventory = snapshot(&[("Lettuce", 5.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate(
			"Salad",
			0.1,
			vec![
				rule("Lettuce", "Cabbage Slaw", None),
				rule("Lettuce", "Spinach Mix", None),
			],
		),
		&inventory,
	);

	assert_eq!(
		resolved.substitution.expect("Substituted must carry a suggestion").suggested_item,
		"Cabbage Slaw"
	);
}

#[test]
fn unknown_trigger_blocks_the_item_via_substitution() {
	// The trigger ingredient is not tracked at all; quantity defaults to 0,
	// which resolves to out-of-stock and still offers the rule's suggestion.
	let inventory = snapshot(&[], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Salad", 0.1, vec![rule("Lettuce", "Cabbage Slaw", None)]),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::Substituted);
}

#[test]
fn out_trigger_without_a_named_substitute_blocks_the_item() {
	let inventory = snapshot(&[("Beef", 0.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Burger", 0.1, vec![rule("Beef", "", None)]),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::OutOfStock);
	assert!(resolved.substitution.is_none());
}

#[test]
fn low_trigger_without_a_named_substitute_keeps_the_low_status() {
	let inventory = snapshot(&[("Beef", 5.0)], Thresholds::uniform(15.0));
	let resolved = resolve_substitution(
		candidate("Burger", 0.1, vec![rule("Beef", "  ", None)]),
		&inventory,
	);

	assert_eq!(resolved.availability, Availability::LowStock);
	assert!(resolved.substitution.is_none());
}

#[test]
fn rank_orders_by_tier_then_score() {
	let mut candidates = vec![
		with_availability(candidate("D", 0.9, Vec::new()), Availability::LowStock),
		with_availability(candidate("B", 0.8, Vec::new()), Availability::InStock),
		with_availability(candidate("C", 0.2, Vec::new()), Availability::Substituted),
		with_availability(candidate("A", 0.1, Vec::new()), Availability::InStock),
	];

	rank(&mut candidates);

	let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();

	assert_eq!(names, vec!["A", "B", "C", "D"]);
}

#[test]
fn rank_is_stable_for_identical_keys() {
	let mut candidates = vec![
		with_availability(candidate("First", 0.5, Vec::new()), Availability::InStock),
		with_availability(candidate("Second", 0.5, Vec::new()), Availability::InStock),
		with_availability(candidate("Third", 0.5, Vec::new()), Availability::InStock),
	];

	rank(&mut candidates);

	let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();

	assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn availability_serializes_to_the_wire_strings() {
	assert_eq!(
		serde_json::to_string(&Availability::OutOfStock).expect("serialize"),
		"\"Out of Stock\""
	);
	assert_eq!(serde_json::to_string(&Availability::InStock).expect("serialize"), "\"In Stock\"");
}

#[test]
fn rules_deserialize_with_missing_optional_fields() {
	let raw = r#"[{"trigger_ingredient": "Lettuce", "suggest_item_name": "Cabbage Slaw"}]"#;
	let rules: Vec<SubstitutionRule> = serde_json::from_str(raw).expect("deserialize");

	assert_eq!(rules.len(), 1);
	assert_eq!(rules[0].trigger_ingredient, "Lettuce");
	assert!(rules[0].rag_justification.is_none());
}

fn with_availability(mut candidate: MenuCandidate, availability: Availability) -> MenuCandidate {
	candidate.availability = availability;
	candidate
}
