use std::io::Write;

use tempfile::NamedTempFile;

use larder_ingest::{Error, read_lots, read_thresholds};

fn csv_file(content: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("create temp file");

	file.write_all(content.as_bytes()).expect("write temp file");
	file
}

#[test]
fn reads_a_plain_lot_export() {
	let file = csv_file(
		"Ingredient Name,Current Quantity,Expiration Date,Lot ID,Category,Default Unit\n\
		 Lettuce,12.5,08/30/2026,L-1,Produce,kg\n\
		 Beef,3,09/02/2026,L-2,Meat,kg\n",
	);
	let lots = read_lots(file.path()).expect("read lots");

	assert_eq!(lots.lots.len(), 2);
	assert_eq!(lots.rows_skipped, 0);

	let lettuce = &lots.lots[0];

	assert_eq!(lettuce.ingredient, "Lettuce");
	assert_eq!(lettuce.quantity, 12.5);
	assert_eq!(lettuce.expiration.as_deref(), Some("08/30/2026"));
	assert_eq!(lettuce.lot_id.as_deref(), Some("L-1"));
	assert_eq!(lettuce.category.as_deref(), Some("Produce"));
	assert_eq!(lettuce.unit.as_deref(), Some("kg"));
}

#[test]
fn header_synonyms_and_case_are_accepted() {
	let file = csv_file("NAME,quantity\nLettuce,5\n");
	let lots = read_lots(file.path()).expect("read lots");

	assert_eq!(lots.lots.len(), 1);
	assert_eq!(lots.lots[0].quantity, 5.0);
	assert!(lots.lots[0].expiration.is_none());
}

#[test]
fn bad_rows_are_counted_not_fatal() {
	let file = csv_file(
		"Ingredient Name,Current Quantity\n\
		 Lettuce,12\n\
		 ,7\n\
		 Beef,plenty\n\
		 Milk,4\n",
	);
	let lots = read_lots(file.path()).expect("read lots");

	assert_eq!(lots.lots.len(), 2);
	assert_eq!(lots.rows_skipped, 2);
}

#[test]
fn fully_blank_rows_are_ignored_silently() {
	let file = csv_file(
		"Ingredient Name,Current Quantity\n\
		 Lettuce,12\n\
		 ,\n\
		 Beef,3\n",
	);
	let lots = read_lots(file.path()).expect("read lots");

	assert_eq!(lots.lots.len(), 2);
	assert_eq!(lots.rows_skipped, 0);
}

#[test]
fn missing_quantity_column_is_an_error() {
	let file = csv_file("Ingredient Name,Expiration Date\nLettuce,08/30/2026\n");
	let err = read_lots(file.path()).expect_err("must reject");

	assert!(matches!(err, Error::MissingColumns { .. }));
}

#[test]
fn threshold_headers_match_by_fragment() {
	let file = csv_file(
		"Item Name,Min Quantity\n\
		 Lettuce,20\n\
		 Beef,5\n",
	);
	let thresholds = read_thresholds(file.path()).expect("read thresholds");

	assert_eq!(thresholds.overrides.len(), 2);
	assert_eq!(thresholds.overrides.get("Lettuce"), Some(&20.0));
	assert_eq!(thresholds.overrides.get("Beef"), Some(&5.0));
}

#[test]
fn threshold_rows_with_unparseable_values_are_skipped() {
	let file = csv_file(
		"Ingredient,Low Threshold\n\
		 Lettuce,20\n\
		 Beef,a lot\n",
	);
	let thresholds = read_thresholds(file.path()).expect("read thresholds");

	assert_eq!(thresholds.overrides.len(), 1);
	assert_eq!(thresholds.rows_skipped, 1);
}

#[test]
fn threshold_file_without_a_value_column_is_an_error() {
	let file = csv_file("Ingredient,Notes\nLettuce,wilts fast\n");
	let err = read_thresholds(file.path()).expect_err("must reject");

	assert!(matches!(err, Error::MissingColumns { .. }));
}
