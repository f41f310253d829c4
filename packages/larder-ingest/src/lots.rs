use std::{fs::File, path::Path};

use csv::ReaderBuilder;
use tracing::debug;

use larder_domain::LotRecord;

use crate::{
	Error, Result,
	columns::{find_exact, normalize_header},
};

const NAME_COLUMNS: &[&str] = &["ingredientname", "ingredientid", "name"];
const QUANTITY_COLUMNS: &[&str] = &["currentquantity", "quantity"];
const EXPIRATION_COLUMNS: &[&str] = &["expirationdate", "expiry", "expdate"];
const LOT_ID_COLUMNS: &[&str] = &["lotid", "id"];
const CATEGORY_COLUMNS: &[&str] = &["category"];
const UNIT_COLUMNS: &[&str] = &["defaultunit", "unit"];

#[derive(Debug)]
pub struct LotFile {
	pub lots: Vec<LotRecord>,
	pub rows_skipped: usize,
}

/// Reads a per-lot stock export. The name and quantity columns are required;
/// everything else is optional. Rows with a blank name or a non-numeric
/// quantity are skipped and counted, never fatal.
pub fn read_lots(path: &Path) -> Result<LotFile> {
	let file =
		File::open(path).map_err(|err| Error::Open { path: path.to_path_buf(), source: err })?;
	let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);
	let headers: Vec<String> =
		reader.headers()?.iter().map(|header| header.trim().to_string()).collect();

	let Some(name_idx) = find_exact(&headers, NAME_COLUMNS) else {
		return Err(missing(path, &headers));
	};
	let Some(quantity_idx) = find_exact(&headers, QUANTITY_COLUMNS) else {
		return Err(missing(path, &headers));
	};
	let expiration_idx = find_exact(&headers, EXPIRATION_COLUMNS);
	let lot_id_idx = find_exact(&headers, LOT_ID_COLUMNS);
	let category_idx = find_exact(&headers, CATEGORY_COLUMNS);
	let unit_idx = find_exact(&headers, UNIT_COLUMNS);

	let mut lots = Vec::new();
	let mut rows_skipped = 0;

	for record in reader.records() {
		let record = record?;

		if record.iter().all(|field| field.trim().is_empty()) {
			continue;
		}

		let ingredient = field(&record, Some(name_idx)).unwrap_or_default();
		let quantity = field(&record, Some(quantity_idx)).and_then(|raw| raw.parse::<f64>().ok());

		let (false, Some(quantity)) = (ingredient.is_empty(), quantity) else {
			rows_skipped += 1;

			continue;
		};

		lots.push(LotRecord {
			ingredient,
			quantity,
			expiration: field(&record, expiration_idx),
			lot_id: field(&record, lot_id_idx),
			category: field(&record, category_idx),
			unit: field(&record, unit_idx),
		});
	}

	debug!(path = %path.display(), lots = lots.len(), rows_skipped, "Read lot file.");

	Ok(LotFile { lots, rows_skipped })
}

fn field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
	let raw = record.get(idx?)?.trim();

	if raw.is_empty() { None } else { Some(raw.to_string()) }
}

fn missing(path: &Path, headers: &[String]) -> Error {
	Error::MissingColumns {
		path: path.to_path_buf(),
		needed: "ingredient name and quantity",
		headers: headers.to_vec(),
	}
}
