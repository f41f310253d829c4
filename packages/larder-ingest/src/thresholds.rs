use std::{collections::HashMap, fs::File, path::Path};

use csv::ReaderBuilder;
use tracing::debug;

use crate::{Error, Result, columns::find_containing};

const NAME_FRAGMENTS: &[&str] = &["ingredient", "name", "item"];
const VALUE_FRAGMENTS: &[&str] = &["threshold", "low", "min", "limit", "quantity"];

#[derive(Debug)]
pub struct ThresholdFile {
	pub overrides: HashMap<String, f64>,
	pub rows_skipped: usize,
}

/// Reads per-ingredient low-stock overrides. Header matching is by fragment
/// ("Low Threshold", "Min Quantity", and so on all qualify). Rows whose value
/// does not parse as a number are skipped and counted.
pub fn read_thresholds(path: &Path) -> Result<ThresholdFile> {
	let file =
		File::open(path).map_err(|err| Error::Open { path: path.to_path_buf(), source: err })?;
	let mut reader = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);
	let headers: Vec<String> =
		reader.headers()?.iter().map(|header| header.trim().to_string()).collect();

	let (Some(name_idx), Some(value_idx)) =
		(find_containing(&headers, NAME_FRAGMENTS), find_containing(&headers, VALUE_FRAGMENTS))
	else {
		return Err(Error::MissingColumns {
			path: path.to_path_buf(),
			needed: "ingredient and threshold",
			headers,
		});
	};

	let mut overrides = HashMap::new();
	let mut rows_skipped = 0;

	for record in reader.records() {
		let record = record?;
		let name = record.get(name_idx).map(str::trim).unwrap_or_default();
		let value = record.get(value_idx).and_then(|raw| raw.trim().parse::<f64>().ok());

		let (false, Some(value)) = (name.is_empty(), value) else {
			rows_skipped += 1;

			continue;
		};

		overrides.insert(name.to_string(), value);
	}

	debug!(path = %path.display(), overrides = overrides.len(), rows_skipped, "Read threshold file.");

	Ok(ThresholdFile { overrides, rows_skipped })
}
