//! Fuzzy header detection for operator-maintained spreadsheets. Vendors
//! rename columns freely ("Ingredient Name", "ingredient_name", "Name"), so
//! matching ignores case, whitespace, and punctuation. The core engine never
//! sees raw rows; this module is the only place that guesses.

/// Lowercases and strips everything that is not a letter or digit.
pub fn normalize_header(raw: &str) -> String {
	raw.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_ascii_lowercase()
}

/// Index of the first header whose normalized form equals one of `candidates`
/// (candidates are already normalized).
pub fn find_exact(headers: &[String], candidates: &[&str]) -> Option<usize> {
	headers.iter().position(|header| {
		let normalized = normalize_header(header);

		candidates.iter().any(|candidate| normalized == *candidate)
	})
}

/// Index of the first header whose normalized form contains one of
/// `fragments`. Used for the thresholds file, where headers like
/// "Low Threshold" or "Min Quantity" are common.
pub fn find_containing(headers: &[String], fragments: &[&str]) -> Option<usize> {
	headers.iter().position(|header| {
		let normalized = normalize_header(header);

		fragments.iter().any(|fragment| normalized.contains(fragment))
	})
}
