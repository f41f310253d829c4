use std::collections::HashMap;

/// Per-ingredient low-stock boundaries with a single global fallback. Loaded
/// once at startup and immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Thresholds {
	overrides: HashMap<String, f64>,
	fallback: f64,
}
impl Thresholds {
	pub fn new(overrides: HashMap<String, f64>, fallback: f64) -> Self {
		Self { overrides, fallback }
	}

	pub fn uniform(fallback: f64) -> Self {
		Self { overrides: HashMap::new(), fallback }
	}

	pub fn resolve(&self, name: &str) -> f64 {
		self.overrides.get(name).copied().unwrap_or(self.fallback)
	}

	pub fn fallback(&self) -> f64 {
		self.fallback
	}

	pub fn override_count(&self) -> usize {
		self.overrides.len()
	}
}
