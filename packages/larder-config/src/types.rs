use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub data: Data,
	pub inventory: Inventory,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub menu_collection: String,
	pub inventory_collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Paths of the operator-maintained data files. The lots and thresholds files
/// are re-read on reload and may legitimately be absent; see the service crate
/// for the fail-soft policy.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
	pub lots_path: String,
	pub thresholds_path: String,
	pub menu_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
	pub default_low_threshold: f64,
	pub search_top_k: u32,
}
