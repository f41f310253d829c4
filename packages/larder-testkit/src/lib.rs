//! In-process fixtures for exercising the service pipeline without a live
//! vector store or embedding provider.

pub use tempfile::NamedTempFile;

use std::io::Write;

use serde_json::{Map, Value, json};

use larder_config::{
	Config, Data, EmbeddingProviderConfig, Inventory, Providers, Qdrant, Service, Storage,
};
use larder_search::{BoxFuture, Error, Result, SearchBackend, SearchHit};

pub const MENU_COLLECTION: &str = "menu_items";
pub const INVENTORY_COLLECTION: &str = "inventory_items";

/// Serves canned hits per collection; `fail` turns every call into a backend
/// error to exercise the degraded paths.
#[derive(Default)]
pub struct FakeBackend {
	pub menu: Vec<SearchHit>,
	pub inventory: Vec<SearchHit>,
	pub fail: bool,
}
impl SearchBackend for FakeBackend {
	fn query<'a>(
		&'a self,
		collection: &'a str,
		_text: &'a str,
		_top_k: u32,
	) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		Box::pin(async move {
			if self.fail {
				return Err(Error::InvalidResponse { message: "backend down".to_string() });
			}
			if collection == MENU_COLLECTION {
				Ok(self.menu.clone())
			} else {
				Ok(self.inventory.clone())
			}
		})
	}

	fn get_all<'a>(&'a self, _collection: &'a str) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		Box::pin(async move {
			if self.fail {
				return Err(Error::InvalidResponse { message: "backend down".to_string() });
			}

			Ok(self.inventory.clone())
		})
	}
}

pub fn csv_file(content: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("create temp file");

	file.write_all(content.as_bytes()).expect("write temp file");
	file
}

/// A config wired to the fixture collections and the given data files. Binds
/// are loopback placeholders; nothing in the fixtures listens on them.
pub fn config(lots: &NamedTempFile, thresholds: &NamedTempFile) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:6334".to_string(),
				menu_collection: MENU_COLLECTION.to_string(),
				inventory_collection: INVENTORY_COLLECTION.to_string(),
				vector_dim: 8,
			},
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test".to_string(),
				path: "/embeddings".to_string(),
				model: "test".to_string(),
				dimensions: 8,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		data: Data {
			lots_path: lots.path().display().to_string(),
			thresholds_path: thresholds.path().display().to_string(),
			menu_path: "menu.json".to_string(),
		},
		inventory: Inventory { default_low_threshold: 15.0, search_top_k: 10 },
	}
}

pub fn menu_hit(id: &str, name: &str, rules: &Value, distance: f32) -> SearchHit {
	let mut payload = Map::new();

	payload.insert("item_id".to_string(), json!(id));
	payload.insert("name".to_string(), json!(name));
	payload.insert("price".to_string(), json!(9.5));
	payload.insert("suggested_substitutions".to_string(), json!(rules.to_string()));

	SearchHit {
		id: id.to_string(),
		document: format!("{name} with seasonal sides."),
		payload,
		distance,
	}
}

pub fn inventory_hit(lot_id: &str, ingredient: &str, quantity: f64, distance: f32) -> SearchHit {
	let mut payload = Map::new();

	payload.insert("lot_id".to_string(), json!(lot_id));
	payload.insert("ingredient_name".to_string(), json!(ingredient));
	payload.insert("category".to_string(), json!("Produce"));
	payload.insert("current_quantity".to_string(), json!(quantity));
	payload.insert("unit".to_string(), json!("kg"));

	SearchHit { id: lot_id.to_string(), document: format!("{ingredient}."), payload, distance }
}
