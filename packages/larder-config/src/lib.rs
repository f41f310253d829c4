mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Data, EmbeddingProviderConfig, Inventory, Providers, Qdrant, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.menu_collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.menu_collection must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.inventory_collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.inventory_collection must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.vector_dim == 0 {
		return Err(Error::Validation {
			message: "storage.qdrant.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.model must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, path) in [
		("data.lots_path", &cfg.data.lots_path),
		("data.thresholds_path", &cfg.data.thresholds_path),
		("data.menu_path", &cfg.data.menu_path),
	] {
		if path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !cfg.inventory.default_low_threshold.is_finite() {
		return Err(Error::Validation {
			message: "inventory.default_low_threshold must be a finite number.".to_string(),
		});
	}
	if cfg.inventory.default_low_threshold < 0.0 {
		return Err(Error::Validation {
			message: "inventory.default_low_threshold must be zero or greater.".to_string(),
		});
	}
	if cfg.inventory.search_top_k == 0 {
		return Err(Error::Validation {
			message: "inventory.search_top_k must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for path in [
		&mut cfg.data.lots_path,
		&mut cfg.data.thresholds_path,
		&mut cfg.data.menu_path,
	] {
		*path = path.trim().to_string();
	}
}
