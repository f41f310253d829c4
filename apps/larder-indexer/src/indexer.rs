use std::{collections::HashMap, fs, path::Path};

use color_eyre::eyre;
use qdrant_client::{
	Qdrant,
	client::Payload,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
	},
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use larder_config::Config;
use larder_domain::{LotRecord, SubstitutionRule};
use larder_search::{embedding, qdrant::DOCUMENT_KEY};

const EMBED_BATCH: usize = 64;

#[derive(Debug, Deserialize)]
struct MenuFile {
	menu: HashMap<String, Vec<MenuItem>>,
}

#[derive(Debug, Deserialize)]
struct MenuItem {
	id: String,
	name: String,
	#[serde(default)]
	description: String,
	#[serde(default)]
	price: f64,
	#[serde(default)]
	category: String,
	#[serde(default)]
	tags: Vec<String>,
	#[serde(default)]
	suggested_substitutions: Vec<SubstitutionRule>,
}

/// Rebuilds both collections from the canonical data files. Each run drops
/// and recreates the collections, so the store always mirrors the files.
pub async fn run_index(cfg: &Config, client: &Qdrant) -> color_eyre::Result<()> {
	index_menu(cfg, client).await?;
	index_inventory(cfg, client).await?;

	Ok(())
}

async fn index_menu(cfg: &Config, client: &Qdrant) -> color_eyre::Result<()> {
	let path = Path::new(&cfg.data.menu_path);
	let raw = fs::read_to_string(path)
		.map_err(|err| eyre::eyre!("Failed to read menu file {path:?}: {err}"))?;
	let file: MenuFile = serde_json::from_str(&raw)?;
	let collection = &cfg.storage.qdrant.menu_collection;

	reset_collection(client, collection, cfg.storage.qdrant.vector_dim).await?;

	let mut documents = Vec::new();
	let mut entries = Vec::new();

	for (category, items) in &file.menu {
		for item in items {
			documents.push(format!(
				"{}. {}. Tags: {}",
				item.name,
				item.description,
				item.tags.join(", ")
			));
			entries.push((category.as_str(), item));
		}
	}

	if entries.is_empty() {
		warn!(path = %path.display(), "Menu file holds no items; menu collection left empty.");

		return Ok(());
	}

	let vectors = embed_documents(cfg, &documents).await?;
	let mut points = Vec::with_capacity(entries.len());

	for (index, (category, item)) in entries.iter().enumerate() {
		let mut payload = Payload::new();

		payload.insert("item_id", item.id.clone());
		payload.insert("name", item.name.clone());
		payload.insert(
			"category",
			if item.category.is_empty() { category.to_string() } else { item.category.clone() },
		);
		payload.insert("price", item.price);
		payload.insert(
			"suggested_substitutions",
			serde_json::to_string(&item.suggested_substitutions)?,
		);
		payload.insert(DOCUMENT_KEY, documents[index].clone());

		points.push(PointStruct::new(point_id(&item.id), vectors[index].clone(), payload));
	}

	let count = points.len();

	client
		.upsert_points(UpsertPointsBuilder::new(collection.clone(), points).wait(true))
		.await?;

	info!(collection = %collection, items = count, "Menu collection indexed.");

	Ok(())
}

async fn index_inventory(cfg: &Config, client: &Qdrant) -> color_eyre::Result<()> {
	let path = Path::new(&cfg.data.lots_path);
	let file = larder_ingest::read_lots(path)?;
	let collection = &cfg.storage.qdrant.inventory_collection;

	reset_collection(client, collection, cfg.storage.qdrant.vector_dim).await?;

	if file.lots.is_empty() {
		warn!(path = %path.display(), "Lot file holds no rows; inventory collection left empty.");

		return Ok(());
	}

	let documents: Vec<String> = file.lots.iter().map(lot_document).collect();
	let vectors = embed_documents(cfg, &documents).await?;
	let mut points = Vec::with_capacity(file.lots.len());

	for (index, lot) in file.lots.iter().enumerate() {
		let source_id =
			lot.lot_id.clone().unwrap_or_else(|| format!("{}-{index}", lot.ingredient));
		let mut payload = Payload::new();

		payload.insert("lot_id", source_id.clone());
		payload.insert("ingredient_name", lot.ingredient.clone());
		payload.insert("category", lot.category.clone().unwrap_or_else(|| "General".to_string()));
		payload.insert("current_quantity", lot.quantity);
		payload.insert("unit", lot.unit.clone().unwrap_or_else(|| "units".to_string()));
		payload.insert("expiration_date", lot.expiration.clone().unwrap_or_default());
		payload.insert(DOCUMENT_KEY, documents[index].clone());

		points.push(PointStruct::new(point_id(&source_id), vectors[index].clone(), payload));
	}

	let count = points.len();

	client
		.upsert_points(UpsertPointsBuilder::new(collection.clone(), points).wait(true))
		.await?;

	info!(
		collection = %collection,
		lots = count,
		rows_skipped = file.rows_skipped,
		"Inventory collection indexed."
	);

	Ok(())
}

async fn reset_collection(client: &Qdrant, name: &str, dim: u32) -> color_eyre::Result<()> {
	// Delete may fail when the collection does not exist yet; that is fine.
	let _ = client.delete_collection(name.to_string()).await;

	client
		.create_collection(
			CreateCollectionBuilder::new(name.to_string())
				.vectors_config(VectorParamsBuilder::new(u64::from(dim), Distance::Cosine)),
		)
		.await?;

	Ok(())
}

async fn embed_documents(cfg: &Config, documents: &[String]) -> color_eyre::Result<Vec<Vec<f32>>> {
	let mut vectors = Vec::with_capacity(documents.len());

	for batch in documents.chunks(EMBED_BATCH) {
		vectors.extend(embedding::embed(&cfg.providers.embedding, batch).await?);
	}

	if vectors.len() != documents.len() {
		return Err(eyre::eyre!(
			"Embedding provider returned {} vectors for {} documents.",
			vectors.len(),
			documents.len()
		));
	}

	Ok(vectors)
}

fn lot_document(lot: &LotRecord) -> String {
	format!("{}. Category: {}.", lot.ingredient, lot.category.as_deref().unwrap_or("General"))
}

/// Qdrant only accepts UUID or integer point ids; source ids are mapped
/// through UUIDv5 and kept verbatim in the payload.
fn point_id(source_id: &str) -> String {
	Uuid::new_v5(&Uuid::NAMESPACE_OID, source_id.as_bytes()).to_string()
}
