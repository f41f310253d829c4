use std::collections::HashMap;

use qdrant_client::{
	Qdrant,
	qdrant::{
		PointId, Query, QueryPointsBuilder, RetrievedPoint, ScoredPoint, ScrollPointsBuilder,
		point_id::PointIdOptions,
		value::Kind,
	},
};
use serde_json::{Map, Number, Value};

use crate::{BoxFuture, Error, Result, SearchBackend, SearchHit, embedding};

/// Payload key holding the embedded document text; the payload is the only
/// place Qdrant keeps it.
pub const DOCUMENT_KEY: &str = "document";

const SCROLL_PAGE: u32 = 256;

/// Qdrant-backed similarity search. Query text is embedded through the
/// configured provider; hits report `1.0 - cosine similarity` so that lower
/// means closer, matching the `SearchBackend` convention.
pub struct QdrantSearch {
	pub client: Qdrant,
	embedding: larder_config::EmbeddingProviderConfig,
}
impl QdrantSearch {
	pub fn new(
		cfg: &larder_config::Qdrant,
		embedding: larder_config::EmbeddingProviderConfig,
	) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, embedding })
	}
}
impl SearchBackend for QdrantSearch {
	fn query<'a>(
		&'a self,
		collection: &'a str,
		text: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		Box::pin(async move {
			let texts = vec![text.to_string()];
			let mut vectors = embedding::embed(&self.embedding, &texts).await?;
			let Some(vector) = vectors.pop() else {
				return Err(Error::InvalidResponse {
					message: "Embedding provider returned no vector for the query.".to_string(),
				});
			};
			let search = QueryPointsBuilder::new(collection)
				.query(Query::new_nearest(vector))
				.with_payload(true)
				.limit(top_k as u64);
			let response = self.client.query(search).await?;

			Ok(response.result.iter().map(scored_hit).collect())
		})
	}

	fn get_all<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<SearchHit>>> {
		Box::pin(async move {
			let mut hits = Vec::new();
			let mut offset: Option<PointId> = None;

			loop {
				let mut scroll =
					ScrollPointsBuilder::new(collection).with_payload(true).limit(SCROLL_PAGE);

				if let Some(from) = offset.take() {
					scroll = scroll.offset(from);
				}

				let response = self.client.scroll(scroll).await?;

				hits.extend(response.result.iter().map(retrieved_hit));

				match response.next_page_offset {
					Some(next) => offset = Some(next),
					None => break,
				}
			}

			Ok(hits)
		})
	}
}

fn scored_hit(point: &ScoredPoint) -> SearchHit {
	let payload = payload_to_json(&point.payload);

	SearchHit {
		id: point.id.as_ref().map(point_id_string).unwrap_or_default(),
		document: document_text(&payload),
		distance: 1.0 - point.score,
		payload,
	}
}

fn retrieved_hit(point: &RetrievedPoint) -> SearchHit {
	let payload = payload_to_json(&point.payload);

	// A scroll has no query to be distant from; callers substitute their own
	// placeholder score.
	SearchHit {
		id: point.id.as_ref().map(point_id_string).unwrap_or_default(),
		document: document_text(&payload),
		distance: 1.0,
		payload,
	}
}

fn document_text(payload: &Map<String, Value>) -> String {
	payload.get(DOCUMENT_KEY).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn point_id_string(point_id: &PointId) -> String {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => id.clone(),
		Some(PointIdOptions::Num(id)) => id.to_string(),
		None => String::new(),
	}
}

fn payload_to_json(payload: &HashMap<String, qdrant_client::qdrant::Value>) -> Map<String, Value> {
	payload.iter().map(|(key, value)| (key.clone(), qdrant_value_to_json(value))).collect()
}

fn qdrant_value_to_json(value: &qdrant_client::qdrant::Value) -> Value {
	match &value.kind {
		Some(Kind::StringValue(text)) => Value::String(text.clone()),
		Some(Kind::IntegerValue(number)) => Value::Number(Number::from(*number)),
		Some(Kind::DoubleValue(number)) => {
			Number::from_f64(*number).map(Value::Number).unwrap_or(Value::Null)
		},
		Some(Kind::BoolValue(flag)) => Value::Bool(*flag),
		Some(Kind::ListValue(list)) => {
			Value::Array(list.values.iter().map(qdrant_value_to_json).collect())
		},
		Some(Kind::StructValue(fields)) => Value::Object(payload_to_json(&fields.fields)),
		Some(Kind::NullValue(_)) | None => Value::Null,
	}
}
