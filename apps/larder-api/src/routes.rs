use std::sync::Arc;

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	routing::{get, post},
};

use larder_service::{
	InventoryResult, OwnerSearchRequest, OwnerSearchResponse, PatronSearchRequest,
	PatronSearchResponse, ReloadReport,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/inventory", get(inventory))
		.route("/patron_search", post(patron_search))
		.route("/owner_search", post(owner_search))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/admin/reload_inventory", post(reload_inventory)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn inventory(State(state): State<AppState>) -> Json<Vec<InventoryResult>> {
	Json(state.service.inventory_listing().await)
}

async fn patron_search(
	State(state): State<AppState>,
	Json(payload): Json<PatronSearchRequest>,
) -> Json<PatronSearchResponse> {
	Json(state.service.patron_search(payload).await)
}

async fn owner_search(
	State(state): State<AppState>,
	Json(payload): Json<OwnerSearchRequest>,
) -> Json<OwnerSearchResponse> {
	Json(state.service.owner_search(payload).await)
}

async fn reload_inventory(
	State(state): State<AppState>,
) -> Result<Json<ReloadReport>, StatusCode> {
	let service = Arc::clone(&state.service);

	match tokio::task::spawn_blocking(move || service.reload_inventory()).await {
		Ok(report) => Ok(Json(report)),
		Err(err) => {
			tracing::error!(error = %err, "Inventory reload task failed.");

			Err(StatusCode::INTERNAL_SERVER_ERROR)
		},
	}
}
