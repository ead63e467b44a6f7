use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use petfinder_sdk::models::Animal;
use petfinder_sdk::{InitError, PetfinderClient, QueryParams};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::GatewayError;

/// Shared by all handlers.
///
/// Holds the outcome of client construction, so a gateway started without a
/// usable client answers every request with a 500 instead of panicking.
#[derive(Debug, Clone)]
pub struct AppState {
    client: Result<Arc<PetfinderClient>, InitError>,
}

impl AppState {
    #[must_use]
    pub fn new(client: Arc<PetfinderClient>) -> Self {
        Self { client: Ok(client) }
    }

    #[must_use]
    pub fn from_outcome(client: Result<Arc<PetfinderClient>, InitError>) -> Self {
        Self { client }
    }

    fn client(&self) -> Result<&PetfinderClient, GatewayError> {
        self.client
            .as_deref()
            .map_err(|e| GatewayError::Init(e.clone()))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NearbyQuery {
    pub zip: String,
    pub distance: String,
}

/// `GET /nearby` and `GET /findpet/{id}`, with permissive CORS and request
/// tracing.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/nearby", get(nearby))
        .route("/findpet/{id}", get(find_pet))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

#[tracing::instrument(skip_all, fields(zip = %query.zip, distance = %query.distance))]
async fn nearby(
    State(state): State<AppState>,
    query: Query<NearbyQuery>,
) -> Result<Json<Vec<Animal>>, GatewayError> {
    let params = QueryParams::nearby(&query.zip, &query.distance);
    let response = state
        .client()?
        .get_animals(&params)
        .await
        .map_err(GatewayError::Upstream)?;

    tracing::debug!(count = response.animals.len(), "nearby animals found");
    Ok(Json(response.animals))
}

#[tracing::instrument(skip_all, fields(animal_id = %id.as_str()))]
async fn find_pet(
    State(state): State<AppState>,
    id: Path<String>,
) -> Result<Json<Animal>, GatewayError> {
    let animal = state
        .client()?
        .get_animal_by_id(&id)
        .await
        .map_err(GatewayError::Upstream)?;
    Ok(Json(animal))
}
