//! Catalog routes: filtered listing, submit-to-search and typeahead.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use carlot_catalog::{CatalogEntry, FilterSelection};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::cars::{CarResponse, QueryRequest};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_cars, search_cars, suggest_cars),
    components(schemas(CarResponse, CatalogEntry, QueryRequest))
)]
pub struct CarsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/car_tb", get(list_cars))
        .route("/cars/search", post(search_cars))
        .route("/cars/suggestions", post(suggest_cars))
}

fn with_image_urls(state: &AppState, cars: Vec<CatalogEntry>) -> Vec<CarResponse> {
    let base = state.config.public_base_url.as_str();
    cars.into_iter().map(|car| CarResponse::new(car, base)).collect()
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Filtered catalog listing.
///
/// Every query parameter is a filter; blank values are ignored and an empty
/// query string lists the whole catalog in store order.
#[utoipa::path(
    get,
    path = "/car_tb",
    tag = "cars",
    params(
        ("price" = Option<String>, Query, description = "Price band label, e.g. `3L to 10L`"),
        ("seats" = Option<i64>, Query, description = "Exact seat count"),
        ("airbags" = Option<i64>, Query, description = "Exact airbag count"),
        ("brand" = Option<String>, Query, description = "Exact brand"),
        ("color" = Option<String>, Query, description = "Exact color"),
        ("fuel_type" = Option<String>, Query, description = "Exact fuel type"),
        ("car_type" = Option<String>, Query, description = "Exact body type"),
        ("Made" = Option<String>, Query, description = "Exact country of origin"),
    ),
    responses(
        (status = 200, description = "Matching cars", body = [CarResponse]),
        (status = 400, description = "A filter value could not be interpreted"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn list_cars(
    State(state): State<Arc<AppState>>,
    Query(selection): Query<FilterSelection>,
) -> Result<Json<Vec<CarResponse>>, ServerError> {
    let predicate = state
        .filters
        .compile(&selection)
        .map_err(|e| ServerError::catalog("Error retrieving cars", e))?;
    debug!(?predicate, "compiled filters");

    let cars = state
        .store()
        .find(&predicate, None)
        .await
        .map_err(|e| ServerError::catalog("Error retrieving cars", e.into()))?;
    info!(count = cars.len(), "listed cars");

    Ok(Json(with_image_urls(&state, cars)))
}

/// Relevance-ordered text search over the catalog index.
#[utoipa::path(
    post,
    path = "/cars/search",
    tag = "cars",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Matching cars, best first", body = [CarResponse]),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn search_cars(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Vec<CarResponse>>, ServerError> {
    let Json(req) = body.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let cars = state
        .search
        .search(req.text())
        .await
        .map_err(|e| ServerError::catalog("Error searching cars", e))?;
    info!(count = cars.len(), "searched cars");

    Ok(Json(with_image_urls(&state, cars)))
}

/// Typeahead suggestions of the form `"<brand> <model> <color>"`.
///
/// Always answers 200; failures and unreadable bodies yield an empty list.
#[utoipa::path(
    post,
    path = "/cars/suggestions",
    tag = "cars",
    request_body = QueryRequest,
    responses((status = 200, description = "Up to five suggestions", body = [String]))
)]
pub async fn suggest_cars(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Json<Vec<String>> {
    let Ok(Json(req)) = body else {
        debug!("unreadable suggestion body");
        return Json(Vec::new());
    };
    Json(state.suggestions.suggest(req.text()).await)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
