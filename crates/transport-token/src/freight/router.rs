use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::ShipmentRequest;
use super::emissions::{EmissionRequest, METHODOLOGY};
use super::matching::{CarrierProfile, ShipmentSummary};
use super::quote::FreightEngine;
use crate::error::AppError;

/// Shared state behind every freight route.
pub struct FreightApi {
    engine: Arc<FreightEngine>,
    match_limit: usize,
}

impl FreightApi {
    pub fn new(engine: Arc<FreightEngine>, match_limit: usize) -> Self {
        Self {
            engine,
            match_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub shipment: ShipmentSummary,
    pub carriers: Vec<CarrierProfile>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing quotes, emissions, carrier matching and catalog listings.
pub fn freight_router(engine: Arc<FreightEngine>, match_limit: usize) -> Router {
    let api = Arc::new(FreightApi::new(engine, match_limit));

    Router::new()
        .route("/api/v1/quotes", post(quote_handler))
        .route("/api/v1/emissions", post(emissions_handler))
        .route("/api/v1/matches", post(matches_handler))
        .route("/api/v1/catalog/vehicles", get(vehicles_handler))
        .route("/api/v1/catalog/countries", get(countries_handler))
        .route(
            "/api/v1/catalog/emission-factors",
            get(emission_factors_handler),
        )
        .with_state(api)
}

pub(crate) async fn quote_handler(
    State(api): State<Arc<FreightApi>>,
    axum::Json(request): axum::Json<ShipmentRequest>,
) -> Response {
    match api.engine.compute_quote(&request) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(error) => {
            warn!(
                vehicle_class = %request.vehicle_class,
                %error,
                "quote rejected"
            );
            AppError::from(error).into_response()
        }
    }
}

pub(crate) async fn emissions_handler(
    State(api): State<Arc<FreightApi>>,
    axum::Json(request): axum::Json<EmissionRequest>,
) -> Response {
    match api.engine.compute_emissions(&request) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => {
            warn!(
                vehicle_class = %request.vehicle_class,
                %error,
                "emission estimate rejected"
            );
            AppError::from(error).into_response()
        }
    }
}

pub(crate) async fn matches_handler(
    State(api): State<Arc<FreightApi>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response {
    if !request.shipment.payload_weight_kg.is_finite() || request.shipment.payload_weight_kg < 0.0
    {
        let payload = json!({
            "error": "payload_weight_kg must be a non-negative number",
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let limit = request.limit.unwrap_or(api.match_limit);
    let matches = api
        .engine
        .rank_carriers(&request.carriers, &request.shipment, limit);
    let payload = json!({
        "evaluated": request.carriers.len(),
        "matches": matches,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn vehicles_handler(State(api): State<Arc<FreightApi>>) -> Response {
    let catalog = api.engine.catalog();
    (StatusCode::OK, axum::Json(&catalog.vehicles)).into_response()
}

pub(crate) async fn countries_handler(State(api): State<Arc<FreightApi>>) -> Response {
    let catalog = api.engine.catalog();
    (StatusCode::OK, axum::Json(&catalog.countries)).into_response()
}

pub(crate) async fn emission_factors_handler(State(api): State<Arc<FreightApi>>) -> Response {
    let emissions = &api.engine.catalog().emissions;
    let payload = json!({
        "methodology": METHODOLOGY,
        "road": emissions.road,
        "fuels": emissions.fuels,
        "grid_intensity": emissions.grid_intensity,
        "eu_grid_baseline": emissions.eu_grid_baseline,
        "distance_adjustment_factor": emissions.distance_adjustment_factor,
        "rating_thresholds": emissions.rating_thresholds,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
