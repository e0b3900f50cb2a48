use crate::cities::CityDirectory;
use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use transport_token::freight::{freight_router, Coordinate, FreightEngine};

#[derive(Debug, Serialize)]
pub(crate) struct CityView {
    pub(crate) name: &'static str,
    pub(crate) country: &'static str,
    pub(crate) coordinate: Coordinate,
}

pub(crate) fn with_service_routes(engine: Arc<FreightEngine>, match_limit: usize) -> axum::Router {
    freight_router(engine, match_limit)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/cities", axum::routing::get(cities_endpoint))
        .route("/api/v1/cities/:name", axum::routing::get(city_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now().to_rfc3339() }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cities_endpoint() -> Json<Vec<CityView>> {
    Json(CityDirectory.cities().iter().map(city_view).collect())
}

pub(crate) async fn city_endpoint(Path(name): Path<String>) -> impl IntoResponse {
    match CityDirectory.lookup(&name) {
        Some(known) => (StatusCode::OK, Json(json!(city_view(known)))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown city '{}'", name) })),
        ),
    }
}

fn city_view(known: &crate::cities::KnownCity) -> CityView {
    CityView {
        name: known.name,
        country: known.country,
        coordinate: known.coordinate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_engine;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        with_service_routes(load_engine(None).expect("standard engine"), 20)
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("valid json")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok_with_timestamp() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], json!("ok"));
        assert!(body["timestamp"].as_str().is_some());
    }

    #[tokio::test]
    async fn city_names_resolve_in_quotes() {
        let request = Request::post("/api/v1/quotes")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "pickup": { "city": "Paris", "country": "FR" },
                    "delivery": { "city": "Marseille", "country": "FR" },
                    "vehicle_class": "PORTEUR_12T",
                    "payload_weight_kg": 5000.0,
                })
                .to_string(),
            ))
            .expect("request builds");

        let response = router().oneshot(request).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["distance_km"], json!(859));
        assert_eq!(body["tariff"]["vat_country"], json!("FR"));
    }

    #[tokio::test]
    async fn city_routes_list_and_lookup() {
        let listing = router()
            .oneshot(
                Request::get("/api/v1/cities")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let listing = read_json(listing).await;
        assert_eq!(listing.as_array().map(Vec::len), Some(30));

        let found = router()
            .oneshot(
                Request::get("/api/v1/cities/bruxelles")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(found.status(), StatusCode::OK);
        let found = read_json(found).await;
        assert_eq!(found["name"], json!("Brussels"));
        assert_eq!(found["country"], json!("BE"));

        let missing = router()
            .oneshot(
                Request::get("/api/v1/cities/atlantis")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
