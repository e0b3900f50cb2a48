use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::freight::catalog::ReferenceCatalog;
use crate::freight::domain::{Coordinate, CountryCode, ShipmentRequest, Stop};
use crate::freight::matching::{CarrierProfile, CarrierVehicle, ShipmentSummary};
use crate::freight::quote::{FreightEngine, LocationResolver};
use crate::freight::FuelType;

pub(super) const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
pub(super) const LYON: Coordinate = Coordinate::new(45.7640, 4.8357);
pub(super) const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);

/// Road distance Paris to Lyon: 391.5 km great circle times the 1.3 detour factor.
pub(super) const PARIS_LYON_KM: u32 = 509;

pub(super) struct FixtureCities;

impl LocationResolver for FixtureCities {
    fn resolve(&self, city: &str, _country: &CountryCode) -> Option<Coordinate> {
        match city.to_ascii_lowercase().as_str() {
            "paris" => Some(PARIS),
            "lyon" => Some(LYON),
            "berlin" => Some(BERLIN),
            _ => None,
        }
    }
}

pub(super) fn catalog() -> Arc<ReferenceCatalog> {
    Arc::new(ReferenceCatalog::standard())
}

pub(super) fn engine() -> FreightEngine {
    FreightEngine::new(catalog()).with_resolver(Arc::new(FixtureCities))
}

pub(super) fn paris_to_lyon(vehicle_class: &str, payload_weight_kg: f64) -> ShipmentRequest {
    ShipmentRequest::new(
        Stop::at(PARIS, "FR"),
        Stop::at(LYON, "FR"),
        vehicle_class,
        payload_weight_kg,
    )
}

pub(super) fn pickup_in_paris(payload_weight_kg: f64) -> ShipmentSummary {
    ShipmentSummary {
        pickup_city: Some("Paris".to_string()),
        pickup_coordinate: Some(PARIS),
        distance_km: Some(PARIS_LYON_KM),
        ..ShipmentSummary::new(payload_weight_kg)
    }
}

/// Carrier earning full marks on every factor for a Paris pickup.
pub(super) fn ideal_carrier(carrier_id: &str) -> CarrierProfile {
    CarrierProfile {
        name: Some("Seine Logistique".to_string()),
        vehicles: vec![CarrierVehicle::new("SEMI_TAUTLINER").running_on(FuelType::Hvo100)],
        base_city: Some("Paris".to_string()),
        base_coordinate: Some(PARIS),
        coverage_radius_km: Some(300),
        average_rating: Some(5.0),
        total_missions: 200,
        completed_missions: 200,
        has_hazmat_certification: true,
        has_refrigerated_capability: true,
        average_response_minutes: Some(15),
        ..CarrierProfile::new(carrier_id)
    }
}

/// Carrier with a suitable diesel truck and nothing else on record.
pub(super) fn newcomer(carrier_id: &str) -> CarrierProfile {
    CarrierProfile {
        vehicles: vec![CarrierVehicle::new("PORTEUR_19T")],
        ..CarrierProfile::new(carrier_id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
