//! Quote facade: the one call most collaborators need.
//!
//! [`FreightEngine`] resolves both stops to coordinates, estimates the road distance, prices the
//! shipment and computes its footprint. All collaborators are fixed at construction, so the
//! engine is shared read-only behind an `Arc` across request handlers.

use serde::Serialize;
use std::sync::Arc;

use super::catalog::ReferenceCatalog;
use super::domain::{Coordinate, CountryCode, EcoOption, EngineError, ShipmentRequest, Stop};
use super::emissions::{EmissionBreakdown, EmissionEngine, EmissionRequest};
use super::geo;
use super::matching::{CarrierProfile, MatchResult, MatchScorer, MatchWeights, ShipmentSummary};
use super::tariff::{DrivingEstimate, TariffBreakdown, TariffEngine};

/// Looks up a default coordinate for a city name.
pub trait LocationResolver: Send + Sync {
    fn resolve(&self, city: &str, country: &CountryCode) -> Option<Coordinate>;
}

/// Resolver for callers that always send coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLocationResolver;

impl LocationResolver for NoLocationResolver {
    fn resolve(&self, _city: &str, _country: &CountryCode) -> Option<Coordinate> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResult {
    pub vehicle_class: String,
    pub vehicle_label: String,
    pub distance_km: u32,
    pub duration: DrivingEstimate,
    pub tariff: TariffBreakdown,
    pub emissions: EmissionBreakdown,
    pub green_score: u8,
}

/// Composite 0-100 score rewarding green options and penalizing kg CO2e per km.
pub fn green_score(eco_option: EcoOption, total_kg: f64, distance_km: u32) -> u8 {
    let bonus = match eco_option {
        EcoOption::Standard => 0.0,
        EcoOption::Hvo => 15.0,
        EcoOption::Electric => 30.0,
    };
    let kg_per_km = if distance_km == 0 {
        0.0
    } else {
        total_kg / f64::from(distance_km)
    };
    let penalty = (kg_per_km * 30.0).min(20.0);
    (50.0 + bonus - penalty).round().clamp(0.0, 100.0) as u8
}

pub struct FreightEngine {
    catalog: Arc<ReferenceCatalog>,
    tariff: TariffEngine,
    emissions: EmissionEngine,
    matcher: MatchScorer,
    resolver: Arc<dyn LocationResolver>,
}

impl FreightEngine {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self {
            tariff: TariffEngine::new(Arc::clone(&catalog)),
            emissions: EmissionEngine::new(Arc::clone(&catalog)),
            matcher: MatchScorer::new(Arc::clone(&catalog), MatchWeights::default()),
            resolver: Arc::new(NoLocationResolver),
            catalog,
        }
    }

    pub fn with_match_weights(mut self, weights: MatchWeights) -> Self {
        self.matcher = MatchScorer::new(Arc::clone(&self.catalog), weights);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn LocationResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn compute_quote(&self, request: &ShipmentRequest) -> Result<QuoteResult, EngineError> {
        if !request.payload_weight_kg.is_finite() || request.payload_weight_kg < 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "payload weight must be non-negative, got {}",
                request.payload_weight_kg
            )));
        }
        let vehicle = self.catalog.vehicle(&request.vehicle_class).ok_or_else(|| {
            EngineError::UnknownVehicleCategory {
                vehicle_class: request.vehicle_class.clone(),
                category: None,
            }
        })?;

        let distance_km = self.route_distance(request)?;
        let tariff = self.tariff.price(
            distance_km,
            vehicle,
            &request.pickup.country,
            &request.delivery.country,
            &request.modifiers,
        )?;

        let mut emission_request = EmissionRequest::new(
            request.vehicle_class.clone(),
            f64::from(distance_km),
            request.payload_weight_kg,
        )
        .with_grid_country(request.pickup.country.clone());
        emission_request.fuel_override = Some(request.effective_fuel(vehicle.fuel_type));
        let emissions = self.emissions.emissions(&emission_request)?;

        let green_score = green_score(
            request.modifiers.eco_option,
            emissions.total_kg,
            distance_km,
        );

        Ok(QuoteResult {
            vehicle_class: request.vehicle_class.clone(),
            vehicle_label: vehicle.label.clone(),
            distance_km,
            duration: tariff.duration,
            tariff,
            emissions,
            green_score,
        })
    }

    pub fn compute_emissions(
        &self,
        request: &EmissionRequest,
    ) -> Result<EmissionBreakdown, EngineError> {
        self.emissions.emissions(request)
    }

    pub fn compute_match(&self, carrier: &CarrierProfile, shipment: &ShipmentSummary) -> MatchResult {
        self.matcher.score(carrier, shipment)
    }

    pub fn rank_carriers(
        &self,
        carriers: &[CarrierProfile],
        shipment: &ShipmentSummary,
        limit: usize,
    ) -> Vec<MatchResult> {
        self.matcher.rank(carriers, shipment, limit)
    }

    /// Road distance for a request: the supplied override, else the detoured geodesic estimate.
    pub fn route_distance(&self, request: &ShipmentRequest) -> Result<u32, EngineError> {
        let distance_km = match request.distance_km {
            Some(distance_km) => distance_km,
            None => {
                let from = self.locate(&request.pickup, "pickup")?;
                let to = self.locate(&request.delivery, "delivery")?;
                geo::distance_km(from, to)
            }
        };
        if distance_km == 0 {
            return Err(EngineError::InvalidInput(
                "pickup and delivery resolve to the same location".to_string(),
            ));
        }
        Ok(distance_km)
    }

    /// Matching view of a quote request, with the pickup resolved when possible.
    pub fn shipment_summary(&self, request: &ShipmentRequest) -> ShipmentSummary {
        let mut summary = ShipmentSummary::from_request(request, &self.catalog);
        if summary.pickup_coordinate.is_none() {
            summary.pickup_coordinate = self.locate(&request.pickup, "pickup").ok();
        }
        if summary.distance_km.is_none() {
            summary.distance_km = self.route_distance(request).ok();
        }
        summary
    }

    fn locate(&self, stop: &Stop, role: &str) -> Result<Coordinate, EngineError> {
        let coordinate = match (stop.coordinate, stop.city.as_deref()) {
            (Some(coordinate), _) => coordinate,
            (None, Some(city)) => self.resolver.resolve(city, &stop.country).ok_or_else(|| {
                EngineError::InvalidInput(format!(
                    "{role} city '{city}' ({}) has no known coordinate",
                    stop.country
                ))
            })?,
            (None, None) => {
                return Err(EngineError::InvalidInput(format!(
                    "{role} needs a coordinate or a city"
                )))
            }
        };
        coordinate.validate()?;
        Ok(coordinate)
    }
}
