//! GLEC Framework v3 / ISO 14083 well-to-wheel emissions for road freight.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::catalog::{CarbonRating, ReferenceCatalog};
use super::domain::{serialize_hundredths, serialize_tenths, CountryCode, EngineError, FuelType};

pub const METHODOLOGY: &str = "GLEC Framework v3.2 / ISO 14083:2023 (well-to-wheel)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRequest {
    pub vehicle_class: String,
    pub distance_km: f64,
    pub payload_weight_kg: f64,
    #[serde(default)]
    pub fuel_override: Option<FuelType>,
    #[serde(default)]
    pub grid_country: Option<CountryCode>,
}

impl EmissionRequest {
    pub fn new(vehicle_class: impl Into<String>, distance_km: f64, payload_weight_kg: f64) -> Self {
        Self {
            vehicle_class: vehicle_class.into(),
            distance_km,
            payload_weight_kg,
            fuel_override: None,
            grid_country: None,
        }
    }

    pub fn with_fuel(mut self, fuel: FuelType) -> Self {
        self.fuel_override = Some(fuel);
        self
    }

    pub fn with_grid_country(mut self, country: impl Into<CountryCode>) -> Self {
        self.grid_country = Some(country.into());
        self
    }
}

/// Computed footprint. Values are kept unrounded; serialization rounds for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionBreakdown {
    pub vehicle_class: String,
    pub category: String,
    pub fuel: FuelType,
    pub methodology: &'static str,
    pub distance_adjustment_factor: f64,
    #[serde(serialize_with = "serialize_tenths")]
    pub adjusted_distance_km: f64,
    #[serde(serialize_with = "serialize_tenths")]
    pub total_kg: f64,
    #[serde(serialize_with = "serialize_tenths")]
    pub tank_to_wheel_kg: f64,
    #[serde(serialize_with = "serialize_tenths")]
    pub well_to_tank_kg: f64,
    /// Effective well-to-wheel intensity in g CO2e per tonne-km.
    #[serde(serialize_with = "serialize_hundredths")]
    pub intensity_g_per_tkm: f64,
    pub rating: CarbonRating,
}

pub struct EmissionEngine {
    catalog: Arc<ReferenceCatalog>,
}

impl EmissionEngine {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn emissions(&self, request: &EmissionRequest) -> Result<EmissionBreakdown, EngineError> {
        if !request.distance_km.is_finite() || request.distance_km <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "distance must be positive, got {}",
                request.distance_km
            )));
        }
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
        let category = &vehicle.emission_category;
        let factor = self.catalog.emissions.road.get(category).ok_or_else(|| {
            EngineError::UnknownVehicleCategory {
                vehicle_class: request.vehicle_class.clone(),
                category: Some(category.clone()),
            }
        })?;

        let emissions = &self.catalog.emissions;
        let fuel = request.fuel_override.unwrap_or(vehicle.fuel_type);
        if fuel == FuelType::Electric && !factor.grid_powered && !factor.is_zero_emission() {
            return Err(EngineError::InvalidInput(format!(
                "vehicle class {} ({category}) is not grid powered and cannot run on electric",
                request.vehicle_class
            )));
        }
        let intensity = if factor.is_zero_emission() {
            0.0
        } else if factor.grid_powered {
            factor.well_to_wheel * emissions.grid_ratio(request.grid_country.as_ref())
        } else {
            let ratio = emissions.fuels.get(&fuel).copied().ok_or_else(|| {
                EngineError::InvalidInput(format!("no adjustment factor configured for fuel {fuel}"))
            })?;
            factor.well_to_wheel * ratio
        };

        let adjusted_distance_km = request.distance_km * emissions.distance_adjustment_factor;
        let tonnes = request.payload_weight_kg / 1000.0;
        let total_kg = intensity * tonnes * adjusted_distance_km / 1000.0;

        Ok(EmissionBreakdown {
            vehicle_class: request.vehicle_class.clone(),
            category: category.clone(),
            fuel,
            methodology: METHODOLOGY,
            distance_adjustment_factor: emissions.distance_adjustment_factor,
            adjusted_distance_km,
            total_kg,
            tank_to_wheel_kg: total_kg * factor.tank_to_wheel_share(),
            well_to_tank_kg: total_kg * factor.well_to_tank_share(),
            intensity_g_per_tkm: intensity,
            rating: emissions.rating_thresholds.rate(total_kg),
        })
    }
}
