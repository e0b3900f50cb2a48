use serde::{Deserialize, Serialize};

use crate::freight::catalog::ReferenceCatalog;
use crate::freight::domain::{Coordinate, FuelType, ShipmentRequest};

/// A vehicle a carrier operates, keyed into the vehicle catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierVehicle {
    pub vehicle_class: String,
    /// Fuel actually used when it differs from the class default (e.g. a diesel truck on HVO).
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
}

impl CarrierVehicle {
    pub fn new(vehicle_class: impl Into<String>) -> Self {
        Self {
            vehicle_class: vehicle_class.into(),
            fuel_type: None,
        }
    }

    pub fn running_on(mut self, fuel: FuelType) -> Self {
        self.fuel_type = Some(fuel);
        self
    }
}

/// Carrier attributes supplied by the caller for a single match call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierProfile {
    pub carrier_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vehicles: Vec<CarrierVehicle>,
    #[serde(default)]
    pub base_city: Option<String>,
    #[serde(default)]
    pub base_coordinate: Option<Coordinate>,
    #[serde(default)]
    pub coverage_radius_km: Option<u32>,
    /// 0 to 5; `None` for carriers without ratings yet.
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_missions: u32,
    #[serde(default)]
    pub completed_missions: u32,
    #[serde(default)]
    pub has_hazmat_certification: bool,
    #[serde(default)]
    pub has_refrigerated_capability: bool,
    #[serde(default)]
    pub average_response_minutes: Option<u32>,
}

impl CarrierProfile {
    pub fn new(carrier_id: impl Into<String>) -> Self {
        Self {
            carrier_id: carrier_id.into(),
            name: None,
            vehicles: Vec::new(),
            base_city: None,
            base_coordinate: None,
            coverage_radius_km: None,
            average_rating: None,
            total_missions: 0,
            completed_missions: 0,
            has_hazmat_certification: false,
            has_refrigerated_capability: false,
            average_response_minutes: None,
        }
    }

    /// Share of missions completed, or `None` for carriers without history.
    pub fn completion_rate(&self) -> Option<f64> {
        if self.total_missions == 0 {
            return None;
        }
        let ratio = f64::from(self.completed_missions) / f64::from(self.total_missions);
        Some(ratio.min(1.0))
    }

    pub fn effective_fuels<'a>(
        &'a self,
        catalog: &'a ReferenceCatalog,
    ) -> impl Iterator<Item = FuelType> + 'a {
        self.vehicles.iter().filter_map(move |vehicle| {
            vehicle.fuel_type.or_else(|| {
                catalog
                    .vehicle(&vehicle.vehicle_class)
                    .map(|class| class.fuel_type)
            })
        })
    }

    pub fn has_low_carbon_vehicle(&self, catalog: &ReferenceCatalog) -> bool {
        self.effective_fuels(catalog).any(FuelType::is_low_carbon)
    }
}

/// The parts of a shipment that matter for carrier matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSummary {
    #[serde(default)]
    pub pickup_city: Option<String>,
    #[serde(default)]
    pub pickup_coordinate: Option<Coordinate>,
    #[serde(default)]
    pub distance_km: Option<u32>,
    pub payload_weight_kg: f64,
    #[serde(default)]
    pub requires_hazmat: bool,
    #[serde(default)]
    pub requires_refrigeration: bool,
}

impl ShipmentSummary {
    pub fn new(payload_weight_kg: f64) -> Self {
        Self {
            pickup_city: None,
            pickup_coordinate: None,
            distance_km: None,
            payload_weight_kg,
            requires_hazmat: false,
            requires_refrigeration: false,
        }
    }

    /// Derives a summary from a quote request; refrigeration follows the requested vehicle class.
    pub fn from_request(request: &ShipmentRequest, catalog: &ReferenceCatalog) -> Self {
        Self {
            pickup_city: request.pickup.city.clone(),
            pickup_coordinate: request.pickup.coordinate,
            distance_km: request.distance_km,
            payload_weight_kg: request.payload_weight_kg,
            requires_hazmat: request.modifiers.is_hazardous,
            requires_refrigeration: catalog
                .vehicle(&request.vehicle_class)
                .map(|class| class.refrigerated)
                .unwrap_or(false),
        }
    }
}
