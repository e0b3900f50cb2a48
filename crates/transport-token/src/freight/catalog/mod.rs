//! Immutable reference tables injected into the engines.
//!
//! A catalog is built once (either [`ReferenceCatalog::standard`] or a JSON document) and shared
//! behind an `Arc`; nothing in the engine mutates it afterwards.

mod standard;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::domain::{CountryCode, EcoOption, FuelType, Money, Rate, SurchargeKind};

/// Cost and capability profile of a vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClass {
    pub label: String,
    pub cost_per_km: Money,
    pub cost_per_hour: Money,
    pub cost_per_day: Money,
    pub emission_category: String,
    pub cruise_speed_kmh: u32,
    pub payload_capacity_kg: u32,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub refrigerated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub label: String,
    pub vat_rate: Rate,
    pub toll_rate_per_km: Money,
}

/// Surcharge and eco-discount rates applied on top of the trinome base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffSchedule {
    pub urgent: Rate,
    pub weekend: Rate,
    pub night: Rate,
    pub hazardous: Rate,
    pub hvo_discount: Rate,
    pub electric_discount: Rate,
}

impl TariffSchedule {
    pub fn surcharge_rate(&self, kind: SurchargeKind) -> Rate {
        match kind {
            SurchargeKind::Urgent => self.urgent,
            SurchargeKind::Weekend => self.weekend,
            SurchargeKind::Night => self.night,
            SurchargeKind::Hazardous => self.hazardous,
        }
    }

    pub fn eco_discount_rate(&self, option: EcoOption) -> Rate {
        match option {
            EcoOption::Standard => Rate::ZERO,
            EcoOption::Hvo => self.hvo_discount,
            EcoOption::Electric => self.electric_discount,
        }
    }
}

/// GLEC road emission intensity in grams CO2e per tonne-kilometer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub well_to_wheel: f64,
    pub tank_to_wheel: f64,
    pub well_to_tank: f64,
    /// Battery-electric categories scale with the grid intensity of the charging country.
    #[serde(default)]
    pub grid_powered: bool,
}

impl EmissionFactor {
    pub fn is_zero_emission(&self) -> bool {
        self.well_to_wheel <= 0.0
    }

    pub fn tank_to_wheel_share(&self) -> f64 {
        if self.is_zero_emission() {
            0.0
        } else {
            self.tank_to_wheel / self.well_to_wheel
        }
    }

    pub fn well_to_tank_share(&self) -> f64 {
        if self.is_zero_emission() {
            0.0
        } else {
            self.well_to_tank / self.well_to_wheel
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarbonRating {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    E,
}

impl CarbonRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

/// Upper bounds (exclusive, kg CO2e) of each letter band; anything above `d` rates E.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub a_plus: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl RatingThresholds {
    pub fn rate(&self, total_kg: f64) -> CarbonRating {
        if total_kg < self.a_plus {
            CarbonRating::APlus
        } else if total_kg < self.a {
            CarbonRating::A
        } else if total_kg < self.b {
            CarbonRating::B
        } else if total_kg < self.c {
            CarbonRating::C
        } else if total_kg < self.d {
            CarbonRating::D
        } else {
            CarbonRating::E
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionCatalog {
    pub road: BTreeMap<String, EmissionFactor>,
    /// Multiplier on the diesel well-to-wheel baseline per fuel.
    pub fuels: BTreeMap<FuelType, f64>,
    /// Grid carbon intensity in g CO2e/kWh per country.
    pub grid_intensity: BTreeMap<CountryCode, f64>,
    pub eu_grid_baseline: f64,
    pub distance_adjustment_factor: f64,
    pub rating_thresholds: RatingThresholds,
}

impl EmissionCatalog {
    /// Grid scaling relative to the EU baseline; unknown or absent countries use the baseline.
    pub fn grid_ratio(&self, country: Option<&CountryCode>) -> f64 {
        let intensity = country
            .and_then(|code| self.grid_intensity.get(code))
            .copied()
            .unwrap_or(self.eu_grid_baseline);
        intensity / self.eu_grid_baseline
    }
}

/// Every static table the engines consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    pub vehicles: BTreeMap<String, VehicleClass>,
    pub countries: BTreeMap<CountryCode, CountryProfile>,
    pub tariff: TariffSchedule,
    pub emissions: EmissionCatalog,
}

impl ReferenceCatalog {
    pub fn standard() -> Self {
        Self {
            vehicles: standard::vehicles(),
            countries: standard::countries(),
            tariff: standard::tariff_schedule(),
            emissions: standard::emission_catalog(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn vehicle(&self, key: &str) -> Option<&VehicleClass> {
        self.vehicles.get(key)
    }

    pub fn country(&self, code: &CountryCode) -> Option<&CountryProfile> {
        self.countries.get(code)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.vehicles.is_empty() {
            return Err(CatalogError::Invalid("catalog defines no vehicle classes".to_string()));
        }
        for (key, vehicle) in &self.vehicles {
            if vehicle.cruise_speed_kmh == 0 {
                return Err(CatalogError::Invalid(format!(
                    "vehicle class {key} has a zero cruise speed"
                )));
            }
            if [vehicle.cost_per_km, vehicle.cost_per_hour, vehicle.cost_per_day]
                .iter()
                .any(|cost| cost.is_negative())
            {
                return Err(CatalogError::Invalid(format!(
                    "vehicle class {key} has a negative cost coefficient"
                )));
            }
            if !self.emissions.road.contains_key(&vehicle.emission_category) {
                return Err(CatalogError::Invalid(format!(
                    "vehicle class {key} references unknown emission category {}",
                    vehicle.emission_category
                )));
            }
        }
        if let Some((code, _)) = self
            .countries
            .iter()
            .find(|(_, country)| country.toll_rate_per_km.is_negative())
        {
            return Err(CatalogError::Invalid(format!(
                "country {code} has a negative toll rate"
            )));
        }
        for (option, rate) in [
            ("hvo", self.tariff.hvo_discount),
            ("electric", self.tariff.electric_discount),
        ] {
            if rate > Rate::from_basis_points(10_000) {
                return Err(CatalogError::Invalid(format!(
                    "{option} discount of {rate} exceeds 100%"
                )));
            }
        }
        if let Some((fuel, _)) = self
            .emissions
            .fuels
            .iter()
            .find(|(_, factor)| !(**factor >= 0.0))
        {
            return Err(CatalogError::Invalid(format!(
                "fuel {fuel} has a negative adjustment factor"
            )));
        }
        if let Some((code, _)) = self
            .emissions
            .grid_intensity
            .iter()
            .find(|(_, intensity)| !(**intensity >= 0.0))
        {
            return Err(CatalogError::Invalid(format!(
                "grid intensity for {code} is negative"
            )));
        }
        if !(self.emissions.eu_grid_baseline > 0.0) {
            return Err(CatalogError::Invalid(
                "EU grid baseline must be positive".to_string(),
            ));
        }
        if !(self.emissions.distance_adjustment_factor >= 1.0) {
            return Err(CatalogError::Invalid(
                "distance adjustment factor must be at least 1.0".to_string(),
            ));
        }
        if let Some((category, _)) = self.emissions.road.iter().find(|(_, factor)| {
            factor.well_to_wheel < 0.0 || factor.tank_to_wheel < 0.0 || factor.well_to_tank < 0.0
        }) {
            return Err(CatalogError::Invalid(format!(
                "emission category {category} has a negative factor"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog rejected: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_catalog_is_consistent() {
        let catalog = ReferenceCatalog::standard();
        catalog.validate().expect("standard catalog validates");
        assert_eq!(catalog.vehicles.len(), 16);
        assert_eq!(catalog.countries.len(), 30);
        assert_eq!(
            catalog
                .country(&CountryCode::new("ch"))
                .expect("switzerland present")
                .vat_rate,
            Rate::from_basis_points(770)
        );
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = ReferenceCatalog::standard();
        let json = serde_json::to_vec(&catalog).expect("catalog serializes");
        let loaded = ReferenceCatalog::from_reader(Cursor::new(json)).expect("catalog loads");
        assert_eq!(loaded.vehicles, catalog.vehicles);
        assert_eq!(loaded.countries, catalog.countries);
        assert_eq!(loaded.tariff, catalog.tariff);
        assert!(loaded
            .emissions
            .road
            .keys()
            .eq(catalog.emissions.road.keys()));
        assert!(loaded.emissions.fuels.keys().eq(catalog.emissions.fuels.keys()));
    }

    #[test]
    fn loading_rejects_dangling_emission_category() {
        let mut catalog = ReferenceCatalog::standard();
        catalog.emissions.road.remove("artic_frigo");
        let json = serde_json::to_vec(&catalog).expect("catalog serializes");

        let err = ReferenceCatalog::from_reader(Cursor::new(json)).expect_err("dangling category");
        assert!(err.to_string().contains("artic_frigo"));
    }

    #[test]
    fn loading_rejects_values_that_would_price_below_zero() {
        let mut negative_cost = ReferenceCatalog::standard();
        negative_cost
            .vehicles
            .get_mut("PORTEUR_7T5")
            .expect("rigid class exists")
            .cost_per_hour = Money::from_cents(-1);

        let mut negative_toll = ReferenceCatalog::standard();
        negative_toll
            .countries
            .get_mut(&CountryCode::new("DE"))
            .expect("germany present")
            .toll_rate_per_km = Money::from_cents(-35);

        let mut oversized_discount = ReferenceCatalog::standard();
        oversized_discount.tariff.electric_discount = Rate::from_basis_points(12_000);

        let mut negative_fuel = ReferenceCatalog::standard();
        negative_fuel.emissions.fuels.insert(FuelType::B100, -0.35);

        for (catalog, fragment) in [
            (negative_cost, "PORTEUR_7T5"),
            (negative_toll, "DE"),
            (oversized_discount, "electric"),
            (negative_fuel, "b100"),
        ] {
            let json = serde_json::to_vec(&catalog).expect("catalog serializes");
            let err = ReferenceCatalog::from_reader(Cursor::new(json))
                .expect_err("out-of-range catalog rejected");
            assert!(
                matches!(err, CatalogError::Invalid(_)) && err.to_string().contains(fragment),
                "unexpected error {err}"
            );
        }
    }

    #[test]
    fn rating_thresholds_follow_letter_bands() {
        let thresholds = ReferenceCatalog::standard().emissions.rating_thresholds;
        assert_eq!(thresholds.rate(0.0), CarbonRating::APlus);
        assert_eq!(thresholds.rate(10.0), CarbonRating::A);
        assert_eq!(thresholds.rate(149.9), CarbonRating::B);
        assert_eq!(thresholds.rate(299.0), CarbonRating::C);
        assert_eq!(thresholds.rate(499.9), CarbonRating::D);
        assert_eq!(thresholds.rate(500.0), CarbonRating::E);
    }
}
