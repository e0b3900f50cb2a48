//! Reference magnitudes: CNR cost coefficients, EU VAT/toll rates and GLEC v3.2 road factors.

use std::collections::BTreeMap;

use super::{
    CountryProfile, EmissionCatalog, EmissionFactor, RatingThresholds, TariffSchedule,
    VehicleClass,
};
use crate::freight::domain::{CountryCode, FuelType, Money, Rate};

struct VehicleRow {
    key: &'static str,
    label: &'static str,
    per_km_cents: i64,
    per_hour_cents: i64,
    per_day_cents: i64,
    speed_kmh: u32,
    capacity_kg: u32,
    category: &'static str,
    fuel: FuelType,
    refrigerated: bool,
}

const fn row(
    key: &'static str,
    label: &'static str,
    costs: (i64, i64, i64),
    speed_kmh: u32,
    capacity_kg: u32,
    category: &'static str,
    fuel: FuelType,
) -> VehicleRow {
    VehicleRow {
        key,
        label,
        per_km_cents: costs.0,
        per_hour_cents: costs.1,
        per_day_cents: costs.2,
        speed_kmh,
        capacity_kg,
        category,
        fuel,
        refrigerated: false,
    }
}

const ELECTRIC: FuelType = FuelType::Electric;
const DIESEL: FuelType = FuelType::DieselB7;

const VEHICLE_ROWS: [VehicleRow; 16] = [
    row("VELO_CARGO", "Cargo bike", (10, 1_500, 5_000), 20, 150, "cargo_bike", ELECTRIC),
    row("SCOOTER_ELEC", "Electric scooter", (15, 1_500, 5_000), 30, 50, "scooter_electric", ELECTRIC),
    row("VUL_ELECTRIQUE", "Electric light van", (55, 2_600, 12_500), 60, 1_200, "van_electric", ELECTRIC),
    row("FOURGONNETTE", "Small van", (52, 2_400, 9_500), 55, 800, "van_diesel", DIESEL),
    row("FOURGON_12M3", "Van 12m3", (65, 2_600, 11_500), 60, 1_200, "van_diesel", DIESEL),
    row("FOURGON_20M3", "Van 20m3", (78, 2_800, 13_500), 65, 1_800, "rigid_7t5", DIESEL),
    row("PORTEUR_7T5", "Rigid 7.5t", (92, 3_200, 18_500), 70, 4_500, "rigid_7t5", DIESEL),
    row("PORTEUR_12T", "Rigid 12t", (105, 3_500, 21_500), 70, 7_500, "rigid_12t", DIESEL),
    row("PORTEUR_19T", "Rigid 19t", (118, 3_800, 24_500), 70, 12_000, "rigid_19t", DIESEL),
    row("PORTEUR_ELEC", "Electric rigid", (90, 3_200, 18_000), 65, 7_000, "rigid_electric", ELECTRIC),
    row("SEMI_TAUTLINER", "Tautliner semi-trailer", (135, 4_200, 29_500), 80, 24_000, "artic_general", DIESEL),
    VehicleRow {
        refrigerated: true,
        ..row("SEMI_FRIGO", "Refrigerated semi-trailer", (175, 4_800, 36_500), 80, 22_000, "artic_frigo", DIESEL)
    },
    row("SEMI_BENNE", "Tipper semi-trailer", (140, 4_300, 30_500), 75, 26_000, "artic_general", DIESEL),
    row("SEMI_CITERNE", "Tanker semi-trailer", (150, 4_500, 32_500), 75, 25_000, "artic_general", DIESEL),
    row("MEGA_TRAILER", "Mega trailer", (145, 4_400, 31_000), 80, 25_000, "artic_mega", DIESEL),
    row("ELECTRIQUE_FOURGON", "Electric van", (55, 2_600, 12_500), 60, 1_200, "van_electric", ELECTRIC),
];

pub(super) fn vehicles() -> BTreeMap<String, VehicleClass> {
    VEHICLE_ROWS
        .iter()
        .map(|row| {
            (
                row.key.to_string(),
                VehicleClass {
                    label: row.label.to_string(),
                    cost_per_km: Money::from_cents(row.per_km_cents),
                    cost_per_hour: Money::from_cents(row.per_hour_cents),
                    cost_per_day: Money::from_cents(row.per_day_cents),
                    emission_category: row.category.to_string(),
                    cruise_speed_kmh: row.speed_kmh,
                    payload_capacity_kg: row.capacity_kg,
                    fuel_type: row.fuel,
                    refrigerated: row.refrigerated,
                },
            )
        })
        .collect()
}

/// (code, label, VAT basis points, toll cents per km)
const COUNTRY_ROWS: [(&str, &str, u32, i64); 30] = [
    ("FR", "France", 2_000, 15),
    ("DE", "Germany", 1_900, 35),
    ("BE", "Belgium", 2_100, 12),
    ("ES", "Spain", 2_100, 10),
    ("IT", "Italy", 2_200, 12),
    ("NL", "Netherlands", 2_100, 0),
    ("GB", "United Kingdom", 2_000, 5),
    ("PL", "Poland", 2_300, 8),
    ("PT", "Portugal", 2_300, 8),
    ("AT", "Austria", 2_000, 20),
    ("CH", "Switzerland", 770, 25),
    ("LU", "Luxembourg", 1_700, 0),
    ("CZ", "Czechia", 2_100, 10),
    ("SE", "Sweden", 2_500, 5),
    ("DK", "Denmark", 2_500, 10),
    ("NO", "Norway", 2_500, 15),
    ("FI", "Finland", 2_400, 5),
    ("RO", "Romania", 1_900, 6),
    ("HU", "Hungary", 2_700, 10),
    ("SK", "Slovakia", 2_000, 9),
    ("SI", "Slovenia", 2_200, 8),
    ("HR", "Croatia", 2_500, 7),
    ("BG", "Bulgaria", 2_000, 5),
    ("GR", "Greece", 2_400, 6),
    ("IE", "Ireland", 2_300, 5),
    ("EE", "Estonia", 2_200, 0),
    ("LV", "Latvia", 2_100, 0),
    ("LT", "Lithuania", 2_100, 0),
    ("MT", "Malta", 1_800, 0),
    ("CY", "Cyprus", 1_900, 0),
];

pub(super) fn countries() -> BTreeMap<CountryCode, CountryProfile> {
    COUNTRY_ROWS
        .iter()
        .map(|(code, label, vat, toll)| {
            (
                CountryCode::new(code),
                CountryProfile {
                    label: label.to_string(),
                    vat_rate: Rate::from_basis_points(*vat),
                    toll_rate_per_km: Money::from_cents(*toll),
                },
            )
        })
        .collect()
}

pub(super) fn tariff_schedule() -> TariffSchedule {
    TariffSchedule {
        urgent: Rate::from_basis_points(5_000),
        weekend: Rate::from_basis_points(3_500),
        night: Rate::from_basis_points(2_000),
        hazardous: Rate::from_basis_points(2_500),
        hvo_discount: Rate::from_basis_points(1_500),
        electric_discount: Rate::from_basis_points(3_000),
    }
}

/// (category, WTW, TTW, WTT, grid powered)
const ROAD_ROWS: [(&str, f64, f64, f64, bool); 11] = [
    ("van_diesel", 299.0, 245.0, 54.0, false),
    ("van_electric", 24.8, 0.0, 24.8, true),
    ("rigid_7t5", 187.0, 153.0, 34.0, false),
    ("rigid_12t", 130.0, 106.0, 24.0, false),
    ("rigid_19t", 101.0, 83.0, 18.0, false),
    ("rigid_electric", 18.6, 0.0, 18.6, true),
    ("artic_general", 62.0, 51.0, 11.0, false),
    ("artic_frigo", 81.0, 66.0, 15.0, false),
    ("artic_mega", 55.0, 45.0, 10.0, false),
    ("cargo_bike", 0.0, 0.0, 0.0, false),
    ("scooter_electric", 0.0, 0.0, 0.0, true),
];

const FUEL_FACTORS: [(FuelType, f64); 7] = [
    (FuelType::DieselB7, 1.00),
    (FuelType::Hvo100, 0.10),
    (FuelType::B100, 0.35),
    (FuelType::Lng, 0.80),
    (FuelType::BioLng, 0.15),
    (FuelType::Electric, 0.00),
    (FuelType::Hydrogen, 0.05),
];

const GRID_INTENSITY: [(&str, f64); 17] = [
    ("FR", 56.0),
    ("DE", 385.0),
    ("BE", 167.0),
    ("NL", 386.0),
    ("IT", 332.0),
    ("ES", 206.0),
    ("PT", 219.0),
    ("AT", 107.0),
    ("CH", 26.0),
    ("PL", 700.0),
    ("SE", 41.0),
    ("NO", 19.0),
    ("DK", 117.0),
    ("FI", 97.0),
    ("CZ", 421.0),
    ("GB", 231.0),
    ("LU", 100.0),
];

pub(super) fn emission_catalog() -> EmissionCatalog {
    EmissionCatalog {
        road: ROAD_ROWS
            .iter()
            .map(|(category, wtw, ttw, wtt, grid_powered)| {
                (
                    category.to_string(),
                    EmissionFactor {
                        well_to_wheel: *wtw,
                        tank_to_wheel: *ttw,
                        well_to_tank: *wtt,
                        grid_powered: *grid_powered,
                    },
                )
            })
            .collect(),
        fuels: FUEL_FACTORS.into_iter().collect(),
        grid_intensity: GRID_INTENSITY
            .iter()
            .map(|(code, intensity)| (CountryCode::new(code), *intensity))
            .collect(),
        eu_grid_baseline: 260.0,
        distance_adjustment_factor: 1.05,
        rating_thresholds: RatingThresholds {
            a_plus: 10.0,
            a: 50.0,
            b: 150.0,
            c: 300.0,
            d: 500.0,
        },
    }
}
