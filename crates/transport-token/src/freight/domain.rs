use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Monetary amount in minor currency units (euro cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Rounds a fractional cent amount to the nearest cent, half away from zero.
    pub fn round_from_cents(cents: f64) -> Self {
        Self(cents.round() as i64)
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::round_from_cents(self.0 as f64 * factor)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Percentage expressed in basis points (`2000` is 20 %).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    pub const ZERO: Rate = Rate(0);

    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self(basis_points)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Applies the rate to an amount with integer arithmetic, rounding half away from zero.
    pub fn apply(self, amount: Money) -> Money {
        let product = i128::from(amount.cents()) * i128::from(self.0);
        let rounded = if product >= 0 {
            (product + 5_000) / 10_000
        } else {
            (product - 5_000) / 10_000
        };
        Money::from_cents(rounded as i64)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "coordinate ({}, {}) is not finite",
                self.lat, self.lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(EngineError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(EngineError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

/// ISO 3166 alpha-2 code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CountryCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CountryCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    DieselB7,
    Hvo100,
    B100,
    #[serde(alias = "gnl")]
    Lng,
    #[serde(alias = "bio_gnl")]
    BioLng,
    Electric,
    Hydrogen,
}

impl FuelType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::DieselB7,
            Self::Hvo100,
            Self::B100,
            Self::Lng,
            Self::BioLng,
            Self::Electric,
            Self::Hydrogen,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DieselB7 => "diesel_b7",
            Self::Hvo100 => "hvo100",
            Self::B100 => "b100",
            Self::Lng => "lng",
            Self::BioLng => "bio_lng",
            Self::Electric => "electric",
            Self::Hydrogen => "hydrogen",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DieselB7 => "Diesel B7",
            Self::Hvo100 => "HVO100",
            Self::B100 => "Biodiesel B100",
            Self::Lng => "LNG",
            Self::BioLng => "Bio-LNG",
            Self::Electric => "Electric",
            Self::Hydrogen => "Green hydrogen",
        }
    }

    /// Whether a powertrain built for `base` can run on this fuel.
    pub const fn is_drop_in_for(self, base: FuelType) -> bool {
        matches!(
            (base, self),
            (
                Self::DieselB7 | Self::Hvo100 | Self::B100,
                Self::DieselB7 | Self::Hvo100 | Self::B100
            ) | (Self::Lng | Self::BioLng, Self::Lng | Self::BioLng)
                | (Self::Electric, Self::Electric)
                | (Self::Hydrogen, Self::Hydrogen)
        )
    }

    /// Fuels that earn eco-capability credit in carrier matching.
    pub const fn is_low_carbon(self) -> bool {
        !matches!(self, Self::DieselB7 | Self::Lng)
    }
}

impl FromStr for FuelType {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let fuel = match normalized.as_str() {
            "gnl" => Self::Lng,
            "bio_gnl" => Self::BioLng,
            other => Self::ordered()
                .into_iter()
                .find(|fuel| fuel.key() == other)
                .ok_or_else(|| EngineError::InvalidInput(format!("unknown fuel type '{raw}'")))?,
        };
        Ok(fuel)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Shipper-selected green option; mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoOption {
    #[default]
    Standard,
    Hvo,
    Electric,
}

impl EcoOption {
    /// Fuel implied by the option when the request carries no explicit override.
    pub const fn implied_fuel(self) -> Option<FuelType> {
        match self {
            Self::Standard => None,
            Self::Hvo => Some(FuelType::Hvo100),
            Self::Electric => Some(FuelType::Electric),
        }
    }
}

impl FromStr for EcoOption {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" | "" => Ok(Self::Standard),
            "hvo" => Ok(Self::Hvo),
            "electric" => Ok(Self::Electric),
            _ => Err(EngineError::InvalidInput(format!(
                "unknown eco option '{raw}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeKind {
    Urgent,
    Weekend,
    Night,
    Hazardous,
}

impl SurchargeKind {
    pub const fn ordered() -> [Self; 4] {
        [Self::Urgent, Self::Weekend, Self::Night, Self::Hazardous]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Weekend => "Weekend",
            Self::Night => "Night",
            Self::Hazardous => "Hazardous goods (ADR)",
        }
    }
}

/// Boolean and enum switches that alter the price of a shipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffModifiers {
    pub is_urgent: bool,
    pub is_weekend: bool,
    pub is_night: bool,
    #[serde(alias = "is_adr")]
    pub is_hazardous: bool,
    pub eco_option: EcoOption,
}

impl TariffModifiers {
    pub fn applies(&self, kind: SurchargeKind) -> bool {
        match kind {
            SurchargeKind::Urgent => self.is_urgent,
            SurchargeKind::Weekend => self.is_weekend,
            SurchargeKind::Night => self.is_night,
            SurchargeKind::Hazardous => self.is_hazardous,
        }
    }
}

/// One end of a shipment. A missing coordinate is resolved from the city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub city: Option<String>,
    pub country: CountryCode,
}

impl Stop {
    pub fn at(coordinate: Coordinate, country: impl Into<CountryCode>) -> Self {
        Self {
            coordinate: Some(coordinate),
            city: None,
            country: country.into(),
        }
    }

    pub fn city(city: impl Into<String>, country: impl Into<CountryCode>) -> Self {
        Self {
            coordinate: None,
            city: Some(city.into()),
            country: country.into(),
        }
    }
}

/// Shipment description consumed once per quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub pickup: Stop,
    pub delivery: Stop,
    pub vehicle_class: String,
    pub payload_weight_kg: f64,
    #[serde(flatten)]
    pub modifiers: TariffModifiers,
    #[serde(default)]
    pub fuel_override: Option<FuelType>,
    /// Pre-computed road distance; skips the geodesic estimate when present.
    #[serde(default)]
    pub distance_km: Option<u32>,
}

impl ShipmentRequest {
    pub fn new(pickup: Stop, delivery: Stop, vehicle_class: impl Into<String>, payload_weight_kg: f64) -> Self {
        Self {
            pickup,
            delivery,
            vehicle_class: vehicle_class.into(),
            payload_weight_kg,
            modifiers: TariffModifiers::default(),
            fuel_override: None,
            distance_km: None,
        }
    }

    /// Fuel used for emissions on a vehicle built for `default_fuel`. The explicit override
    /// wins; the eco option only switches fuel when the vehicle can run on it.
    pub fn effective_fuel(&self, default_fuel: FuelType) -> FuelType {
        self.fuel_override
            .or_else(|| {
                self.modifiers
                    .eco_option
                    .implied_fuel()
                    .filter(|fuel| fuel.is_drop_in_for(default_fuel))
            })
            .unwrap_or(default_fuel)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{}", unknown_category_message(.vehicle_class, .category.as_deref()))]
    UnknownVehicleCategory {
        vehicle_class: String,
        category: Option<String>,
    },
}

fn unknown_category_message(vehicle_class: &str, category: Option<&str>) -> String {
    match category {
        Some(category) => format!(
            "vehicle class '{vehicle_class}' maps to emission category '{category}' which has no catalog entry"
        ),
        None => format!("vehicle class '{vehicle_class}' has no catalog entry"),
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub(crate) fn serialize_tenths<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

pub(crate) fn serialize_hundredths<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}
