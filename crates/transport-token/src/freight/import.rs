//! Carrier roster import from the marketplace CSV export.
//!
//! One row per carrier. The `vehicles` column lists vehicle class keys separated by `;`, each
//! optionally suffixed with the fuel actually used (`SEMI_TAUTLINER:hvo100`).

use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::catalog::ReferenceCatalog;
use super::domain::{Coordinate, FuelType};
use super::matching::{CarrierProfile, CarrierVehicle};

#[derive(Debug)]
pub enum CarrierImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for CarrierImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarrierImportError::Io(err) => write!(f, "failed to read carrier roster: {}", err),
            CarrierImportError::Csv(err) => write!(f, "invalid carrier CSV data: {}", err),
            CarrierImportError::InvalidRow { line, reason } => {
                write!(f, "carrier roster line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CarrierImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarrierImportError::Io(err) => Some(err),
            CarrierImportError::Csv(err) => Some(err),
            CarrierImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CarrierImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CarrierImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CarrierRosterImporter;

impl CarrierRosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &ReferenceCatalog,
    ) -> Result<Vec<CarrierProfile>, CarrierImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    /// Parses every row, rejecting vehicle classes the catalog does not know.
    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &ReferenceCatalog,
    ) -> Result<Vec<CarrierProfile>, CarrierImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut carriers = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|position| position.line()).unwrap_or(0);
            let row: CarrierRow = record.deserialize(Some(&headers))?;
            let profile = row
                .into_profile(catalog)
                .map_err(|reason| CarrierImportError::InvalidRow { line, reason })?;
            carriers.push(profile);
        }

        Ok(carriers)
    }
}

#[derive(Debug, Deserialize)]
struct CarrierRow {
    carrier_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    base_city: Option<String>,
    #[serde(default)]
    base_lat: Option<f64>,
    #[serde(default)]
    base_lon: Option<f64>,
    #[serde(default)]
    coverage_radius_km: Option<u32>,
    #[serde(default)]
    average_rating: Option<f64>,
    #[serde(default)]
    total_missions: Option<u32>,
    #[serde(default)]
    completed_missions: Option<u32>,
    #[serde(default, deserialize_with = "flag")]
    hazmat: bool,
    #[serde(default, deserialize_with = "flag")]
    refrigerated: bool,
    #[serde(default)]
    response_minutes: Option<u32>,
    #[serde(default)]
    vehicles: String,
}

impl CarrierRow {
    fn into_profile(self, catalog: &ReferenceCatalog) -> Result<CarrierProfile, String> {
        if self.carrier_id.is_empty() {
            return Err("carrier_id is empty".to_string());
        }

        let base_coordinate = match (self.base_lat, self.base_lon) {
            (Some(lat), Some(lon)) => {
                let coordinate = Coordinate::new(lat, lon);
                coordinate.validate().map_err(|err| err.to_string())?;
                Some(coordinate)
            }
            (None, None) => None,
            _ => return Err("base_lat and base_lon must be given together".to_string()),
        };

        if let Some(rating) = self.average_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(format!("average_rating {rating} outside 0-5"));
            }
        }

        let vehicles = self
            .vehicles
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| parse_vehicle(entry, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CarrierProfile {
            carrier_id: self.carrier_id,
            name: self.name,
            vehicles,
            base_city: self.base_city,
            base_coordinate,
            coverage_radius_km: self.coverage_radius_km,
            average_rating: self.average_rating,
            total_missions: self.total_missions.unwrap_or(0),
            completed_missions: self.completed_missions.unwrap_or(0),
            has_hazmat_certification: self.hazmat,
            has_refrigerated_capability: self.refrigerated,
            average_response_minutes: self.response_minutes,
        })
    }
}

fn parse_vehicle(entry: &str, catalog: &ReferenceCatalog) -> Result<CarrierVehicle, String> {
    let (class, fuel) = match entry.split_once(':') {
        Some((class, fuel)) => (class.trim(), Some(fuel)),
        None => (entry, None),
    };
    if catalog.vehicle(class).is_none() {
        return Err(format!("unknown vehicle class '{class}'"));
    }

    let vehicle = CarrierVehicle::new(class);
    match fuel {
        Some(raw) => {
            let fuel = raw.parse::<FuelType>().map_err(|err| err.to_string())?;
            Ok(vehicle.running_on(fuel))
        }
        None => Ok(vehicle),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
carrier_id,name,base_city,base_lat,base_lon,coverage_radius_km,average_rating,total_missions,completed_missions,hazmat,refrigerated,response_minutes,vehicles
TT-001,Rhone Express,Lyon,45.764,4.8357,300,4.9,620,612,yes,no,12,SEMI_TAUTLINER:hvo100;PORTEUR_19T
TT-002,,,,,,,,,,,,FOURGON_20M3
";

    #[test]
    fn parses_roster_rows() {
        let catalog = ReferenceCatalog::standard();
        let carriers =
            CarrierRosterImporter::from_reader(ROSTER.as_bytes(), &catalog).expect("roster parses");
        assert_eq!(carriers.len(), 2);

        let first = &carriers[0];
        assert_eq!(first.name.as_deref(), Some("Rhone Express"));
        assert_eq!(first.base_coordinate, Some(Coordinate::new(45.764, 4.8357)));
        assert!(first.has_hazmat_certification);
        assert!(!first.has_refrigerated_capability);
        assert_eq!(first.vehicles.len(), 2);
        assert_eq!(first.vehicles[0].fuel_type, Some(FuelType::Hvo100));
        assert_eq!(first.vehicles[1].fuel_type, None);

        let sparse = &carriers[1];
        assert_eq!(sparse.name, None);
        assert_eq!(sparse.average_rating, None);
        assert_eq!(sparse.total_missions, 0);
        assert_eq!(sparse.vehicles, vec![CarrierVehicle::new("FOURGON_20M3")]);
    }

    #[test]
    fn rejects_unknown_vehicle_class_with_line_number() {
        let catalog = ReferenceCatalog::standard();
        let data = "carrier_id,vehicles\nTT-009,HOVERCRAFT\n";
        let error = CarrierRosterImporter::from_reader(data.as_bytes(), &catalog)
            .expect_err("unknown class rejected");
        match error {
            CarrierImportError::InvalidRow { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("HOVERCRAFT"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_half_coordinates() {
        let catalog = ReferenceCatalog::standard();
        let data = "carrier_id,base_lat,vehicles\nTT-010,45.0,FOURGON_20M3\n";
        assert!(matches!(
            CarrierRosterImporter::from_reader(data.as_bytes(), &catalog),
            Err(CarrierImportError::InvalidRow { .. })
        ));
    }
}
