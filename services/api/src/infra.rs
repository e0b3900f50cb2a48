use crate::cities::CityDirectory;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use transport_token::error::AppError;
use transport_token::freight::{Coordinate, FreightEngine, ReferenceCatalog};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference tables from a JSON document when one is configured, else the built-in set.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ReferenceCatalog, AppError> {
    match path {
        Some(path) => {
            let catalog = ReferenceCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                vehicles = catalog.vehicles.len(),
                countries = catalog.countries.len(),
                "loaded reference catalog"
            );
            Ok(catalog)
        }
        None => Ok(ReferenceCatalog::standard()),
    }
}

pub(crate) fn build_engine(catalog: ReferenceCatalog) -> Arc<FreightEngine> {
    Arc::new(FreightEngine::new(Arc::new(catalog)).with_resolver(Arc::new(CityDirectory)))
}

pub(crate) fn load_engine(catalog_path: Option<&Path>) -> Result<Arc<FreightEngine>, AppError> {
    load_catalog(catalog_path).map(build_engine)
}

pub(crate) fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon' but got '{raw}'"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse latitude in '{raw}' ({err})"))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse longitude in '{raw}' ({err})"))?;
    let coordinate = Coordinate::new(lat, lon);
    coordinate.validate().map_err(|err| err.to_string())?;
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_pairs() {
        assert_eq!(
            parse_coordinate(" 48.8566, 2.3522 "),
            Ok(Coordinate::new(48.8566, 2.3522))
        );
        assert!(parse_coordinate("48.8566").is_err());
        assert!(parse_coordinate("north,2.35").is_err());
        assert!(parse_coordinate("91,0").is_err());
    }

    #[test]
    fn missing_catalog_document_is_reported() {
        let result = load_catalog(Some(Path::new("/nonexistent/transport-token/catalog.json")));
        assert!(matches!(result, Err(AppError::Catalog(_))));
        assert!(load_engine(None).is_ok());
    }
}
