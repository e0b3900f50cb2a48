//! Great-circle distance with a fixed road-detour inflation.

use super::domain::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line to road distance inflation.
pub const ROAD_DETOUR_FACTOR: f64 = 1.3;

/// Haversine distance in kilometers without detour inflation.
pub fn great_circle_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let sin_dlat = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon = ((lon2 - lon1) * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Estimated road distance rounded to the nearest kilometer.
///
/// Identical points yield `0`; pricing rejects that value rather than quoting a free trip.
/// Callers validate coordinates before calling.
pub fn distance_km(a: Coordinate, b: Coordinate) -> u32 {
    (great_circle_km(a, b) * ROAD_DETOUR_FACTOR).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const LYON: Coordinate = Coordinate::new(45.7640, 4.8357);
    const BERLIN: Coordinate = Coordinate::new(52.52, 13.405);

    #[test]
    fn paris_to_lyon_includes_detour_factor() {
        let straight = great_circle_km(PARIS, LYON);
        assert!((straight - 391.5).abs() < 0.5, "great circle was {straight}");
        assert_eq!(distance_km(PARIS, LYON), 509);
    }

    #[test]
    fn distance_is_symmetric() {
        for (a, b) in [(PARIS, LYON), (LYON, BERLIN), (BERLIN, PARIS)] {
            assert_eq!(distance_km(a, b), distance_km(b, a));
        }
    }

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(distance_km(PARIS, PARIS), 0);
    }
}
