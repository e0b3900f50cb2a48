use transport_token::freight::{Coordinate, CountryCode, LocationResolver};

/// A city the service can locate without coordinates from the caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KnownCity {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) country: &'static str,
    pub(crate) coordinate: Coordinate,
}

const fn city(
    name: &'static str,
    aliases: &'static [&'static str],
    country: &'static str,
    lat: f64,
    lon: f64,
) -> KnownCity {
    KnownCity {
        name,
        aliases,
        country,
        coordinate: Coordinate::new(lat, lon),
    }
}

const KNOWN_CITIES: &[KnownCity] = &[
    city("Paris", &[], "FR", 48.8566, 2.3522),
    city("Lyon", &[], "FR", 45.764, 4.8357),
    city("Marseille", &[], "FR", 43.2965, 5.3698),
    city("Toulouse", &[], "FR", 43.6047, 1.4442),
    city("Bordeaux", &[], "FR", 44.8378, -0.5792),
    city("Lille", &[], "FR", 50.6292, 3.0573),
    city("Nantes", &[], "FR", 47.2184, -1.5536),
    city("Strasbourg", &[], "FR", 48.5734, 7.7521),
    city("Nice", &[], "FR", 43.7102, 7.262),
    city("Rennes", &[], "FR", 48.1173, -1.6778),
    city("Milan", &["Milano"], "IT", 45.4642, 9.19),
    city("Rome", &["Roma"], "IT", 41.9028, 12.4964),
    city("Madrid", &[], "ES", 40.4168, -3.7038),
    city("Barcelona", &["Barcelone"], "ES", 41.3851, 2.1734),
    city("Berlin", &[], "DE", 52.52, 13.405),
    city("Munich", &["München", "Muenchen"], "DE", 48.1351, 11.582),
    city("Brussels", &["Bruxelles", "Brussel"], "BE", 50.8503, 4.3517),
    city("Amsterdam", &[], "NL", 52.3676, 4.9041),
    city("London", &["Londres"], "GB", 51.5074, -0.1278),
    city("Warsaw", &["Varsovie", "Warszawa"], "PL", 52.2297, 21.0122),
    city("Prague", &["Praha"], "CZ", 50.0755, 14.4378),
    city("Vienna", &["Vienne", "Wien"], "AT", 48.2082, 16.3738),
    city("Zurich", &["Zürich"], "CH", 47.3769, 8.5417),
    city("Lisbon", &["Lisbonne", "Lisboa"], "PT", 38.7223, -9.1393),
    city("Porto", &[], "PT", 41.1579, -8.6291),
    city("Dublin", &[], "IE", 53.3498, -6.2603),
    city("Copenhagen", &["Copenhague", "København"], "DK", 55.6761, 12.5683),
    city("Stockholm", &[], "SE", 59.3293, 18.0686),
    city("Helsinki", &[], "FI", 60.1699, 24.9384),
    city("Oslo", &[], "NO", 59.9139, 10.7522),
];

/// Fixed table of major European logistics hubs, matched case-insensitively by name or alias.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CityDirectory;

impl CityDirectory {
    pub(crate) fn lookup(&self, name: &str) -> Option<&'static KnownCity> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        KNOWN_CITIES.iter().find(|known| {
            known.name.to_lowercase() == wanted
                || known
                    .aliases
                    .iter()
                    .any(|alias| alias.to_lowercase() == wanted)
        })
    }

    pub(crate) fn cities(&self) -> &'static [KnownCity] {
        KNOWN_CITIES
    }
}

impl LocationResolver for CityDirectory {
    fn resolve(&self, city: &str, country: &CountryCode) -> Option<Coordinate> {
        self.lookup(city)
            .filter(|known| known.country == country.as_str())
            .map(|known| known.coordinate)
    }
}
