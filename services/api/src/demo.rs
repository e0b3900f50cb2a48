use crate::cities::CityDirectory;
use crate::infra::{load_engine, parse_coordinate};
use clap::Args;
use std::path::PathBuf;
use transport_token::config::DEFAULT_MATCH_LIMIT;
use transport_token::error::AppError;
use transport_token::freight::{
    CarrierProfile, CarrierRosterImporter, Coordinate, CountryCode, EcoOption, EngineError,
    FreightEngine, FuelType, LocationResolver, MatchResult, Money, QuoteResult, ShipmentRequest,
    ShipmentSummary, Stop, SurchargeKind,
};

const DEMO_ROSTER: &str = "\
carrier_id,name,base_city,base_lat,base_lon,coverage_radius_km,average_rating,total_missions,completed_missions,hazmat,refrigerated,response_minutes,vehicles
TT-0001,Transports Seine Logistique,Paris,48.8566,2.3522,400,4.9,620,611,yes,no,18,SEMI_TAUTLINER:hvo100;PORTEUR_19T
TT-0002,Rhone Express Fret,Lyon,45.764,4.8357,800,4.6,240,228,no,yes,25,SEMI_FRIGO;SEMI_TAUTLINER
TT-0003,Bourgogne Routiers,Dijon,47.322,5.0415,250,4.2,95,90,no,no,40,PORTEUR_12T
TT-0004,Vert Volt Livraisons,Paris,,,60,4.8,150,149,no,no,10,PORTEUR_ELEC;VUL_ELECTRIQUE
";

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Pickup city name (resolved from the built-in city table)
    #[arg(long)]
    pub(crate) from: Option<String>,
    /// Pickup position as "lat,lon"; takes precedence over --from
    #[arg(long, value_parser = parse_coordinate)]
    pub(crate) from_coord: Option<Coordinate>,
    /// Pickup country (ISO 3166 alpha-2)
    #[arg(long, default_value = "FR")]
    pub(crate) from_country: String,
    /// Delivery city name
    #[arg(long)]
    pub(crate) to: Option<String>,
    /// Delivery position as "lat,lon"; takes precedence over --to
    #[arg(long, value_parser = parse_coordinate)]
    pub(crate) to_coord: Option<Coordinate>,
    /// Delivery country, which also decides the VAT rate
    #[arg(long, default_value = "FR")]
    pub(crate) to_country: String,
    /// Vehicle class key, e.g. FOURGON_20M3 or SEMI_TAUTLINER
    #[arg(long, default_value = "FOURGON_20M3")]
    pub(crate) vehicle: String,
    /// Payload weight in kilograms
    #[arg(long)]
    pub(crate) weight: f64,
    #[arg(long)]
    pub(crate) urgent: bool,
    #[arg(long)]
    pub(crate) weekend: bool,
    #[arg(long)]
    pub(crate) night: bool,
    /// Dangerous goods under ADR
    #[arg(long)]
    pub(crate) hazardous: bool,
    /// Green option: standard, hvo or electric
    #[arg(long, default_value = "standard")]
    pub(crate) eco: EcoOption,
    /// Fuel used for the emission calculation, overriding the vehicle default
    #[arg(long)]
    pub(crate) fuel: Option<FuelType>,
    /// Known road distance in km; skips the geodesic estimate
    #[arg(long)]
    pub(crate) distance: Option<u32>,
    /// JSON catalog replacing the built-in reference tables
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the quote as JSON instead of an itemized summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Carrier roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Pickup city name
    #[arg(long)]
    pub(crate) pickup: Option<String>,
    /// Pickup position as "lat,lon"
    #[arg(long, value_parser = parse_coordinate)]
    pub(crate) pickup_coord: Option<Coordinate>,
    #[arg(long, default_value = "FR")]
    pub(crate) pickup_country: String,
    /// Payload weight in kilograms
    #[arg(long)]
    pub(crate) weight: f64,
    /// Route length in km, used for reach when the pickup cannot be located
    #[arg(long)]
    pub(crate) distance: Option<u32>,
    #[arg(long)]
    pub(crate) hazmat: bool,
    #[arg(long)]
    pub(crate) refrigerated: bool,
    /// Maximum number of carriers to list
    #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
    pub(crate) limit: usize,
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Carrier roster CSV export; defaults to a small built-in roster
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Skip the carrier matching portion of the demo
    #[arg(long)]
    pub(crate) skip_matching: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let engine = load_engine(args.catalog.as_deref())?;
    let request = quote_request(&args)?;
    let quote = engine.compute_quote(&request)?;

    if args.json {
        match serde_json::to_string_pretty(&quote) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Quote payload unavailable: {}", err),
        }
        return Ok(());
    }

    render_quote(&quote);
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let engine = load_engine(args.catalog.as_deref())?;
    let carriers = CarrierRosterImporter::from_path(&args.roster, engine.catalog())?;

    let country = CountryCode::new(&args.pickup_country);
    let pickup_coordinate = args.pickup_coord.or_else(|| {
        args.pickup
            .as_deref()
            .and_then(|city| CityDirectory.resolve(city, &country))
    });
    let shipment = ShipmentSummary {
        pickup_city: args.pickup.clone(),
        pickup_coordinate,
        distance_km: args.distance,
        payload_weight_kg: args.weight,
        requires_hazmat: args.hazmat,
        requires_refrigeration: args.refrigerated,
    };

    println!(
        "Ranking {} carriers from {}",
        carriers.len(),
        args.roster.display()
    );
    render_matches(&engine, &carriers, &shipment, args.limit);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        roster,
        skip_matching,
    } = args;
    let engine = load_engine(None)?;

    println!("Freight pricing demo");
    let mut regional = ShipmentRequest::new(
        Stop::city("Paris", "FR"),
        Stop::city("Lyon", "FR"),
        "FOURGON_20M3",
        1_200.0,
    );
    regional.modifiers.is_urgent = true;
    let quote = engine.compute_quote(&regional)?;
    println!("\n1. Urgent van run, Paris -> Lyon");
    render_quote(&quote);

    let mut cross_border = ShipmentRequest::new(
        Stop::city("Paris", "FR"),
        Stop::city("Berlin", "DE"),
        "SEMI_TAUTLINER",
        18_000.0,
    );
    let diesel = engine.compute_quote(&cross_border)?;
    cross_border.modifiers.eco_option = EcoOption::Hvo;
    let hvo = engine.compute_quote(&cross_border)?;
    println!("\n2. Full truckload, Paris -> Berlin, diesel against HVO100");
    render_quote(&hvo);
    println!(
        "- HVO saves {:.1} kg CO2e and {} over diesel (green score {} -> {})",
        diesel.emissions.total_kg - hvo.emissions.total_kg,
        eur(diesel.tariff.price_ttc - hvo.tariff.price_ttc),
        diesel.green_score,
        hvo.green_score
    );

    if skip_matching {
        return Ok(());
    }

    let carriers = match roster {
        Some(path) => CarrierRosterImporter::from_path(path, engine.catalog())?,
        None => CarrierRosterImporter::from_reader(DEMO_ROSTER.as_bytes(), engine.catalog())?,
    };
    let shipment = engine.shipment_summary(&cross_border);
    println!("\n3. Carrier matching for the Paris -> Berlin load");
    render_matches(&engine, &carriers, &shipment, 5);

    Ok(())
}

fn quote_request(args: &QuoteArgs) -> Result<ShipmentRequest, AppError> {
    let pickup = cli_stop("pickup", args.from.clone(), args.from_coord, &args.from_country)?;
    let delivery = cli_stop("delivery", args.to.clone(), args.to_coord, &args.to_country)?;

    let mut request = ShipmentRequest::new(pickup, delivery, args.vehicle.clone(), args.weight);
    request.modifiers.is_urgent = args.urgent;
    request.modifiers.is_weekend = args.weekend;
    request.modifiers.is_night = args.night;
    request.modifiers.is_hazardous = args.hazardous;
    request.modifiers.eco_option = args.eco;
    request.fuel_override = args.fuel;
    request.distance_km = args.distance;
    Ok(request)
}

fn cli_stop(
    role: &str,
    city: Option<String>,
    coordinate: Option<Coordinate>,
    country: &str,
) -> Result<Stop, AppError> {
    if city.is_none() && coordinate.is_none() {
        return Err(EngineError::InvalidInput(format!(
            "{role} needs a city name or a 'lat,lon' coordinate"
        ))
        .into());
    }
    Ok(Stop {
        coordinate,
        city,
        country: CountryCode::new(country),
    })
}

pub(crate) fn render_quote(quote: &QuoteResult) {
    let tariff = &quote.tariff;
    let emissions = &quote.emissions;

    println!(
        "- {} ({}) | {} km | {:.1} h driving, {:.1} h total, {} day(s)",
        quote.vehicle_label,
        quote.vehicle_class,
        quote.distance_km,
        quote.duration.driving_hours,
        quote.duration.total_hours,
        quote.duration.days
    );
    println!("  Trinome");
    println!("    CK distance      {:>14}", eur(tariff.trinome.distance_component));
    println!("    CC time          {:>14}", eur(tariff.trinome.time_component));
    println!("    CJ days          {:>14}", eur(tariff.trinome.day_component));
    println!("  Trinome total      {:>14}", eur(tariff.trinome.total));
    println!("  Tolls              {:>14}", eur(tariff.tolls));
    for kind in SurchargeKind::ordered() {
        if let Some(line) = tariff.surcharge_lines.iter().find(|line| line.kind == kind) {
            println!(
                "  {:<18} {:>14} (+{})",
                kind.label(),
                eur(line.amount),
                line.rate
            );
        }
    }
    if tariff.eco_discount > Money::ZERO {
        println!(
            "  Eco discount       {:>14} (-{})",
            eur(tariff.eco_discount),
            tariff.eco_discount_rate
        );
    }
    println!(
        "  Commission         {:>14} ({})",
        eur(tariff.commission),
        tariff.commission_rate
    );
    println!("  Price excl. VAT    {:>14}", eur(tariff.price_ht));
    println!(
        "  VAT {:<14} {:>14}",
        format!("{} {}", tariff.vat_country, tariff.vat_rate),
        eur(tariff.vat)
    );
    println!(
        "  Price incl. VAT    {:>14} ({}/km)",
        eur(tariff.price_ttc),
        eur(tariff.price_per_km())
    );
    println!(
        "  Footprint: {:.1} kg CO2e on {} (TTW {:.1} / WTT {:.1}) | rating {} | green score {}",
        emissions.total_kg,
        emissions.fuel.label(),
        emissions.tank_to_wheel_kg,
        emissions.well_to_tank_kg,
        emissions.rating.label(),
        quote.green_score
    );
}

fn eur(amount: Money) -> String {
    format!("{} EUR", amount)
}

fn render_matches(
    engine: &FreightEngine,
    carriers: &[CarrierProfile],
    shipment: &ShipmentSummary,
    limit: usize,
) {
    let ranked = engine.rank_carriers(carriers, shipment, limit);
    if ranked.is_empty() {
        println!("- No carriers to rank");
        return;
    }
    for (position, result) in ranked.iter().enumerate() {
        render_match(position + 1, result);
    }
}

fn render_match(position: usize, result: &MatchResult) {
    let name = result.carrier_name.as_deref().unwrap_or("(unnamed)");
    let badges: Vec<&str> = result.badges.iter().map(|badge| badge.label()).collect();
    println!(
        "{:>2}. {} {} | score {} | {}{}",
        position,
        result.carrier_id,
        name,
        result.total_score,
        result.tier.label(),
        if badges.is_empty() {
            String::new()
        } else {
            format!(" | {}", badges.join(", "))
        }
    );
    for factor in &result.factors {
        println!(
            "      {:<16} {:>2}/{:<2} {}",
            factor.factor.label(),
            factor.score,
            factor.max_score,
            factor.notes
        );
    }
}
