use super::config::MatchWeights;
use super::domain::{CarrierProfile, ShipmentSummary};
use super::{FactorScore, MatchFactor};
use crate::freight::catalog::ReferenceCatalog;
use crate::freight::geo;

pub(crate) struct MatchContext<'a> {
    pub carrier: &'a CarrierProfile,
    pub shipment: &'a ShipmentSummary,
    pub catalog: &'a ReferenceCatalog,
    pub weights: &'a MatchWeights,
}

/// Scoring rules in display order. Each is evaluated on its own; none reads another's result.
pub(crate) const RULES: [MatchFactor; 7] = [
    MatchFactor::Capacity,
    MatchFactor::Proximity,
    MatchFactor::Reputation,
    MatchFactor::Specialization,
    MatchFactor::Reliability,
    MatchFactor::EcoCapability,
    MatchFactor::Experience,
];

pub(crate) fn evaluate(factor: MatchFactor, ctx: &MatchContext<'_>) -> FactorScore {
    match factor {
        MatchFactor::Capacity => capacity(ctx),
        MatchFactor::Proximity => proximity(ctx),
        MatchFactor::Reputation => reputation(ctx),
        MatchFactor::Specialization => specialization(ctx),
        MatchFactor::Reliability => reliability(ctx),
        MatchFactor::EcoCapability => eco_capability(ctx),
        MatchFactor::Experience => experience(ctx),
    }
}

fn scaled(max: u8, fraction: f64) -> u8 {
    (f64::from(max) * fraction).round().clamp(0.0, f64::from(max)) as u8
}

fn capacity(ctx: &MatchContext<'_>) -> FactorScore {
    let max = ctx.weights.capacity;
    let weight = ctx.shipment.payload_weight_kg;
    let fitting = ctx
        .carrier
        .vehicles
        .iter()
        .filter_map(|vehicle| ctx.catalog.vehicle(&vehicle.vehicle_class))
        .find(|class| f64::from(class.payload_capacity_kg) >= weight);

    match fitting {
        Some(class) => FactorScore::new(
            MatchFactor::Capacity,
            max,
            max,
            format!("{} carries up to {} kg", class.label, class.payload_capacity_kg),
        ),
        None => FactorScore::new(
            MatchFactor::Capacity,
            0,
            max,
            format!("no vehicle carries {weight:.0} kg"),
        ),
    }
}

fn proximity(ctx: &MatchContext<'_>) -> FactorScore {
    let weights = ctx.weights;
    let carrier = ctx.carrier;
    let base_city = carrier.base_city.as_deref().map(str::trim);
    let pickup_city = ctx.shipment.pickup_city.as_deref().map(str::trim);

    if let (Some(base), Some(pickup)) = (base_city, pickup_city) {
        if base.eq_ignore_ascii_case(pickup) {
            return FactorScore::new(
                MatchFactor::Proximity,
                weights.proximity,
                weights.proximity,
                format!("based in {pickup}"),
            );
        }
    }

    let (score, notes) = match carrier.coverage_radius_km {
        Some(radius) => {
            let reach = reach_km(ctx);
            if radius >= reach {
                (
                    weights.proximity_within_radius,
                    format!("coverage radius {radius} km reaches {reach} km"),
                )
            } else {
                (
                    weights.proximity_outside_radius,
                    format!("coverage radius {radius} km short of {reach} km"),
                )
            }
        }
        None if base_city.is_some() && pickup_city.is_some() => (
            weights.proximity_outside_radius,
            "based elsewhere with no declared coverage radius".to_string(),
        ),
        None => (
            weights.proximity_unknown,
            "carrier or pickup location unknown".to_string(),
        ),
    };

    FactorScore::new(MatchFactor::Proximity, score, weights.proximity, notes)
}

/// Distance the carrier must cover: base to pickup when both points are known.
fn reach_km(ctx: &MatchContext<'_>) -> u32 {
    match (ctx.carrier.base_coordinate, ctx.shipment.pickup_coordinate) {
        (Some(base), Some(pickup)) if base.validate().is_ok() && pickup.validate().is_ok() => {
            geo::distance_km(base, pickup)
        }
        _ => ctx
            .shipment
            .distance_km
            .unwrap_or(ctx.weights.default_reach_km),
    }
}

fn reputation(ctx: &MatchContext<'_>) -> FactorScore {
    let max = ctx.weights.reputation;
    let (fraction, notes) = match ctx.carrier.average_rating.filter(|rating| rating.is_finite()) {
        Some(rating) => {
            let rating = rating.clamp(0.0, 5.0);
            (rating / 5.0, format!("average rating {rating:.1}/5"))
        }
        None => (0.5, "no ratings yet".to_string()),
    };
    FactorScore::new(MatchFactor::Reputation, scaled(max, fraction), max, notes)
}

fn specialization(ctx: &MatchContext<'_>) -> FactorScore {
    let max = ctx.weights.specialization;
    let mut gaps = Vec::new();
    if ctx.shipment.requires_hazmat && !ctx.carrier.has_hazmat_certification {
        gaps.push("ADR certification missing");
    }
    if ctx.shipment.requires_refrigeration && !ctx.carrier.has_refrigerated_capability {
        gaps.push("refrigerated capability missing");
    }

    if gaps.is_empty() {
        FactorScore::new(
            MatchFactor::Specialization,
            max,
            max,
            "meets handling requirements".to_string(),
        )
    } else {
        FactorScore::new(MatchFactor::Specialization, 0, max, gaps.join("; "))
    }
}

fn reliability(ctx: &MatchContext<'_>) -> FactorScore {
    let max = ctx.weights.reliability;
    let carrier = ctx.carrier;
    let (ratio, notes) = match carrier.completion_rate() {
        Some(ratio) => (
            ratio,
            format!(
                "{}/{} missions completed",
                carrier.completed_missions, carrier.total_missions
            ),
        ),
        None => (
            ctx.weights.reliability_default_ratio,
            "no mission history".to_string(),
        ),
    };
    FactorScore::new(MatchFactor::Reliability, scaled(max, ratio), max, notes)
}

fn eco_capability(ctx: &MatchContext<'_>) -> FactorScore {
    let weights = ctx.weights;
    if ctx.carrier.has_low_carbon_vehicle(ctx.catalog) {
        FactorScore::new(
            MatchFactor::EcoCapability,
            weights.eco_capability,
            weights.eco_capability,
            "operates a low-carbon vehicle".to_string(),
        )
    } else {
        FactorScore::new(
            MatchFactor::EcoCapability,
            weights.eco_baseline,
            weights.eco_capability,
            "conventional fleet".to_string(),
        )
    }
}

fn experience(ctx: &MatchContext<'_>) -> FactorScore {
    let weights = ctx.weights;
    let missions = ctx.carrier.total_missions;
    let score = weights
        .experience_steps
        .iter()
        .find(|(minimum, _)| missions >= *minimum)
        .map(|(_, points)| *points)
        .unwrap_or(weights.experience_floor);
    FactorScore::new(
        MatchFactor::Experience,
        score,
        weights.experience,
        format!("{missions} missions"),
    )
}
