//! CNR "trinome" tariff: per-km, per-hour and per-day components plus tolls,
//! surcharges, eco discount, platform commission and destination VAT.
//!
//! Every component is rounded to cents once, when produced. Sums are integer additions of
//! those components, so `price_ttc == price_ht + vat` and friends hold exactly.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::catalog::{CountryProfile, ReferenceCatalog, VehicleClass};
use super::domain::{
    serialize_tenths, CountryCode, EngineError, Money, Rate, SurchargeKind, TariffModifiers,
};

/// Platform commission on the pre-commission subtotal.
pub const PLATFORM_COMMISSION: Rate = Rate::from_basis_points(1_000);

/// Driving block after which a regulatory break is due.
pub const DRIVING_BLOCK_HOURS: f64 = 4.5;
pub const BREAK_HOURS: f64 = 0.75;
/// Flat loading and unloading allowance.
pub const HANDLING_HOURS: f64 = 2.0;
/// Maximum driving hours per day under EU rules.
pub const MAX_DAILY_HOURS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivingEstimate {
    #[serde(serialize_with = "serialize_tenths")]
    pub driving_hours: f64,
    #[serde(serialize_with = "serialize_tenths")]
    pub total_hours: f64,
    pub days: u32,
}

/// Duration including mandatory breaks and the handling allowance.
pub fn estimate_duration(distance_km: u32, cruise_speed_kmh: u32) -> DrivingEstimate {
    let driving_hours = f64::from(distance_km) / f64::from(cruise_speed_kmh);
    let total_hours =
        driving_hours + (driving_hours / DRIVING_BLOCK_HOURS).floor() * BREAK_HOURS + HANDLING_HOURS;
    let days = (total_hours / MAX_DAILY_HOURS).ceil() as u32;
    DrivingEstimate {
        driving_hours,
        total_hours,
        days,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrinomeCost {
    /// CK: kilometric component.
    pub distance_component: Money,
    /// CC: driving-time component.
    pub time_component: Money,
    /// CJ: daily component.
    pub day_component: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeLine {
    pub kind: SurchargeKind,
    pub rate: Rate,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffBreakdown {
    pub distance_km: u32,
    pub duration: DrivingEstimate,
    pub trinome: TrinomeCost,
    pub tolls: Money,
    pub surcharge_lines: Vec<SurchargeLine>,
    pub surcharges: Money,
    pub eco_discount_rate: Rate,
    pub eco_discount: Money,
    pub subtotal: Money,
    pub commission_rate: Rate,
    pub commission: Money,
    pub price_ht: Money,
    pub vat_country: CountryCode,
    pub vat_rate: Rate,
    pub vat: Money,
    pub price_ttc: Money,
}

impl TariffBreakdown {
    pub fn surcharge(&self, kind: SurchargeKind) -> Option<Money> {
        self.surcharge_lines
            .iter()
            .find(|line| line.kind == kind)
            .map(|line| line.amount)
    }

    /// Tax-inclusive price per kilometer in cents.
    pub fn price_per_km(&self) -> Money {
        Money::round_from_cents(self.price_ttc.cents() as f64 / f64::from(self.distance_km))
    }
}

pub struct TariffEngine {
    catalog: Arc<ReferenceCatalog>,
}

impl TariffEngine {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn price(
        &self,
        distance_km: u32,
        vehicle: &VehicleClass,
        pickup_country: &CountryCode,
        delivery_country: &CountryCode,
        modifiers: &TariffModifiers,
    ) -> Result<TariffBreakdown, EngineError> {
        if distance_km == 0 {
            return Err(EngineError::InvalidInput(
                "distance must be positive; pickup and delivery coincide".to_string(),
            ));
        }
        if vehicle.cruise_speed_kmh == 0 {
            return Err(EngineError::InvalidInput(format!(
                "vehicle class '{}' has no cruise speed",
                vehicle.label
            )));
        }
        let pickup = self.country(pickup_country)?;
        let delivery = self.country(delivery_country)?;
        let schedule = &self.catalog.tariff;

        let duration = estimate_duration(distance_km, vehicle.cruise_speed_kmh);
        let trinome = trinome_cost(vehicle, distance_km, &duration);
        let tolls = toll_cost(distance_km, pickup, delivery);

        let surcharge_lines: Vec<SurchargeLine> = SurchargeKind::ordered()
            .into_iter()
            .filter(|kind| modifiers.applies(*kind))
            .map(|kind| {
                let rate = schedule.surcharge_rate(kind);
                SurchargeLine {
                    kind,
                    rate,
                    amount: rate.apply(trinome.total),
                }
            })
            .collect();
        let surcharges: Money = surcharge_lines.iter().map(|line| line.amount).sum();

        let eco_discount_rate = schedule.eco_discount_rate(modifiers.eco_option);
        let eco_discount = eco_discount_rate.apply(trinome.total + surcharges);

        let subtotal = trinome.total + tolls + surcharges - eco_discount;
        let commission = PLATFORM_COMMISSION.apply(subtotal);
        let price_ht = subtotal + commission;
        let vat_rate = delivery.vat_rate;
        let vat = vat_rate.apply(price_ht);

        Ok(TariffBreakdown {
            distance_km,
            duration,
            trinome,
            tolls,
            surcharge_lines,
            surcharges,
            eco_discount_rate,
            eco_discount,
            subtotal,
            commission_rate: PLATFORM_COMMISSION,
            commission,
            price_ht,
            vat_country: delivery_country.clone(),
            vat_rate,
            vat,
            price_ttc: price_ht + vat,
        })
    }

    fn country(&self, code: &CountryCode) -> Result<&CountryProfile, EngineError> {
        self.catalog
            .country(code)
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown country code '{code}'")))
    }
}

fn trinome_cost(vehicle: &VehicleClass, distance_km: u32, duration: &DrivingEstimate) -> TrinomeCost {
    let distance_component = vehicle.cost_per_km.times(distance_km);
    let time_component = vehicle.cost_per_hour.scaled(duration.total_hours);
    let day_component = vehicle.cost_per_day.times(duration.days);
    TrinomeCost {
        distance_component,
        time_component,
        day_component,
        total: distance_component + time_component + day_component,
    }
}

/// Distance times the mean of both countries' per-km toll rates.
fn toll_cost(distance_km: u32, pickup: &CountryProfile, delivery: &CountryProfile) -> Money {
    let summed_rates = pickup.toll_rate_per_km + delivery.toll_rate_per_km;
    Money::round_from_cents(summed_rates.times(distance_km).cents() as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_adds_breaks_and_handling() {
        let short = estimate_duration(130, 65);
        assert_eq!(short.driving_hours, 2.0);
        assert_eq!(short.total_hours, 4.0);
        assert_eq!(short.days, 1);

        let long = estimate_duration(650, 65);
        assert_eq!(long.driving_hours, 10.0);
        assert_eq!(long.total_hours, 10.0 + 2.0 * 0.75 + 2.0);
        assert_eq!(long.days, 2);
    }

    #[test]
    fn tolls_average_both_countries() {
        let catalog = ReferenceCatalog::standard();
        let fr = catalog.country(&CountryCode::new("FR")).expect("FR");
        let de = catalog.country(&CountryCode::new("DE")).expect("DE");
        assert_eq!(toll_cost(100, fr, de), Money::from_cents(2_500));
        assert_eq!(toll_cost(1, fr, fr), Money::from_cents(15));
        assert_eq!(toll_cost(1, fr, de), Money::from_cents(25));
    }
}
