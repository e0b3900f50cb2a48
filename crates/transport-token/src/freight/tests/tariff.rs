use super::common::*;
use crate::freight::catalog::ReferenceCatalog;
use crate::freight::domain::{
    CountryCode, EcoOption, EngineError, Money, Rate, Stop, SurchargeKind, TariffModifiers,
};
use crate::freight::tariff::TariffEngine;

fn tariff_engine() -> (TariffEngine, std::sync::Arc<ReferenceCatalog>) {
    let catalog = catalog();
    (TariffEngine::new(catalog.clone()), catalog)
}

#[test]
fn paris_to_lyon_quote_adds_destination_vat() {
    let quote = engine()
        .compute_quote(&paris_to_lyon("FOURGON_20M3", 1_200.0))
        .expect("quote computes");
    let tariff = &quote.tariff;

    assert_eq!(quote.distance_km, PARIS_LYON_KM);
    assert_eq!(quote.duration.days, 2);
    assert_eq!(tariff.trinome.distance_component, Money::from_cents(39_702));
    assert_eq!(tariff.trinome.time_component, Money::from_cents(29_626));
    assert_eq!(tariff.trinome.day_component, Money::from_cents(27_000));
    assert_eq!(tariff.trinome.total, Money::from_cents(96_328));
    assert_eq!(tariff.tolls, Money::from_cents(7_635));
    assert_eq!(tariff.commission, Money::from_cents(10_396));
    assert_eq!(tariff.price_ht, Money::from_cents(114_359));

    assert_eq!(tariff.vat_rate, Rate::from_basis_points(2_000));
    assert_eq!(tariff.vat, tariff.vat_rate.apply(tariff.price_ht));
    assert_eq!(tariff.price_ttc, tariff.price_ht + tariff.vat);
    assert!(tariff.price_ttc > tariff.price_ht);
    assert_eq!(tariff.price_ttc, Money::from_cents(137_231));
}

#[test]
fn urgent_surcharge_is_half_the_trinome_base() {
    let mut request = paris_to_lyon("FOURGON_20M3", 1_200.0);
    request.modifiers.is_urgent = true;

    let tariff = engine().compute_quote(&request).expect("quote computes").tariff;

    assert_eq!(tariff.surcharges, Money::from_cents(48_164));
    assert_eq!(tariff.surcharges.cents() * 2, tariff.trinome.total.cents());
    assert_eq!(tariff.surcharge(SurchargeKind::Urgent), Some(tariff.surcharges));
    assert_eq!(tariff.surcharge(SurchargeKind::Weekend), None);
}

#[test]
fn surcharges_do_not_compound() {
    let (tariff, catalog) = tariff_engine();
    let vehicle = catalog.vehicle("SEMI_TAUTLINER").expect("class exists");
    let fr = CountryCode::new("FR");

    let all = TariffModifiers {
        is_urgent: true,
        is_weekend: true,
        is_night: true,
        is_hazardous: true,
        eco_option: EcoOption::Standard,
    };
    let combined = tariff
        .price(640, vehicle, &fr, &fr, &all)
        .expect("combined price");

    let mut individually = Money::ZERO;
    for kind in SurchargeKind::ordered() {
        let single = TariffModifiers {
            is_urgent: kind == SurchargeKind::Urgent,
            is_weekend: kind == SurchargeKind::Weekend,
            is_night: kind == SurchargeKind::Night,
            is_hazardous: kind == SurchargeKind::Hazardous,
            eco_option: EcoOption::Standard,
        };
        let priced = tariff
            .price(640, vehicle, &fr, &fr, &single)
            .expect("single surcharge price");
        assert_eq!(
            priced.surcharges,
            catalog.tariff.surcharge_rate(kind).apply(priced.trinome.total)
        );
        individually = individually + priced.surcharges;
    }

    assert_eq!(combined.surcharge_lines.len(), 4);
    assert_eq!(combined.surcharges, individually);
}

#[test]
fn eco_discount_applies_to_base_and_surcharges() {
    let mut request = paris_to_lyon("SEMI_TAUTLINER", 18_000.0);
    request.modifiers.is_night = true;
    request.modifiers.eco_option = EcoOption::Hvo;

    let tariff = engine().compute_quote(&request).expect("quote computes").tariff;

    assert_eq!(tariff.eco_discount_rate, Rate::from_basis_points(1_500));
    assert_eq!(
        tariff.eco_discount,
        tariff
            .eco_discount_rate
            .apply(tariff.trinome.total + tariff.surcharges)
    );
    assert_eq!(
        tariff.subtotal,
        tariff.trinome.total + tariff.tolls + tariff.surcharges - tariff.eco_discount
    );
    assert_eq!(tariff.commission, tariff.commission_rate.apply(tariff.subtotal));
}

#[test]
fn monetary_components_are_never_negative() {
    let (tariff, catalog) = tariff_engine();
    let de = CountryCode::new("DE");
    let pl = CountryCode::new("PL");
    let modifiers = TariffModifiers {
        is_weekend: true,
        eco_option: EcoOption::Electric,
        ..TariffModifiers::default()
    };

    for (key, vehicle) in &catalog.vehicles {
        let priced = tariff
            .price(75, vehicle, &de, &pl, &modifiers)
            .unwrap_or_else(|err| panic!("{key} prices: {err}"));
        for amount in [
            priced.trinome.total,
            priced.tolls,
            priced.surcharges,
            priced.eco_discount,
            priced.subtotal,
            priced.commission,
            priced.price_ht,
            priced.vat,
            priced.price_ttc,
        ] {
            assert!(!amount.is_negative(), "{key} produced {amount}");
        }
    }
}

#[test]
fn price_grows_with_distance() {
    let (tariff, catalog) = tariff_engine();
    let vehicle = catalog.vehicle("PORTEUR_12T").expect("class exists");
    let fr = CountryCode::new("FR");
    let de = CountryCode::new("DE");
    let modifiers = TariffModifiers::default();

    let mut previous_base = Money::ZERO;
    let mut previous_total = Money::ZERO;
    for distance in [1, 10, 45, 100, 315, 316, 500, 999, 1_500, 3_000] {
        let priced = tariff
            .price(distance, vehicle, &fr, &de, &modifiers)
            .expect("price computes");
        assert!(
            priced.trinome.total > previous_base,
            "{distance} km trinome base did not exceed a shorter trip"
        );
        assert!(
            priced.price_ttc > previous_total,
            "{distance} km priced no higher than a shorter trip"
        );
        previous_base = priced.trinome.total;
        previous_total = priced.price_ttc;
    }
}

#[test]
fn route_direction_does_not_change_distance() {
    let engine = engine();
    let outbound = engine
        .compute_quote(&paris_to_lyon("PORTEUR_7T5", 2_000.0))
        .expect("outbound quote");

    let mut inbound = paris_to_lyon("PORTEUR_7T5", 2_000.0);
    std::mem::swap(&mut inbound.pickup, &mut inbound.delivery);
    let inbound = engine.compute_quote(&inbound).expect("inbound quote");

    assert_eq!(outbound.distance_km, inbound.distance_km);
    assert_eq!(outbound.tariff.price_ttc, inbound.tariff.price_ttc);
}

#[test]
fn vat_follows_the_delivery_country() {
    let mut request = paris_to_lyon("SEMI_TAUTLINER", 10_000.0);
    request.delivery = Stop::at(LYON, "ch");

    let tariff = engine().compute_quote(&request).expect("quote computes").tariff;

    assert_eq!(tariff.vat_country, CountryCode::new("CH"));
    assert_eq!(tariff.vat_rate, Rate::from_basis_points(770));
    assert_eq!(tariff.price_ttc, tariff.price_ht + tariff.vat);
}

#[test]
fn city_names_resolve_through_the_location_resolver() {
    let by_city = engine()
        .compute_quote(&crate::freight::ShipmentRequest::new(
            Stop::city("Paris", "FR"),
            Stop::city("Lyon", "FR"),
            "FOURGON_20M3",
            1_200.0,
        ))
        .expect("cities resolve");
    assert_eq!(by_city.distance_km, PARIS_LYON_KM);

    let unknown = engine().compute_quote(&crate::freight::ShipmentRequest::new(
        Stop::city("Atlantis", "FR"),
        Stop::city("Lyon", "FR"),
        "FOURGON_20M3",
        1_200.0,
    ));
    assert!(matches!(unknown, Err(EngineError::InvalidInput(_))));
}

#[test]
fn coincident_stops_are_rejected() {
    let mut request = paris_to_lyon("FOURGON_20M3", 500.0);
    request.delivery = Stop::at(PARIS, "FR");
    assert!(matches!(
        engine().compute_quote(&request),
        Err(EngineError::InvalidInput(_))
    ));

    let mut overridden = paris_to_lyon("FOURGON_20M3", 500.0);
    overridden.distance_km = Some(0);
    assert!(matches!(
        engine().compute_quote(&overridden),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn unknown_references_are_rejected() {
    let engine = engine();

    match engine.compute_quote(&paris_to_lyon("ZEPPELIN", 500.0)) {
        Err(EngineError::UnknownVehicleCategory {
            vehicle_class,
            category,
        }) => {
            assert_eq!(vehicle_class, "ZEPPELIN");
            assert_eq!(category, None);
        }
        other => panic!("expected unknown vehicle class, got {other:?}"),
    }

    let mut unknown_country = paris_to_lyon("FOURGON_20M3", 500.0);
    unknown_country.delivery = Stop::at(LYON, "ZZ");
    assert!(matches!(
        engine.compute_quote(&unknown_country),
        Err(EngineError::InvalidInput(_))
    ));

    let mut negative_weight = paris_to_lyon("FOURGON_20M3", 500.0);
    negative_weight.payload_weight_kg = -1.0;
    assert!(matches!(
        engine.compute_quote(&negative_weight),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn green_score_rewards_cleaner_options() {
    let engine = engine();
    let standard = engine
        .compute_quote(&paris_to_lyon("SEMI_TAUTLINER", 20_000.0))
        .expect("standard quote");

    let mut electric_request = paris_to_lyon("PORTEUR_ELEC", 5_000.0);
    electric_request.modifiers.eco_option = EcoOption::Electric;
    let electric = engine
        .compute_quote(&electric_request)
        .expect("electric quote");

    assert!(standard.green_score < 50);
    assert!(electric.green_score > standard.green_score);
    assert!(electric.green_score <= 100);
}
