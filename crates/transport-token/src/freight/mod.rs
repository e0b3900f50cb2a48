//! Freight pricing and carbon engine.
//!
//! Distance estimation, CNR trinome tariffs, GLEC emissions and carrier matching over shared,
//! read-only reference tables. [`FreightEngine`] composes them into a single quote call.

pub mod catalog;
pub mod domain;
pub mod emissions;
pub mod geo;
pub mod import;
pub mod matching;
pub mod quote;
pub mod router;
pub mod tariff;

#[cfg(test)]
mod tests;

pub use catalog::{
    CarbonRating, CatalogError, CountryProfile, EmissionCatalog, EmissionFactor, ReferenceCatalog,
    TariffSchedule, VehicleClass,
};
pub use domain::{
    Coordinate, CountryCode, EcoOption, EngineError, FuelType, Money, Rate, ShipmentRequest,
    Stop, SurchargeKind, TariffModifiers,
};
pub use emissions::{EmissionBreakdown, EmissionEngine, EmissionRequest};
pub use import::{CarrierImportError, CarrierRosterImporter};
pub use matching::{
    CarrierBadge, CarrierProfile, CarrierVehicle, FactorScore, MatchFactor, MatchResult,
    MatchScorer, MatchTier, MatchWeights, RuleKind, ShipmentSummary,
};
pub use quote::{green_score, FreightEngine, LocationResolver, NoLocationResolver, QuoteResult};
pub use router::freight_router;
pub use tariff::{DrivingEstimate, SurchargeLine, TariffBreakdown, TariffEngine, TrinomeCost};
