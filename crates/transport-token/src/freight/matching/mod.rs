//! Multi-criteria carrier matching.
//!
//! A match is the sum of seven independently evaluated rules. Weighted rules award partial
//! credit; gate rules award all of their points or none. The per-rule breakdown is returned so
//! shippers can see why a carrier ranked where it did.

mod config;
pub mod domain;
mod policy;
mod rules;

pub use config::MatchWeights;
pub use domain::{CarrierProfile, CarrierVehicle, ShipmentSummary};
pub use policy::{CarrierBadge, MatchTier};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::catalog::ReferenceCatalog;
use policy::{badges_for, tier_for};
use rules::{MatchContext, RULES};

pub const MAX_MATCH_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Capacity,
    Proximity,
    Reputation,
    Specialization,
    Reliability,
    EcoCapability,
    Experience,
}

impl MatchFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Capacity => "capacity",
            Self::Proximity => "proximity",
            Self::Reputation => "rating",
            Self::Specialization => "specialization",
            Self::Reliability => "reliability",
            Self::EcoCapability => "eco",
            Self::Experience => "experience",
        }
    }

    pub const fn kind(self) -> RuleKind {
        match self {
            Self::Capacity | Self::Specialization => RuleKind::Gate,
            Self::Proximity
            | Self::Reputation
            | Self::Reliability
            | Self::EcoCapability
            | Self::Experience => RuleKind::Weighted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Weighted,
    Gate,
}

/// Contribution of one rule to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: MatchFactor,
    pub kind: RuleKind,
    pub score: u8,
    pub max_score: u8,
    pub notes: String,
}

impl FactorScore {
    pub(crate) fn new(factor: MatchFactor, score: u8, max_score: u8, notes: String) -> Self {
        Self {
            factor,
            kind: factor.kind(),
            score: score.min(max_score),
            max_score,
            notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub carrier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
    pub total_score: u8,
    pub tier: MatchTier,
    pub factors: Vec<FactorScore>,
    pub badges: Vec<CarrierBadge>,
}

impl MatchResult {
    pub fn factor(&self, factor: MatchFactor) -> Option<&FactorScore> {
        self.factors.iter().find(|entry| entry.factor == factor)
    }
}

/// Stateless scorer applying [`MatchWeights`] against a shared catalog.
pub struct MatchScorer {
    catalog: Arc<ReferenceCatalog>,
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new(catalog: Arc<ReferenceCatalog>, weights: MatchWeights) -> Self {
        Self { catalog, weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score(&self, carrier: &CarrierProfile, shipment: &ShipmentSummary) -> MatchResult {
        let ctx = MatchContext {
            carrier,
            shipment,
            catalog: &self.catalog,
            weights: &self.weights,
        };
        let factors: Vec<FactorScore> = RULES
            .iter()
            .map(|factor| rules::evaluate(*factor, &ctx))
            .collect();
        let raw_total: u32 = factors.iter().map(|entry| u32::from(entry.score)).sum();
        let total_score = raw_total.min(u32::from(MAX_MATCH_SCORE)) as u8;

        MatchResult {
            carrier_id: carrier.carrier_id.clone(),
            carrier_name: carrier.name.clone(),
            total_score,
            tier: tier_for(total_score, &self.weights),
            factors,
            badges: badges_for(carrier, &self.catalog),
        }
    }

    /// Best matches first; ties go to the faster responder, then to input order.
    pub fn rank(
        &self,
        carriers: &[CarrierProfile],
        shipment: &ShipmentSummary,
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut scored: Vec<(u32, MatchResult)> = carriers
            .iter()
            .map(|carrier| {
                let response = carrier.average_response_minutes.unwrap_or(u32::MAX);
                (response, self.score(carrier, shipment))
            })
            .collect();
        scored.sort_by(|(left_response, left), (right_response, right)| {
            right
                .total_score
                .cmp(&left.total_score)
                .then_with(|| left_response.cmp(right_response))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, result)| result)
            .collect()
    }
}
