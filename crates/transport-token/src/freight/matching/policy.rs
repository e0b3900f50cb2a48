use serde::{Deserialize, Serialize};

use super::config::MatchWeights;
use super::domain::CarrierProfile;
use crate::freight::catalog::ReferenceCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Gold,
    Silver,
    Bronze,
}

impl MatchTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

/// Recognition shown next to a carrier in match listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierBadge {
    TopRated,
    Expert,
    Eco,
    Reliable,
}

impl CarrierBadge {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopRated => "Top Rated",
            Self::Expert => "Expert",
            Self::Eco => "Eco",
            Self::Reliable => "Reliable",
        }
    }
}

pub(crate) fn tier_for(total_score: u8, weights: &MatchWeights) -> MatchTier {
    if total_score >= weights.gold_threshold {
        MatchTier::Gold
    } else if total_score >= weights.silver_threshold {
        MatchTier::Silver
    } else {
        MatchTier::Bronze
    }
}

pub(crate) fn badges_for(carrier: &CarrierProfile, catalog: &ReferenceCatalog) -> Vec<CarrierBadge> {
    let mut badges = Vec::new();
    if carrier.average_rating.is_some_and(|rating| rating >= 4.8) {
        badges.push(CarrierBadge::TopRated);
    }
    if carrier.completed_missions >= 500 {
        badges.push(CarrierBadge::Expert);
    }
    if carrier.has_low_carbon_vehicle(catalog) {
        badges.push(CarrierBadge::Eco);
    }
    if carrier.total_missions >= 100 && carrier.completion_rate().is_some_and(|rate| rate >= 0.98) {
        badges.push(CarrierBadge::Reliable);
    }
    badges
}
