use serde::{Deserialize, Serialize};

/// Point weights and thresholds for carrier matching. Full weights sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub capacity: u8,
    pub proximity: u8,
    pub proximity_within_radius: u8,
    pub proximity_outside_radius: u8,
    pub proximity_unknown: u8,
    /// Reach assumed when neither coordinates nor a route distance are known.
    pub default_reach_km: u32,
    pub reputation: u8,
    pub specialization: u8,
    pub reliability: u8,
    pub reliability_default_ratio: f64,
    pub eco_capability: u8,
    pub eco_baseline: u8,
    pub experience: u8,
    /// (minimum missions, points), checked in order.
    pub experience_steps: Vec<(u32, u8)>,
    pub experience_floor: u8,
    pub gold_threshold: u8,
    pub silver_threshold: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            capacity: 25,
            proximity: 20,
            proximity_within_radius: 15,
            proximity_outside_radius: 8,
            proximity_unknown: 10,
            default_reach_km: 500,
            reputation: 15,
            specialization: 15,
            reliability: 10,
            reliability_default_ratio: 0.5,
            eco_capability: 10,
            eco_baseline: 5,
            experience: 5,
            experience_steps: vec![(100, 5), (50, 4), (20, 3)],
            experience_floor: 1,
            gold_threshold: 85,
            silver_threshold: 65,
        }
    }
}
