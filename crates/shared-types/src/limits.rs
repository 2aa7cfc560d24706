//! Reference limits: acceptable ranges for lab parameters and the fee tier table

use crate::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive numeric range; a missing side is unconstrained
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn at_most(max: f64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Presence/absence: only exactly zero is acceptable
    pub fn absent() -> Self {
        Self::between(0.0, 0.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Fee bracket keyed by declared annual volume (m³/year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTier {
    pub category: String,
    pub min_volume: f64,
    /// `None` marks the open-ended top tier
    pub max_volume: Option<f64>,
    pub amount: f64,
}

impl FeeTier {
    pub fn new(category: &str, min_volume: f64, max_volume: Option<f64>, amount: f64) -> Self {
        Self {
            category: category.to_string(),
            min_volume,
            max_volume,
            amount,
        }
    }

    /// Half-open match: `min <= volume < max`
    pub fn matches(&self, volume: f64) -> bool {
        volume >= self.min_volume && self.max_volume.map_or(true, |max| volume < max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceLimits {
    pub bounds: BTreeMap<Parameter, Bounds>,
    pub tiers: Vec<FeeTier>,
}

impl ReferenceLimits {
    /// Bounds for a parameter; parameters without an entry are unconstrained
    pub fn bounds_for(&self, param: Parameter) -> Bounds {
        self.bounds.get(&param).copied().unwrap_or_default()
    }

    pub fn default_bounds() -> BTreeMap<Parameter, Bounds> {
        let mut bounds = BTreeMap::new();
        bounds.insert(Parameter::Ph, Bounds::between(6.5, 8.5));
        bounds.insert(Parameter::Turbidity, Bounds::at_most(3.0));
        bounds.insert(Parameter::Conductivity, Bounds::at_most(2000.0));
        bounds.insert(Parameter::TotalDissolvedSolids, Bounds::at_most(1500.0));
        bounds.insert(Parameter::TotalHardness, Bounds::at_most(400.0));
        bounds.insert(Parameter::Alkalinity, Bounds::at_most(400.0));
        bounds.insert(Parameter::Chlorides, Bounds::at_most(350.0));
        bounds.insert(Parameter::Sulfates, Bounds::at_most(400.0));
        bounds.insert(Parameter::Nitrates, Bounds::at_most(45.0));
        bounds.insert(Parameter::Nitrites, Bounds::at_most(0.1));
        bounds.insert(Parameter::Ammonium, Bounds::at_most(0.2));
        bounds.insert(Parameter::Fluoride, Bounds::at_most(1.5));
        bounds.insert(Parameter::Arsenic, Bounds::at_most(0.01));
        bounds.insert(Parameter::Iron, Bounds::at_most(0.3));
        bounds.insert(Parameter::Manganese, Bounds::at_most(0.1));
        bounds.insert(Parameter::TotalColiforms, Bounds::absent());
        bounds.insert(Parameter::EColi, Bounds::absent());
        bounds.insert(Parameter::Salmonella, Bounds::absent());
        bounds.insert(Parameter::Pseudomonas, Bounds::absent());
        bounds.insert(Parameter::AerobicMesophiles, Bounds::at_most(500.0));
        bounds
    }

    pub fn default_tiers() -> Vec<FeeTier> {
        vec![
            FeeTier::new("I", 0.0, Some(500_000.0), 150_000.0),
            FeeTier::new("II", 500_000.0, Some(1_000_000.0), 350_000.0),
            FeeTier::new("III", 1_000_000.0, Some(5_000_000.0), 900_000.0),
            FeeTier::new("IV", 5_000_000.0, Some(10_000_000.0), 2_000_000.0),
            FeeTier::new("V", 10_000_000.0, None, 4_500_000.0),
        ]
    }
}

impl Default for ReferenceLimits {
    fn default() -> Self {
        Self {
            bounds: Self::default_bounds(),
            tiers: Self::default_tiers(),
        }
    }
}
