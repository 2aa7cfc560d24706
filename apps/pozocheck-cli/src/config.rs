//! TOML overrides for the reference limits
//!
//! A limits file lists parameter bounds and, optionally, a full fee tier
//! table. Bounds entries replace the matching parameter's bounds; a non-empty
//! `[[tiers]]` list replaces the whole tier table.
//!
//! ```toml
//! [[bounds]]
//! parameter = "arsenic"
//! max = 0.05
//!
//! [[tiers]]
//! category = "I"
//! min_volume = 0
//! max_volume = 1000000
//! amount = 200000
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use shared_types::{Bounds, FeeTier, Parameter, ReferenceLimits};
use std::fs;
use std::path::Path;

/// Limits overrides loaded from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bounds: Vec<BoundsEntry>,
    #[serde(default)]
    pub tiers: Vec<TierEntry>,
}

/// One `[[bounds]]` table; either side may be left out for an open bound
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsEntry {
    /// Parameter key or CSV header alias, e.g. `ph`, `arsenico`, `e_coli`
    pub parameter: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One `[[tiers]]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierEntry {
    pub category: String,
    pub min_volume: f64,
    pub max_volume: Option<f64>,
    pub amount: f64,
}

impl Config {
    /// Load overrides from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read limits file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse overrides from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML limits configuration")
    }

    /// Apply the overrides on top of `limits`
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry whose parameter is not known
    pub fn apply(&self, mut limits: ReferenceLimits) -> anyhow::Result<ReferenceLimits> {
        for entry in &self.bounds {
            let Some(param) = Parameter::from_header(&entry.parameter) else {
                bail!("Unknown parameter in limits file: {}", entry.parameter);
            };
            limits
                .bounds
                .insert(param, Bounds::new(entry.min, entry.max));
        }

        if !self.tiers.is_empty() {
            limits.tiers = self
                .tiers
                .iter()
                .map(|t| FeeTier::new(&t.category, t.min_volume, t.max_volume, t.amount))
                .collect();
        }

        tracing::debug!(
            bounds = self.bounds.len(),
            tiers = self.tiers.len(),
            "Applied limits overrides"
        );
        Ok(limits)
    }
}
