// src/placement/config.rs

use crate::math::probability::SeedResource;
use crate::placement::{
    error::{PlacementError, PlacementResult},
    strategy::poisson_disc::PoissonDiscOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Strategy-specific tuning values, keyed by option name.
pub type MethodOptions = BTreeMap<String, f64>;

/// Algorithm used to place cells inside their voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    /// Independent uniform draws per voxel; positions may collide or cluster.
    #[default]
    Basic,
    /// Dart throwing with a density-modulated minimum distance between cells.
    PoissonDisc,
}

impl PlacementMethod {
    pub const ALL: [PlacementMethod; 2] = [PlacementMethod::Basic, PlacementMethod::PoissonDisc];

    pub fn name(&self) -> &'static str {
        match self {
            PlacementMethod::Basic => "basic",
            PlacementMethod::PoissonDisc => "poisson_disc",
        }
    }
}

impl fmt::Display for PlacementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementMethod {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| PlacementError::UnknownMethod {
                method: s.to_string(),
            })
    }
}

/// Configuration of a single placement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Scales every voxel density before counting cells.
    pub density_factor: f64,
    pub method: PlacementMethod,
    /// Passed to the selected strategy; ignored by `basic`.
    pub method_options: MethodOptions,
    /// Fixes the generator state. `None` gives non-reproducible output.
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            density_factor: 1.0,
            method: PlacementMethod::Basic,
            method_options: MethodOptions::new(),
            seed: None,
        }
    }
}

impl PlacementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density_factor(mut self, density_factor: f64) -> Self {
        self.density_factor = density_factor;
        self
    }

    pub fn with_method(mut self, method: PlacementMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_method_option(mut self, key: impl Into<String>, value: f64) -> Self {
        self.method_options.insert(key.into(), value);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed_resource(&self) -> SeedResource {
        SeedResource::from_option(self.seed)
    }

    pub fn validate(&self) -> PlacementResult<()> {
        if !self.density_factor.is_finite() || self.density_factor < 0.0 {
            return Err(PlacementError::InvalidConfiguration {
                message: format!(
                    "density_factor must be finite and non-negative, got {}",
                    self.density_factor
                ),
            });
        }

        match self.method {
            PlacementMethod::Basic => Ok(()),
            PlacementMethod::PoissonDisc => {
                PoissonDiscOptions::from_method_options(&self.method_options).map(|_| ())
            }
        }
    }
}
