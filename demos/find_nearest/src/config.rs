//! Application configuration.
//!
//! Loaded from a TOML file (every key optional), then overridden by
//! command-line flags.
//!
//! ```toml
//! algorithm = "dijkstra"          # or "breadth-first"
//! radii_km  = [5.0, 10.0, 20.0]   # tried in order; empty = no limit
//! speed_kmh = 30.0                # for the travel-time estimate
//! ```

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use nr_graph::Algorithm;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub algorithm: Algorithm,
    pub radii_km: Vec<f64>,
    pub speed_kmh: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Dijkstra,
            radii_km:  Vec::new(),
            speed_kmh: 30.0,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line values win over file values.  An empty `radii_km` leaves
    /// the file's radii alone.
    pub fn apply_overrides(
        &mut self,
        algorithm: Option<Algorithm>,
        radii_km: &[f64],
        speed_kmh: Option<f64>,
    ) {
        if let Some(algorithm) = algorithm {
            self.algorithm = algorithm;
        }
        if !radii_km.is_empty() {
            self.radii_km = radii_km.to_vec();
        }
        if let Some(speed) = speed_kmh {
            self.speed_kmh = speed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.speed_kmh.is_finite() && self.speed_kmh > 0.0,
            "speed_kmh must be a positive number, got {}",
            self.speed_kmh
        );
        for &r in &self.radii_km {
            ensure!(r.is_finite() && r >= 0.0, "radius {r} km is not a non-negative number");
        }
        Ok(())
    }
}
