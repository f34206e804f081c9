//! Policy tuning parameters.
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides:
//!
//! ```json
//! { "danger_radius": 350, "training": { "giant_weight": 2.0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::board::{Specialization, REPAIR_THRESHOLD};

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Enemy Knights closer than this trigger evasion.
    pub danger_radius: f64,
    /// Friendly towers below this health get reinforced.
    pub repair_threshold: i32,
    /// Gold that training never dips into.
    pub gold_reserve: i32,
    pub portfolio: PortfolioConfig,
    pub training: TrainingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            danger_radius: 300.0,
            repair_threshold: REPAIR_THRESHOLD,
            gold_reserve: 0,
            portfolio: PortfolioConfig::default(),
            training: TrainingConfig::default(),
        }
    }
}

/// Desired structure counts and how strongly each deficit pulls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortfolioConfig {
    pub mines: u32,
    pub towers: u32,
    pub knight_barracks: u32,
    pub archer_barracks: u32,
    pub giant_barracks: u32,
    pub mine_weight: f64,
    pub tower_weight: f64,
    pub barracks_weight: f64,
    /// Enemy units this close to the Queen make a tower more attractive.
    pub threat_radius: f64,
    /// Added to the tower score under threat, and to archer barracks when
    /// the enemy fields Knights and we have no archers.
    pub threat_bonus: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            mines: 3,
            towers: 1,
            knight_barracks: 1,
            archer_barracks: 0,
            giant_barracks: 0,
            mine_weight: 1.0,
            tower_weight: 0.5,
            barracks_weight: 0.6,
            threat_radius: 500.0,
            threat_bonus: 0.5,
        }
    }
}

impl PortfolioConfig {
    /// Target number of barracks for a specialization.
    pub fn barracks_target(&self, spec: Specialization) -> u32 {
        match spec {
            Specialization::Knight => self.knight_barracks,
            Specialization::Archer => self.archer_barracks,
            Specialization::Giant => self.giant_barracks,
        }
    }
}

/// Priority weights for queuing training batches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub knight_weight: f64,
    pub archer_weight: f64,
    pub giant_weight: f64,
    /// Added to archers when an enemy Knight is inside the danger radius.
    pub archer_threat_bonus: f64,
    /// Added to giants when the enemy owns a tower.
    pub giant_tower_bonus: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            knight_weight: 3.0,
            archer_weight: 2.0,
            giant_weight: 1.0,
            archer_threat_bonus: 2.0,
            giant_tower_bonus: 2.5,
        }
    }
}

impl TrainingConfig {
    pub fn weight(&self, spec: Specialization) -> f64 {
        match spec {
            Specialization::Knight => self.knight_weight,
            Specialization::Archer => self.archer_weight,
            Specialization::Giant => self.giant_weight,
        }
    }
}

impl Config {
    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_json(&data)
    }
}
