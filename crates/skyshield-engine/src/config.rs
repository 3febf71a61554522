//! Engine configuration.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skyshield_core::constants::*;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed + same events = same run.
    pub seed: u64,
    pub board_width: f64,
    pub board_height: f64,
    /// Advisory frame rate for hosts driving `update`.
    pub target_frame_rate: u32,
    /// Score credited by a direct neutralize event.
    pub score_bonus: u64,
    pub drone_energy_cost: f64,
    pub max_energy: f64,
    pub max_ammunition: u32,
    pub energy_regen_per_sec: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            target_frame_rate: 60,
            score_bonus: SCORE_BONUS,
            drone_energy_cost: DRONE_ENERGY_COST,
            max_energy: ENERGY_MAX,
            max_ammunition: AMMUNITION_MAX,
            energy_regen_per_sec: ENERGY_REGEN_PER_SEC,
        }
    }
}

impl EngineConfig {
    /// The defended point, at the board center.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.board_width * 0.5, self.board_height * 0.5)
    }
}

/// Partial config update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub target_frame_rate: Option<u32>,
    pub score_bonus: Option<u64>,
    pub drone_energy_cost: Option<f64>,
    pub max_energy: Option<f64>,
    pub max_ammunition: Option<u32>,
    pub energy_regen_per_sec: Option<f64>,
}

impl ConfigPatch {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(v) = self.target_frame_rate {
            config.target_frame_rate = v;
        }
        if let Some(v) = self.score_bonus {
            config.score_bonus = v;
        }
        if let Some(v) = self.drone_energy_cost {
            config.drone_energy_cost = v;
        }
        if let Some(v) = self.max_energy {
            config.max_energy = v;
        }
        if let Some(v) = self.max_ammunition {
            config.max_ammunition = v;
        }
        if let Some(v) = self.energy_regen_per_sec {
            config.energy_regen_per_sec = v;
        }
    }
}
