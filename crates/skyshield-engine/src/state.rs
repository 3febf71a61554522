//! The aggregate game state.
//!
//! `GameState` is the single mutable structure in the simulation. It is
//! owned by the engine and mutated only through the engine's event
//! handling and systems; external readers get `&GameState` or a
//! serialized snapshot, never a mutable handle.

use skyshield_core::catalog::Catalog;
use skyshield_core::entities::{DeploymentZone, Formation, WeatherState};
use skyshield_core::enums::WeaponKind;

use crate::config::EngineConfig;
use crate::pools::PoolManager;

/// Cooldown and magazine state for one countermeasure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponState {
    pub weapon: WeaponKind,
    /// Absolute simulation time at which the weapon may fire again.
    pub ready_at: f64,
    /// Remaining rounds; `None` means unlimited.
    pub rounds: Option<u32>,
}

impl WeaponState {
    pub fn ready(&self, now: f64) -> bool {
        now >= self.ready_at
    }

    pub fn has_rounds(&self) -> bool {
        self.rounds.map_or(true, |r| r > 0)
    }
}

#[derive(Debug)]
pub struct GameState {
    pub score: u64,
    pub level: u32,
    /// Elapsed simulation time in seconds.
    pub game_time: f64,
    pub running: bool,
    pub target_frame_rate: u32,
    pub pools: PoolManager,
    pub energy: f64,
    pub max_energy: f64,
    pub ammunition: u32,
    pub max_ammunition: u32,
    pub weapons: Vec<WeaponState>,
    pub weather: WeatherState,
    pub formations: Vec<Formation>,
    pub deployment_zones: Vec<DeploymentZone>,
}

impl GameState {
    pub fn new(config: &EngineConfig, catalog: &Catalog) -> Self {
        let weapons = catalog
            .countermeasures
            .iter()
            .map(|spec| WeaponState {
                weapon: spec.weapon,
                ready_at: 0.0,
                rounds: spec.rounds,
            })
            .collect();

        Self {
            score: 0,
            level: 1,
            game_time: 0.0,
            running: false,
            target_frame_rate: config.target_frame_rate,
            pools: PoolManager::new(),
            energy: config.max_energy,
            max_energy: config.max_energy,
            ammunition: config.max_ammunition,
            max_ammunition: config.max_ammunition,
            weapons,
            weather: WeatherState::default(),
            formations: Vec::new(),
            deployment_zones: Vec::new(),
        }
    }

    pub fn weapon(&self, weapon: WeaponKind) -> Option<&WeaponState> {
        self.weapons.iter().find(|w| w.weapon == weapon)
    }

    pub fn weapon_mut(&mut self, weapon: WeaponKind) -> Option<&mut WeaponState> {
        self.weapons.iter_mut().find(|w| w.weapon == weapon)
    }
}
