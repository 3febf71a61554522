//! Entity data structs for the pooled collections.
//!
//! Entities are plain data with no methods beyond trail bookkeeping.
//! Game logic lives in the engine's systems, not here. Each entity
//! implements `PoolItem` so the pools can reset slots on release.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use skyshield_pool::PoolItem;

use crate::constants::THREAT_TRAIL_LEN;
use crate::enums::*;
use crate::types::EntityId;

/// Bounded history of recent positions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub positions: Vec<DVec2>,
}

impl Trail {
    pub fn record(&mut self, position: DVec2) {
        self.positions.insert(0, position);
        self.positions.truncate(THREAT_TRAIL_LEN);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// A hostile airframe inbound on the defended point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatEntity {
    pub id: EntityId,
    pub kind: ThreatKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub behavior: MovementBehavior,
    pub priority: TargetPriority,
    /// Score credited when this threat is killed in combat.
    pub points: u64,
    pub trail: Trail,
    pub specials: Vec<SpecialTrait>,
    /// Simulation time of the last position update.
    pub updated_at: f64,
}

impl ThreatEntity {
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }

    /// Incoming-damage multiplier from shield traits (1.0 when unshielded).
    pub fn shield_factor(&self) -> f64 {
        self.specials
            .iter()
            .filter_map(|t| match t {
                SpecialTrait::Shielded { damage_factor } => Some(*damage_factor),
                _ => None,
            })
            .product()
    }
}

impl PoolItem for ThreatEntity {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A friendly drone on station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DroneEntity {
    pub id: EntityId,
    pub kind: DroneKind,
    pub mission: DroneMission,
    pub position: DVec2,
    pub velocity: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub target: Option<EntityId>,
    pub formation: Option<u32>,
    pub returning: bool,
    /// Patrol waypoints assigned at deploy, cycled ping-pong.
    pub waypoints: Vec<DVec2>,
    /// Simulation time of the last position update.
    pub updated_at: f64,
}

impl DroneEntity {
    pub fn alive(&self) -> bool {
        self.health > 0.0
    }
}

impl PoolItem for DroneEntity {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A countermeasure round in flight toward a specific threat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileEntity {
    pub id: EntityId,
    pub weapon: WeaponKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub damage: f64,
    /// Maximum flight distance before the round is culled.
    pub range: f64,
    pub travelled: f64,
    pub target: EntityId,
    pub owner: EntityId,
    /// Simulation time of the last position update.
    pub updated_at: f64,
}

impl PoolItem for ProjectileEntity {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Short-lived visual particle spawned on kills and impacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Remaining life in seconds; removed at zero.
    pub life: f64,
    pub size: f64,
}

impl PoolItem for Particle {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A named drone grouping. Present in state; no deep coordination logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub id: u32,
    pub name: String,
    pub center: DVec2,
    pub members: Vec<EntityId>,
}

/// A circular coverage area. Present in state; no deep zone logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentZone {
    pub id: u32,
    pub center: DVec2,
    pub radius: f64,
    pub active: bool,
}

/// Ambient weather over the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub condition: WeatherCondition,
    /// 0.0 (calm) to 1.0 (full severity).
    pub intensity: f64,
    pub wind: DVec2,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            condition: WeatherCondition::Clear,
            intensity: 0.0,
            wind: DVec2::ZERO,
        }
    }
}
