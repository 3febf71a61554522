//! Simulation events queued into the engine.
//!
//! Events are validated and applied at the next `update` boundary, in
//! FIFO order, before any entity integration. Application is fail-open:
//! insufficient resources or a stale id silently drop the event.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skyshield_core::entities::WeatherState;
use skyshield_core::enums::{DroneKind, SpecialTrait, ThreatKind, WeaponKind};
use skyshield_core::types::EntityId;

/// All mutations the engine accepts from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Spawn a threat. `position` defaults to a random point on the board
    /// edge; multipliers come from the wave difficulty (1.0 = unscaled).
    SpawnThreat {
        kind: ThreatKind,
        position: Option<DVec2>,
        speed_mult: f64,
        health_mult: f64,
        special: Option<SpecialTrait>,
    },
    /// Deploy a drone at a position. Dropped unless enough energy is
    /// available and the drone pool has a free slot.
    DeployDrone { kind: DroneKind, position: DVec2 },
    /// Fire a countermeasure at a threat. Dropped unless the weapon is off
    /// cooldown, has rounds, ammunition is available, and the target is
    /// alive.
    FireWeapon { weapon: WeaponKind, target: EntityId },
    /// Remove a threat directly and credit the configured score bonus.
    NeutralizeThreat { id: EntityId },
    /// Signed resource deltas, clamped to [0, max].
    AdjustResources { energy: f64, ammunition: i32 },
    /// Set the level. Progression is owned by the wave manager; the
    /// engine only records it.
    AdvanceLevel { level: u32 },
    SetWeather { weather: WeatherState },
    CreateFormation {
        name: String,
        members: Vec<EntityId>,
    },
    ActivateZone { center: DVec2, radius: f64 },
}

impl SimEvent {
    /// Spawn with unscaled stats and a random edge position.
    pub fn spawn(kind: ThreatKind) -> Self {
        SimEvent::SpawnThreat {
            kind,
            position: None,
            speed_mult: 1.0,
            health_mult: 1.0,
            special: None,
        }
    }
}
