//! Domain events published on the engine's event bus.
//!
//! Each event carries a fixed priority (1 = informational, 5 = critical)
//! and, where applicable, intrinsic source/target ids used by history
//! filters. Consumers subscribe by `EventKind`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// Everything the simulation announces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ThreatSpawned {
        id: EntityId,
        kind: ThreatKind,
        position: DVec2,
    },
    ThreatNeutralized {
        id: EntityId,
        kind: ThreatKind,
        points: u64,
        /// The weapon or drone credited with the kill, if any.
        by: Option<EntityId>,
    },
    /// A threat reached the defended point.
    ThreatBreached { id: EntityId, position: DVec2 },
    DroneDeployed {
        id: EntityId,
        kind: DroneKind,
        position: DVec2,
    },
    DroneLost { id: EntityId },
    /// A drone returned to base and was recovered.
    DroneRecalled { id: EntityId },
    WeaponFired {
        weapon: WeaponKind,
        target: EntityId,
        projectile: Option<EntityId>,
    },
    WaveStarted { wave: u32 },
    WaveCompleted { wave: u32 },
    GameStarted,
    GameOver { score: u64, reason: GameOverReason },
    ResourceChanged { energy: f64, ammunition: u32 },
    ResourceCritical { resource: ResourceKind, value: f64 },
    FormationCreated { id: u32, size: usize },
    ZoneActivated { id: u32 },
    /// An operator doctrine/protocol toggled (display only).
    ProtocolActivated { name: String },
}

/// Discriminant used for subscriptions and history filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ThreatSpawned,
    ThreatNeutralized,
    ThreatBreached,
    DroneDeployed,
    DroneLost,
    DroneRecalled,
    WeaponFired,
    WaveStarted,
    WaveCompleted,
    GameStarted,
    GameOver,
    ResourceChanged,
    ResourceCritical,
    FormationCreated,
    ZoneActivated,
    ProtocolActivated,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ThreatSpawned { .. } => EventKind::ThreatSpawned,
            GameEvent::ThreatNeutralized { .. } => EventKind::ThreatNeutralized,
            GameEvent::ThreatBreached { .. } => EventKind::ThreatBreached,
            GameEvent::DroneDeployed { .. } => EventKind::DroneDeployed,
            GameEvent::DroneLost { .. } => EventKind::DroneLost,
            GameEvent::DroneRecalled { .. } => EventKind::DroneRecalled,
            GameEvent::WeaponFired { .. } => EventKind::WeaponFired,
            GameEvent::WaveStarted { .. } => EventKind::WaveStarted,
            GameEvent::WaveCompleted { .. } => EventKind::WaveCompleted,
            GameEvent::GameStarted => EventKind::GameStarted,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::ResourceChanged { .. } => EventKind::ResourceChanged,
            GameEvent::ResourceCritical { .. } => EventKind::ResourceCritical,
            GameEvent::FormationCreated { .. } => EventKind::FormationCreated,
            GameEvent::ZoneActivated { .. } => EventKind::ZoneActivated,
            GameEvent::ProtocolActivated { .. } => EventKind::ProtocolActivated,
        }
    }

    /// Fixed dispatch priority: 1 = informational, 5 = critical.
    pub fn priority(&self) -> u8 {
        match self.kind() {
            EventKind::WeaponFired
            | EventKind::ResourceCritical
            | EventKind::ThreatBreached
            | EventKind::GameOver => 5,
            EventKind::ThreatNeutralized | EventKind::DroneLost | EventKind::ProtocolActivated => 4,
            EventKind::ThreatSpawned
            | EventKind::DroneDeployed
            | EventKind::DroneRecalled
            | EventKind::WaveStarted
            | EventKind::WaveCompleted
            | EventKind::GameStarted => 3,
            EventKind::ResourceChanged | EventKind::FormationCreated | EventKind::ZoneActivated => {
                2
            }
        }
    }

    /// The entity the event originated from, for history filtering.
    pub fn source(&self) -> Option<EntityId> {
        match self {
            GameEvent::ThreatSpawned { id, .. }
            | GameEvent::ThreatBreached { id, .. }
            | GameEvent::DroneDeployed { id, .. }
            | GameEvent::DroneLost { id }
            | GameEvent::DroneRecalled { id } => Some(*id),
            GameEvent::ThreatNeutralized { by, .. } => *by,
            GameEvent::WeaponFired { .. } => Some(EntityId::BASE),
            _ => None,
        }
    }

    /// The entity the event acted on, for history filtering.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            GameEvent::ThreatNeutralized { id, .. } => Some(*id),
            GameEvent::WeaponFired { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// An event as stored in the bus queue and history: the payload stamped
/// with a sequence id and the simulation time of emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    pub timestamp: f64,
    pub priority: u8,
    pub event: GameEvent,
}
