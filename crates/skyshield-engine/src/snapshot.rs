//! HUD snapshot — the serializable view of the state handed to hosts.
//!
//! This is the single UI adapter over the engine: score, level, resource
//! meters, cooldown fractions, and per-entity views with trails. Hosts
//! render from this; they never touch `GameState` directly.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skyshield_core::catalog::Catalog;
use skyshield_core::entities::WeatherState;
use skyshield_core::enums::*;
use skyshield_core::types::EntityId;

use crate::pools::PoolManagerStats;
use crate::state::GameState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub game_time: f64,
    pub score: u64,
    pub level: u32,
    pub running: bool,
    pub target_frame_rate: u32,
    pub energy: f64,
    pub max_energy: f64,
    pub ammunition: u32,
    pub max_ammunition: u32,
    pub weapons: Vec<WeaponView>,
    pub threats: Vec<ThreatView>,
    pub drones: Vec<DroneView>,
    pub projectiles: Vec<ProjectileView>,
    pub weather: WeatherState,
    pub formation_count: usize,
    pub active_zone_count: usize,
    pub pools: PoolManagerStats,
}

/// Cooldown meter and magazine for one countermeasure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub weapon: WeaponKind,
    pub name: String,
    pub ready: bool,
    /// 0.0 = ready, 1.0 = cooldown just started.
    pub cooldown_fraction: f64,
    pub rounds: Option<u32>,
    pub auto_engage: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatView {
    pub id: EntityId,
    pub kind: ThreatKind,
    pub icon: String,
    pub color: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub priority: TargetPriority,
    pub shielded: bool,
    pub trail: Vec<DVec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub id: EntityId,
    pub kind: DroneKind,
    pub mission: DroneMission,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub returning: bool,
    pub target: Option<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub weapon: WeaponKind,
    pub position: DVec2,
    pub target: EntityId,
}

/// Build the HUD view of `state`.
pub fn build(state: &GameState, catalog: &Catalog) -> HudSnapshot {
    let now = state.game_time;

    let weapons = state
        .weapons
        .iter()
        .map(|w| {
            let spec = catalog.countermeasure(w.weapon);
            let remaining = (w.ready_at - now).max(0.0);
            WeaponView {
                weapon: w.weapon,
                name: spec.name.to_string(),
                ready: w.ready(now) && w.has_rounds(),
                cooldown_fraction: if spec.cooldown_secs > 0.0 {
                    (remaining / spec.cooldown_secs).clamp(0.0, 1.0)
                } else {
                    0.0
                },
                rounds: w.rounds,
                auto_engage: spec.auto_engage,
            }
        })
        .collect();

    let threats = state
        .pools
        .threats
        .iter_active()
        .map(|(_, t)| {
            let spec = catalog.threat(t.kind);
            ThreatView {
                id: t.id,
                kind: t.kind,
                icon: spec.icon.to_string(),
                color: spec.color.to_string(),
                position: t.position,
                velocity: t.velocity,
                health: t.health,
                max_health: t.max_health,
                priority: t.priority,
                shielded: t.shield_factor() < 1.0,
                trail: t.trail.positions.clone(),
            }
        })
        .collect();

    let drones = state
        .pools
        .drones
        .iter_active()
        .map(|(_, d)| DroneView {
            id: d.id,
            kind: d.kind,
            mission: d.mission,
            position: d.position,
            health: d.health,
            max_health: d.max_health,
            energy: d.energy,
            max_energy: d.max_energy,
            returning: d.returning,
            target: d.target,
        })
        .collect();

    let projectiles = state
        .pools
        .projectiles
        .iter_active()
        .map(|(_, p)| ProjectileView {
            id: p.id,
            weapon: p.weapon,
            position: p.position,
            target: p.target,
        })
        .collect();

    HudSnapshot {
        game_time: now,
        score: state.score,
        level: state.level,
        running: state.running,
        target_frame_rate: state.target_frame_rate,
        energy: state.energy,
        max_energy: state.max_energy,
        ammunition: state.ammunition,
        max_ammunition: state.max_ammunition,
        weapons,
        threats,
        drones,
        projectiles,
        weather: state.weather,
        formation_count: state.formations.len(),
        active_zone_count: state
            .deployment_zones
            .iter()
            .filter(|z| z.active)
            .count(),
        pools: state.pools.stats(),
    }
}
