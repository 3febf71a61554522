//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Threat category. Wave composition draws from the first five in unlock
/// order; Radar and Heavy appear in scenario presets and direct spawns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatKind {
    /// Baseline reconnaissance quadcopter.
    #[default]
    Drone,
    /// Coordinated light airframes, fast and fragile.
    Swarm,
    /// Low-observable penetrator.
    Stealth,
    /// One-way attack drone, fast terminal run.
    Kamikaze,
    /// Single end-of-run command unit.
    Boss,
    /// Emitter platform, soft but disruptive.
    Radar,
    /// Armored multirotor, slow and durable.
    Heavy,
}

/// How a threat closes on the defended point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementBehavior {
    /// Straight-line run at constant velocity.
    #[default]
    Direct,
    /// Homes on the board center but reverses heading inside the
    /// reversal range, producing an orbit-avoidance pattern.
    Evasive,
}

/// Engagement priority assigned to a threat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Friendly drone airframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneKind {
    /// Hard-kill rammer.
    #[default]
    Interceptor,
    /// Soft-kill escort.
    Jammer,
    /// Wide-area sensor platform.
    Scout,
}

/// Drone mission state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneMission {
    /// Cycling assigned waypoints.
    #[default]
    Patrol,
    /// Closing on a specific threat id.
    Intercept,
    /// Heading back to base (low energy or recall).
    Return,
}

/// Countermeasure family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Projectile hard kill. Short cooldown, limited rounds, manual.
    #[default]
    Kinetic,
    /// RF jamming. Long cooldown, unlimited, auto-engages in range.
    Electronic,
    /// Directed energy. Fast cooldown, deep magazine, manual.
    Laser,
}

/// Behavior variant rolled onto a threat at spawn from the wave's
/// special-ability chance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpecialTrait {
    /// Incoming damage multiplied by `damage_factor` (< 1.0).
    Shielded { damage_factor: f64 },
    /// Speed multiplied by `speed_factor` (> 1.0).
    Accelerated { speed_factor: f64 },
}

/// Ambient weather over the board for the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Overcast,
    Storm,
    Severe,
}

/// Terrain tag carried by wave configs. Display/meta only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Open,
    Urban,
    Coastal,
    Mountain,
}

/// Resource pools tracked by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Energy,
    Ammunition,
}

/// Why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A threat reached the defended point.
    Breach,
    /// The host stopped the simulation.
    Stopped,
}
