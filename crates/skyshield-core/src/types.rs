//! Fundamental identity and geometric helpers.
//!
//! Positions and velocities are `glam::DVec2` in abstract board units.
//! The defended point sits at the board center; all bearings and ranges
//! are measured in the board plane.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Opaque entity identity. Assigned sequentially by the engine; ids are
/// never reused within one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The defended battery at the board center. Live entities start at 1.
    pub const BASE: EntityId = EntityId(0);
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Velocity of magnitude `speed` pointing from `from` toward `to`.
/// Coincident points fall back to straight up (no NaN).
pub fn aim(from: DVec2, to: DVec2, speed: f64) -> DVec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist > f64::EPSILON {
        delta * (speed / dist)
    } else {
        DVec2::new(0.0, speed)
    }
}

/// Bearing from `from` to `to` in radians, 0 = North, clockwise.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    delta.x.atan2(delta.y).rem_euclid(std::f64::consts::TAU)
}
