//! Threat kinematics.
//!
//! Direct threats fly their spawn velocity straight in. Evasive threats
//! home on the board center but hold outside the reversal ring, producing
//! an orbit-avoidance pattern. Wind drifts every threat downwind.

use skyshield_core::constants::{EVASIVE_REVERSAL_RANGE, WIND_DRIFT_FACTOR};
use skyshield_core::enums::MovementBehavior;
use skyshield_core::types::aim;

use crate::config::EngineConfig;
use crate::state::GameState;

pub fn run(state: &mut GameState, config: &EngineConfig, dt: f64) {
    let center = config.center();
    let wind = state.weather.wind;
    let now = state.game_time;

    for (_slot, threat) in state.pools.threats.iter_active_mut() {
        if let MovementBehavior::Evasive = threat.behavior {
            let speed = threat.velocity.length();
            let inbound = aim(threat.position, center, speed);
            threat.velocity = if threat.position.distance(center) < EVASIVE_REVERSAL_RANGE {
                -inbound
            } else {
                inbound
            };
        }

        threat.position += (threat.velocity + wind * WIND_DRIFT_FACTOR) * dt;
        threat.trail.record(threat.position);
        threat.updated_at = now;
    }
}
