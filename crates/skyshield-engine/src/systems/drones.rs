//! Drone missions: patrol, intercept, return.
//!
//! Patrolling drones fly their waypoint box through the path interpolator
//! and acquire the nearest threat inside detection range. Interceptors
//! seek their target id. Energy drains continuously; low-energy drones
//! turn for home and are recovered at the base.

use std::collections::HashMap;

use skyshield_core::catalog::Catalog;
use skyshield_core::constants::{
    DRONE_ENERGY_DRAIN_PER_SEC, DRONE_LOW_ENERGY_FRACTION, DRONE_RECOVERY_RANGE,
};
use skyshield_core::enums::DroneMission;
use skyshield_core::events::GameEvent;
use skyshield_core::types::{aim, EntityId};
use skyshield_physics::interpolation::PatrolPath;

use crate::bus::EventBus;
use crate::config::EngineConfig;
use crate::pools::PoolManager;
use crate::state::GameState;

pub fn run(
    state: &mut GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    patrols: &mut HashMap<EntityId, PatrolPath>,
    bus: &mut EventBus,
    dt: f64,
) {
    let base = config.center();
    let now = state.game_time;
    let mut recovered: Vec<EntityId> = Vec::new();

    {
        let PoolManager {
            threats, drones, ..
        } = &mut state.pools;

        for (_slot, drone) in drones.iter_active_mut() {
            if !drone.alive() {
                continue;
            }
            let spec = catalog.drone(drone.kind);

            drone.energy = (drone.energy - DRONE_ENERGY_DRAIN_PER_SEC * dt).max(0.0);
            if !drone.returning && drone.energy <= drone.max_energy * DRONE_LOW_ENERGY_FRACTION {
                drone.returning = true;
                drone.mission = DroneMission::Return;
                drone.target = None;
            }

            match drone.mission {
                DroneMission::Patrol => {
                    let nearest = threats
                        .iter_active()
                        .filter(|(_, t)| t.alive())
                        .map(|(_, t)| (t.id, t.position.distance(drone.position)))
                        .filter(|(_, d)| *d <= spec.detection_range)
                        .min_by(|a, b| a.1.total_cmp(&b.1));

                    if let Some((target_id, _)) = nearest {
                        drone.mission = DroneMission::Intercept;
                        drone.target = Some(target_id);
                    } else if let Some(path) = patrols.get_mut(&drone.id) {
                        let next = path.update(drone.position, dt);
                        drone.velocity = if dt > 0.0 {
                            (next - drone.position) / dt
                        } else {
                            drone.velocity
                        };
                        drone.position = next;
                    }
                }
                DroneMission::Intercept => {
                    let target = drone
                        .target
                        .and_then(|id| threats.find(|t| t.id == id && t.alive()));
                    if let Some((_, threat)) = target {
                        drone.velocity = aim(drone.position, threat.position, spec.speed);
                        drone.position += drone.velocity * dt;
                    } else {
                        drone.mission = DroneMission::Patrol;
                        drone.target = None;
                    }
                }
                DroneMission::Return => {
                    drone.velocity = aim(drone.position, base, spec.speed);
                    drone.position += drone.velocity * dt;
                    if drone.position.distance(base) <= DRONE_RECOVERY_RANGE {
                        recovered.push(drone.id);
                    }
                }
            }
            drone.updated_at = now;
        }
    }

    for id in recovered {
        state.pools.release_drone(id, now);
        patrols.remove(&id);
        bus.emit(GameEvent::DroneRecalled { id });
    }
}
