//! Threat-vs-drone collision pass.
//!
//! Syncs live threats and drones into the collision registry, scans all
//! pairs, and applies the impact damage heuristic to both parties of each
//! threat/drone contact. Impacts shed debris; kills credit points the
//! same way projectile kills do. Threat-threat and drone-drone contacts
//! pass through without effect.

use rand_chacha::ChaCha8Rng;

use skyshield_core::catalog::Catalog;
use skyshield_core::events::GameEvent;
use skyshield_physics::collision::{CollisionObject, CollisionShape, CollisionSystem};

use crate::bus::EventBus;
use crate::state::GameState;
use crate::systems::particles;

pub fn run(
    state: &mut GameState,
    catalog: &Catalog,
    collisions: &mut CollisionSystem,
    bus: &mut EventBus,
    rng: &mut ChaCha8Rng,
    dt: f64,
) {
    let now = state.game_time;

    collisions.clear_objects();
    for (_slot, threat) in state.pools.threats.iter_active() {
        let spec = catalog.threat(threat.kind);
        collisions.add_object(CollisionObject {
            id: threat.id,
            position: threat.position,
            velocity: threat.velocity,
            shape: CollisionShape::Circle { radius: spec.radius },
            mass: spec.mass,
        });
    }
    for (_slot, drone) in state.pools.drones.iter_active() {
        let spec = catalog.drone(drone.kind);
        collisions.add_object(CollisionObject {
            id: drone.id,
            position: drone.position,
            velocity: drone.velocity,
            shape: CollisionShape::Circle { radius: spec.radius },
            mass: spec.mass,
        });
    }

    for report in collisions.check_collisions() {
        let (threat_id, drone_id) = match (
            state.pools.threat(report.a).is_some(),
            state.pools.threat(report.b).is_some(),
        ) {
            (true, false) => (report.a, report.b),
            (false, true) => (report.b, report.a),
            _ => continue,
        };
        if state.pools.drone(drone_id).is_none() {
            continue;
        }

        let mut threat_kill = None;
        let mut impact_point = None;
        if let Some(threat) = state.pools.threat_mut(threat_id) {
            threat.health -= report.damage * threat.shield_factor();
            impact_point = Some(threat.position);
            if threat.health <= 0.0 {
                threat_kill = Some((threat.kind, threat.points, threat.position));
            }
        }

        let mut drone_lost = false;
        if let Some(drone) = state.pools.drone_mut(drone_id) {
            drone.health -= report.damage;
            impact_point = Some(
                impact_point.map_or(drone.position, |p| (p + drone.position) * 0.5),
            );
            if drone.health <= 0.0 {
                drone_lost = true;
            }
        }

        if let Some(point) = impact_point {
            collisions.create_debris(point, report.impact_force, None, rng);
        }

        if let Some((kind, points, position)) = threat_kill {
            state.pools.release_threat(threat_id, now);
            state.score += points;
            bus.emit(GameEvent::ThreatNeutralized {
                id: threat_id,
                kind,
                points,
                by: Some(drone_id),
            });
            particles::spawn_burst(&mut state.pools, rng, position, now);
        }

        if drone_lost {
            state.pools.release_drone(drone_id, now);
            bus.emit(GameEvent::DroneLost { id: drone_id });
        }
    }

    collisions.update_debris(dt);
}
