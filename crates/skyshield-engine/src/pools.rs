//! The four named entity pools and their aggregate statistics.

use serde::{Deserialize, Serialize};

use skyshield_core::constants::*;
use skyshield_core::entities::{DroneEntity, Particle, ProjectileEntity, ThreatEntity};
use skyshield_core::types::EntityId;
use skyshield_pool::{ObjectPool, PoolStats, SlotIndex};

/// Owns every pooled entity in the simulation. Entities are checked out on
/// spawn and released back (reset, inactive) when their lifecycle ends.
#[derive(Debug)]
pub struct PoolManager {
    pub threats: ObjectPool<ThreatEntity>,
    pub drones: ObjectPool<DroneEntity>,
    pub projectiles: ObjectPool<ProjectileEntity>,
    pub particles: ObjectPool<Particle>,
}

/// Aggregate usage across the four pools.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PoolManagerStats {
    pub threats: PoolStats,
    pub drones: PoolStats,
    pub projectiles: PoolStats,
    pub particles: PoolStats,
    pub total_active: usize,
    /// Rough backing-store footprint in bytes.
    pub memory_bytes: usize,
}

impl PoolManager {
    pub fn new() -> Self {
        Self {
            threats: ObjectPool::new(THREAT_POOL_SIZE),
            drones: ObjectPool::new(DRONE_POOL_SIZE),
            projectiles: ObjectPool::new(PROJECTILE_POOL_SIZE),
            particles: ObjectPool::new(PARTICLE_POOL_SIZE),
        }
    }

    pub fn stats(&self) -> PoolManagerStats {
        let threats = self.threats.stats();
        let drones = self.drones.stats();
        let projectiles = self.projectiles.stats();
        let particles = self.particles.stats();
        PoolManagerStats {
            threats,
            drones,
            projectiles,
            particles,
            total_active: threats.active + drones.active + projectiles.active + particles.active,
            memory_bytes: self.threats.memory_estimate()
                + self.drones.memory_estimate()
                + self.projectiles.memory_estimate()
                + self.particles.memory_estimate(),
        }
    }

    pub fn clear(&mut self, now: f64) {
        self.threats.clear(now);
        self.drones.clear(now);
        self.projectiles.clear(now);
        self.particles.clear(now);
    }

    // Id-keyed helpers. Slot indices are pool-internal; everything outside
    // the pools refers to entities by id.

    pub fn threat(&self, id: EntityId) -> Option<&ThreatEntity> {
        self.threats.find(|t| t.id == id).map(|(_, t)| t)
    }

    pub fn threat_mut(&mut self, id: EntityId) -> Option<&mut ThreatEntity> {
        self.threats.find_mut(|t| t.id == id).map(|(_, t)| t)
    }

    pub fn threat_slot(&self, id: EntityId) -> Option<SlotIndex> {
        self.threats.find(|t| t.id == id).map(|(slot, _)| slot)
    }

    pub fn release_threat(&mut self, id: EntityId, now: f64) -> bool {
        self.threats.release_where(now, |t| t.id == id) > 0
    }

    pub fn drone(&self, id: EntityId) -> Option<&DroneEntity> {
        self.drones.find(|d| d.id == id).map(|(_, d)| d)
    }

    pub fn drone_mut(&mut self, id: EntityId) -> Option<&mut DroneEntity> {
        self.drones.find_mut(|d| d.id == id).map(|(_, d)| d)
    }

    pub fn release_drone(&mut self, id: EntityId, now: f64) -> bool {
        self.drones.release_where(now, |d| d.id == id) > 0
    }

    pub fn release_projectile(&mut self, id: EntityId, now: f64) -> bool {
        self.projectiles.release_where(now, |p| p.id == id) > 0
    }
}

impl Default for PoolManager {
    fn default() -> Self {
        Self::new()
    }
}
