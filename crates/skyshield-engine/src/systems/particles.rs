//! Visual explosion particles, pooled and aged per frame.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::constants::{
    PARTICLE_BURST_COUNT, PARTICLE_BURST_SPEED, PARTICLE_DAMPING, PARTICLE_GRAVITY,
    PARTICLE_LIFETIME_SECS,
};

use crate::pools::PoolManager;
use crate::state::GameState;

/// Spawn a radial burst at `position`. Exhausted pool slots are skipped.
pub fn spawn_burst(pools: &mut PoolManager, rng: &mut ChaCha8Rng, position: DVec2, now: f64) {
    let step = std::f64::consts::TAU / PARTICLE_BURST_COUNT as f64;
    for i in 0..PARTICLE_BURST_COUNT {
        let Some(slot) = pools.particles.acquire(now) else {
            return;
        };
        let angle = i as f64 * step + rng.gen_range(-0.5..0.5) * step;
        let speed = PARTICLE_BURST_SPEED * rng.gen_range(0.5..1.0);
        if let Some(particle) = pools.particles.get_mut(slot) {
            particle.position = position;
            particle.velocity = DVec2::new(angle.cos(), angle.sin()) * speed;
            particle.life = PARTICLE_LIFETIME_SECS * rng.gen_range(0.6..1.0);
            particle.size = rng.gen_range(1.5..3.5);
        }
    }
}

/// Age particles: gravity, damping, release at zero life.
pub fn run(state: &mut GameState, dt: f64) {
    let now = state.game_time;
    for (_slot, particle) in state.pools.particles.iter_active_mut() {
        particle.life -= dt;
        particle.velocity.y -= PARTICLE_GRAVITY * dt;
        particle.velocity *= PARTICLE_DAMPING;
        particle.position += particle.velocity * dt;
    }
    state.pools.particles.release_where(now, |p| p.life <= 0.0);
}
