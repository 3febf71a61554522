//! Tracked-object collision scanning and the debris sub-simulation.
//!
//! The system keeps an id-keyed registry of shapes synced in by the caller
//! each frame and scans all pairs once per `check_collisions` call. The
//! scan is O(n²); entity counts stay in the low tens, so no broad phase.
//! Debris particles are a purely visual by-product and live in their own
//! list, independent of the registry.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skyshield_core::constants::{
    DEBRIS_LIFETIME_SECS, DEBRIS_MAX_COUNT, DEBRIS_SPEED_PER_FORCE, PARTICLE_DAMPING,
    PARTICLE_GRAVITY,
};
use skyshield_core::types::EntityId;

use crate::geometry::{self, Circle, Contact, Rect};

/// Shape of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    Circle { radius: f64 },
    Rect { size: DVec2 },
}

/// One object in the registry. Position is the shape center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionObject {
    pub id: EntityId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub shape: CollisionShape,
    pub mass: f64,
}

/// A detected collision between two registered objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    pub a: EntityId,
    pub b: EntityId,
    pub contact: Contact,
    pub impact_force: f64,
    /// Damage suggested by the impact heuristic.
    pub damage: f64,
}

/// One debris particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisParticle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Remaining life in seconds.
    pub life: f64,
    pub size: f64,
}

#[derive(Debug, Default)]
pub struct CollisionSystem {
    objects: Vec<CollisionObject>,
    debris: Vec<DebrisParticle>,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object. Replaces any existing entry with the same id.
    pub fn add_object(&mut self, object: CollisionObject) {
        if let Some(existing) = self.objects.iter_mut().find(|o| o.id == object.id) {
            *existing = object;
        } else {
            self.objects.push(object);
        }
    }

    pub fn remove_object(&mut self, id: EntityId) {
        self.objects.retain(|o| o.id != id);
    }

    /// Update position/velocity of a tracked object. Unknown ids are
    /// ignored (the caller may have despawned it this frame).
    pub fn update_object(&mut self, id: EntityId, position: DVec2, velocity: DVec2) {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == id) {
            object.position = position;
            object.velocity = velocity;
        }
    }

    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// All-pairs scan. Each colliding pair is reported once, in registry
    /// order (a before b).
    pub fn check_collisions(&self) -> Vec<ContactReport> {
        let mut reports = Vec::new();
        for i in 0..self.objects.len() {
            for j in (i + 1)..self.objects.len() {
                let a = &self.objects[i];
                let b = &self.objects[j];
                if let Some((contact, impact_force)) = intersect(a, b) {
                    let relative_speed = (a.velocity - b.velocity).length();
                    let damage =
                        geometry::impact_damage(impact_force, relative_speed, a.mass, b.mass);
                    reports.push(ContactReport {
                        a: a.id,
                        b: b.id,
                        contact,
                        impact_force,
                        damage,
                    });
                }
            }
        }
        reports
    }

    /// Spawn debris radiating from an impact point. `count` defaults from
    /// the impact force and is capped at `DEBRIS_MAX_COUNT`; directions are
    /// evenly spaced with jitter from the supplied RNG.
    pub fn create_debris(
        &mut self,
        position: DVec2,
        impact_force: f64,
        count: Option<usize>,
        rng: &mut ChaCha8Rng,
    ) {
        let count = count
            .unwrap_or_else(|| (impact_force / 10.0).ceil().max(1.0) as usize)
            .min(DEBRIS_MAX_COUNT);
        if count == 0 {
            return;
        }

        let speed = impact_force * DEBRIS_SPEED_PER_FORCE;
        let step = std::f64::consts::TAU / count as f64;
        for i in 0..count {
            let jitter = rng.gen_range(-0.5..0.5) * step;
            let angle = i as f64 * step + jitter;
            let speed = speed * rng.gen_range(0.6..1.0);
            self.debris.push(DebrisParticle {
                position,
                velocity: DVec2::new(angle.cos(), angle.sin()) * speed,
                life: DEBRIS_LIFETIME_SECS * rng.gen_range(0.7..1.0),
                size: rng.gen_range(1.0..3.0),
            });
        }
    }

    /// Age debris: gravity, air-resistance damping, removal at zero life.
    pub fn update_debris(&mut self, dt: f64) {
        for particle in &mut self.debris {
            particle.life -= dt;
            particle.velocity.y -= PARTICLE_GRAVITY * dt;
            particle.velocity *= PARTICLE_DAMPING;
            particle.position += particle.velocity * dt;
        }
        self.debris.retain(|p| p.life > 0.0);
    }

    pub fn debris(&self) -> &[DebrisParticle] {
        &self.debris
    }
}

fn intersect(a: &CollisionObject, b: &CollisionObject) -> Option<(Contact, f64)> {
    match (a.shape, b.shape) {
        (CollisionShape::Circle { radius: ra }, CollisionShape::Circle { radius: rb }) => {
            let contact = geometry::circle_circle(
                &Circle {
                    center: a.position,
                    radius: ra,
                },
                &Circle {
                    center: b.position,
                    radius: rb,
                },
            )?;
            Some((contact, geometry::impact_force_circles(&contact)))
        }
        (CollisionShape::Circle { radius }, CollisionShape::Rect { size }) => {
            let contact = geometry::circle_rect(
                &Circle {
                    center: a.position,
                    radius,
                },
                &rect_at(b.position, size),
            )?;
            Some((contact, geometry::impact_force_circles(&contact)))
        }
        (CollisionShape::Rect { size }, CollisionShape::Circle { radius }) => {
            // Test as circle-vs-rect, then flip the normal back to a→b.
            let contact = geometry::circle_rect(
                &Circle {
                    center: b.position,
                    radius,
                },
                &rect_at(a.position, size),
            )?;
            let flipped = Contact {
                penetration: contact.penetration,
                normal: -contact.normal,
            };
            Some((flipped, geometry::impact_force_circles(&flipped)))
        }
        (CollisionShape::Rect { size: sa }, CollisionShape::Rect { size: sb }) => {
            let contact = geometry::rect_rect(&rect_at(a.position, sa), &rect_at(b.position, sb))?;
            Some((contact, geometry::impact_force_rects(&contact)))
        }
    }
}

fn rect_at(center: DVec2, size: DVec2) -> Rect {
    Rect {
        min: center - size * 0.5,
        size,
    }
}
