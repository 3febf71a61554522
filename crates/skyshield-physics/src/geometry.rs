//! Intersection tests and impact math.
//!
//! Pure functions over plain shapes. A test returns `None` when the shapes
//! do not intersect, `Some(Contact)` with penetration depth and a unit
//! normal when they do. Exactly coincident centers fall back to the (1,0)
//! normal; no code path can produce NaN.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use skyshield_core::constants::{
    IMPACT_DAMAGE_FORCE_FACTOR, IMPACT_DAMAGE_SPEED_FACTOR, IMPACT_FORCE_CIRCLE_SCALE,
    IMPACT_FORCE_RECT_SCALE,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

/// Axis-aligned rectangle, `min` corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    pub fn center(&self) -> DVec2 {
        self.min + self.size * 0.5
    }
}

/// Result of an intersection test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub penetration: f64,
    /// Unit vector pointing from the first shape toward the second.
    pub normal: DVec2,
}

/// Fallback normal for degenerate (coincident) geometry.
const FALLBACK_NORMAL: DVec2 = DVec2::new(1.0, 0.0);

/// Circle vs circle: intersecting iff center distance < radius sum.
/// Penetration is exactly `radius_sum - distance`.
pub fn circle_circle(a: &Circle, b: &Circle) -> Option<Contact> {
    let delta = b.center - a.center;
    let distance = delta.length();
    let radius_sum = a.radius + b.radius;
    if distance >= radius_sum {
        return None;
    }

    let normal = if distance > f64::EPSILON {
        delta / distance
    } else {
        FALLBACK_NORMAL
    };

    Some(Contact {
        penetration: radius_sum - distance,
        normal,
    })
}

/// Circle vs axis-aligned rectangle: clamp the circle center onto the
/// rectangle, intersecting iff that closest point is inside the radius.
pub fn circle_rect(circle: &Circle, rect: &Rect) -> Option<Contact> {
    let closest = circle.center.clamp(rect.min, rect.max());
    let delta = closest - circle.center;
    let distance = delta.length();
    if distance >= circle.radius {
        return None;
    }

    let normal = if distance > f64::EPSILON {
        delta / distance
    } else {
        FALLBACK_NORMAL
    };

    Some(Contact {
        penetration: circle.radius - distance,
        normal,
    })
}

/// Rectangle vs rectangle: positive overlap on both axes. Penetration is
/// the smaller overlap; the normal lies along that axis, signed from `a`
/// toward `b`.
pub fn rect_rect(a: &Rect, b: &Rect) -> Option<Contact> {
    let overlap_x = a.max().x.min(b.max().x) - a.min.x.max(b.min.x);
    let overlap_y = a.max().y.min(b.max().y) - a.min.y.max(b.min.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let delta = b.center() - a.center();
    let contact = if overlap_x < overlap_y {
        Contact {
            penetration: overlap_x,
            normal: DVec2::new(if delta.x < 0.0 { -1.0 } else { 1.0 }, 0.0),
        }
    } else {
        Contact {
            penetration: overlap_y,
            normal: DVec2::new(0.0, if delta.y < 0.0 { -1.0 } else { 1.0 }),
        }
    };
    Some(contact)
}

/// Impact force for a circle-pair contact. Visual/debris scaling only.
pub fn impact_force_circles(contact: &Contact) -> f64 {
    contact.penetration * IMPACT_FORCE_CIRCLE_SCALE
}

/// Impact force for a rect-pair contact.
pub fn impact_force_rects(contact: &Contact) -> f64 {
    contact.penetration * IMPACT_FORCE_RECT_SCALE
}

/// Damage heuristic: force and closing speed, scaled by the mean mass of
/// the colliding objects.
pub fn impact_damage(impact_force: f64, relative_speed: f64, mass_a: f64, mass_b: f64) -> f64 {
    let base = impact_force * IMPACT_DAMAGE_FORCE_FACTOR + relative_speed * IMPACT_DAMAGE_SPEED_FACTOR;
    base * ((mass_a + mass_b) * 0.5)
}
