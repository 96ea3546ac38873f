use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::domain::shape::Appearance;

use super::vec2::Vec2;

/// Stable handle for a body; 0 is never allocated.
pub type BodyId = u32;

/// A sandbox shape as the physics sees it.
///
/// `pos` is the top-left corner of the `size` x `size` bounding box. For
/// collisions every body is a circle of diameter `size` centred in that box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,

    // === Physics State ===
    pub pos: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Bounding box edge and collision diameter
    pub size: f32,
    /// Rotation (radians)
    pub angle: f32,
    /// Radians per frame
    pub angular_vel: f32,
    /// Stored for the UI; collision response is mass agnostic.
    pub mass: f32,
    /// Fixed obstacle: never integrated, velocities pinned to zero.
    pub anchored: bool,

    // === Rendering only ===
    pub appearance: Appearance,
}

impl Body {
    pub fn new(id: BodyId, x: f32, y: f32, size: f32, mass: f32, appearance: Appearance) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            size,
            angle: 0.0,
            angular_vel: 0.0,
            mass,
            anchored: false,
            appearance,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Centre of the collision circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size / 2.0)
    }

    /// Strict point-in-box test (edges excluded)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x > self.pos.x && x < self.pos.x + self.size && y > self.pos.y && y < self.pos.y + self.size
    }

    /// Add a velocity impulse. Anchored bodies ignore it.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.anchored {
            self.velocity += impulse;
        }
    }

    pub fn apply_torque(&mut self, torque: f32) {
        if !self.anchored {
            self.angular_vel += torque;
        }
    }

    pub fn clear_forces(&mut self) {
        self.velocity = Vec2::zero();
        self.angular_vel = 0.0;
    }

    /// Anchor in place; the body keeps its pose and loses all motion.
    pub fn anchor(&mut self) {
        self.anchored = true;
        self.clear_forces();
    }

    pub fn unanchor(&mut self) {
        self.anchored = false;
    }

    /// Reject state that would turn into NaN on the canvas.
    pub fn validate(&self) -> Result<()> {
        let reason = if !self.pos.is_finite() {
            "non-finite position"
        } else if !self.velocity.is_finite() {
            "non-finite velocity"
        } else if !self.angle.is_finite() || !self.angular_vel.is_finite() {
            "non-finite rotation"
        } else if !self.size.is_finite() || self.size <= 0.0 {
            "size must be finite and positive"
        } else if !self.mass.is_finite() || self.mass <= 0.0 {
            "mass must be finite and positive"
        } else {
            return Ok(());
        };
        Err(EngineError::InvalidBody { id: self.id, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body::new(1, 10.0, 20.0, 40.0, 1.0, Appearance::default())
    }

    #[test]
    fn center_is_middle_of_box() {
        assert_eq!(body().center(), Vec2::new(30.0, 40.0));
        assert_eq!(body().radius(), 20.0);
    }

    #[test]
    fn contains_point_excludes_edges() {
        let b = body();
        assert!(b.contains_point(11.0, 21.0));
        assert!(!b.contains_point(10.0, 30.0));
        assert!(!b.contains_point(50.0, 30.0));
    }

    #[test]
    fn anchored_body_ignores_impulses() {
        let mut b = body().with_velocity(2.0, 3.0);
        b.anchor();
        assert_eq!(b.velocity, Vec2::zero());
        b.apply_impulse(Vec2::new(5.0, 5.0));
        b.apply_torque(1.0);
        assert_eq!(b.velocity, Vec2::zero());
        assert_eq!(b.angular_vel, 0.0);
    }

    #[test]
    fn validate_rejects_bad_state() {
        assert!(body().validate().is_ok());

        let mut b = body();
        b.size = -1.0;
        assert!(matches!(b.validate(), Err(EngineError::InvalidBody { id: 1, .. })));

        let mut b = body();
        b.velocity.x = f32::NAN;
        assert!(b.validate().is_err());
    }
}
