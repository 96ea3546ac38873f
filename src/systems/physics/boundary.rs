use crate::domain::EngineConfig;
use crate::rigid_body::Body;

use super::types::Bounds;

/// Clamp a body back inside the canvas and reflect the crossing velocity.
///
/// `size` is the full box edge. The ground also bleeds horizontal speed
/// through `friction`, and any wall contact kicks the spin by `wall_spin`.
/// Returns true if any edge was crossed.
pub fn resolve_boundary(body: &mut Body, bounds: Bounds, config: &EngineConfig) -> bool {
    let mut hit = false;

    // Walls
    if body.pos.x < 0.0 {
        body.pos.x = 0.0;
        body.velocity.x *= -config.bounce;
        hit = true;
    }
    if body.pos.x + body.size > bounds.width {
        body.pos.x = bounds.width - body.size;
        body.velocity.x *= -config.bounce;
        hit = true;
    }

    // Ceiling
    if body.pos.y < 0.0 {
        body.pos.y = 0.0;
        body.velocity.y *= -config.bounce;
        hit = true;
    }

    // Ground
    if body.pos.y + body.size > bounds.height {
        body.pos.y = bounds.height - body.size;
        body.velocity.y *= -config.bounce;
        body.velocity.x *= config.friction;
        hit = true;
    }

    if hit {
        body.angular_vel *= config.wall_spin;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Appearance;
    use crate::rigid_body::Vec2;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    fn body(x: f32, y: f32) -> Body {
        Body::new(1, x, y, 50.0, 1.0, Appearance::default())
    }

    #[test]
    fn inside_body_is_untouched() {
        let mut b = body(100.0, 100.0).with_velocity(3.0, 4.0);
        b.angular_vel = 0.2;
        let before = b.clone();
        assert!(!resolve_boundary(&mut b, BOUNDS, &EngineConfig::default()));
        assert_eq!(b, before);
    }

    #[test]
    fn ground_contact_bounces_and_applies_friction() {
        let config = EngineConfig::default();
        let mut b = body(100.0, 560.0).with_velocity(2.0, 10.0);
        assert!(resolve_boundary(&mut b, BOUNDS, &config));
        assert_eq!(b.pos.y, 550.0);
        assert_eq!(b.velocity, Vec2::new(2.0 * 0.99, -10.0 * 0.7));
    }

    #[test]
    fn right_wall_reflects_without_ground_friction() {
        let mut b = body(790.0, 100.0).with_velocity(5.0, 1.0);
        assert!(resolve_boundary(&mut b, BOUNDS, &EngineConfig::default()));
        assert_eq!(b.pos.x, 750.0);
        assert_eq!(b.velocity, Vec2::new(-5.0 * 0.7, 1.0));
    }

    #[test]
    fn wall_contact_reverses_and_halves_spin() {
        let mut b = body(-3.0, 100.0).with_velocity(-1.0, 0.0);
        b.angular_vel = 0.4;
        resolve_boundary(&mut b, BOUNDS, &EngineConfig::default());
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.angular_vel, -0.2);
    }

    #[test]
    fn corner_hit_clamps_both_axes() {
        let mut b = body(-1.0, -1.0).with_velocity(-2.0, -2.0);
        resolve_boundary(&mut b, BOUNDS, &EngineConfig::default());
        assert_eq!(b.pos, Vec2::new(0.0, 0.0));
        assert!(b.velocity.x > 0.0 && b.velocity.y > 0.0);
    }
}
