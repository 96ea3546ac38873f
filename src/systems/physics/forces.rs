use crate::core::error::{EngineError, Result};
use crate::domain::config::require_finite;
use crate::domain::EngineConfig;
use crate::rigid_body::{Body, Vec2};

/// Added to the field distance so a body sitting on the field centre gets a
/// finite push.
const FIELD_DISTANCE_OFFSET: f32 = 0.1;

/// Accumulate global forces into a free body's velocity and move it one step.
#[inline]
pub fn integrate(body: &mut Body, config: &EngineConfig) {
    body.velocity.y += config.gravity;
    body.velocity.x += config.wind;

    // Drag, then friction. Both are uniform per-step damping; friction does not
    // depend on contact.
    body.velocity *= config.air_drag;
    body.velocity *= config.friction;

    if body.angular_vel != 0.0 {
        body.angle += body.angular_vel;
        body.angular_vel *= config.angular_drag;
    }

    body.pos += body.velocity;
}

/// Anchored bodies get their motion re-zeroed instead of integrated.
#[inline]
pub fn pin(body: &mut Body) {
    body.velocity = Vec2::zero();
    body.angular_vel = 0.0;
}

/// Point attractor: every free body is pulled toward `center` with
/// `strength / distance`.
///
/// All-or-nothing: if any resulting velocity is not finite, no body changes.
pub fn apply_force_field(bodies: &mut [Body], center: Vec2, strength: f32) -> Result<()> {
    require_finite("force field center x", center.x)?;
    require_finite("force field center y", center.y)?;
    require_finite("force field strength", strength)?;

    let mut updated = Vec::with_capacity(bodies.len());
    for (slot, body) in bodies.iter().enumerate().filter(|(_, b)| !b.anchored) {
        let delta = center - body.center();
        let dist = delta.length() + FIELD_DISTANCE_OFFSET;
        let n = delta.div_len(dist);
        let velocity = body.velocity + n * (strength / dist);
        if !velocity.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "force field strength {} overflows the velocity of body {}",
                strength, body.id
            )));
        }
        updated.push((slot, velocity));
    }

    for (slot, velocity) in updated {
        bodies[slot].velocity = velocity;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Appearance;

    fn body(x: f32, y: f32) -> Body {
        Body::new(1, x, y, 20.0, 1.0, Appearance::default())
    }

    #[test]
    fn integrate_applies_gravity_wind_then_damping() {
        let config = EngineConfig { wind: 0.25, ..EngineConfig::default() };
        let mut b = body(100.0, 100.0).with_velocity(1.0, 0.0);
        integrate(&mut b, &config);

        let vx = (1.0f32 + 0.25) * config.air_drag * config.friction;
        let vy = (0.0f32 + 0.5) * config.air_drag * config.friction;
        assert_eq!(b.velocity, Vec2::new(vx, vy));
        assert_eq!(b.pos, Vec2::new(100.0 + vx, 100.0 + vy));
    }

    #[test]
    fn spin_decays_with_angular_drag() {
        let config = EngineConfig::default();
        let mut b = body(0.0, 0.0);
        b.angular_vel = 0.1;
        integrate(&mut b, &config);
        assert_eq!(b.angle, 0.1);
        assert_eq!(b.angular_vel, 0.1 * 0.98);
    }

    #[test]
    fn force_field_pulls_toward_center_and_skips_anchored() {
        let mut bodies = vec![body(0.0, 0.0), body(200.0, 0.0)];
        bodies[1].anchor();
        apply_force_field(&mut bodies, Vec2::new(110.0, 10.0), 0.5).unwrap();

        assert!(bodies[0].velocity.x > 0.0);
        assert_eq!(bodies[0].velocity.y, 0.0);
        assert_eq!(bodies[1].velocity, Vec2::zero());
    }

    #[test]
    fn force_field_rejects_non_finite_input() {
        let mut bodies = vec![body(0.0, 0.0).with_velocity(1.0, 2.0)];
        let before = bodies.clone();

        assert!(matches!(
            apply_force_field(&mut bodies, Vec2::new(400.0, 300.0), f32::NAN),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(apply_force_field(&mut bodies, Vec2::new(f32::INFINITY, 300.0), 0.5).is_err());
        assert!(apply_force_field(&mut bodies, Vec2::new(400.0, f32::NAN), 0.5).is_err());
        assert_eq!(bodies, before);
    }

    #[test]
    fn overflowing_field_leaves_every_body_untouched() {
        // The far body alone would stay finite; the one centred on the field
        // point overflows, and neither may change.
        let mut bodies = vec![body(0.0, 290.0).with_velocity(0.5, 0.0), body(390.0, 290.0)];
        let before = bodies.clone();

        let err = apply_force_field(&mut bodies, Vec2::new(400.0, 300.0), 1e38).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
        assert_eq!(bodies, before);
    }
}
