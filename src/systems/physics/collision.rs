use rand::Rng;
use tracing::trace;

use crate::domain::EngineConfig;
use crate::rigid_body::{Body, Vec2};

use super::types::StepStats;

/// Geometry of one pair, measured once before anything moves.
#[derive(Clone, Copy, Debug)]
pub struct PairContact {
    /// Unit vector from b's centre toward a's centre
    pub normal: Vec2,
    pub dist: f32,
    pub min_dist: f32,
}

impl PairContact {
    /// `None` when the centres coincide and there is no usable normal.
    pub fn measure(a: &Body, b: &Body) -> Option<Self> {
        let delta = a.center() - b.center();
        let dist = delta.length();
        if dist <= 0.0 {
            return None;
        }
        Some(Self {
            normal: delta.div_len(dist),
            dist,
            min_dist: a.radius() + b.radius(),
        })
    }

    #[inline]
    pub fn overlapping(&self) -> bool {
        self.dist < self.min_dist
    }
}

/// Exhaustive O(n²) pass over every unordered pair `i < j`.
///
/// Overlapping pairs are separated and their velocities swapped, then (with
/// magnetism on) every pair attracts. Coincident centres are skipped.
pub fn resolve_pairs<R: Rng>(bodies: &mut [Body], config: &EngineConfig, rng: &mut R, stats: &mut StepStats) {
    let n = bodies.len();
    for i in 0..n {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            stats.pairs_checked += 1;

            if a.anchored && b.anchored {
                continue;
            }

            let Some(contact) = PairContact::measure(a, b) else {
                stats.degenerate_pairs += 1;
                trace!(a = a.id, b = b.id, "coincident centres, pair skipped");
                continue;
            };

            if contact.overlapping() {
                stats.contacts += 1;
                resolve_contact(a, b, &contact, config, rng);
            }

            if config.magnetism {
                attract(a, b, &contact, config);
            }
        }
    }
}

fn resolve_contact<R: Rng>(a: &mut Body, b: &mut Body, contact: &PairContact, config: &EngineConfig, rng: &mut R) {
    let penetration = contact.min_dist - contact.dist;

    match (a.anchored, b.anchored) {
        (false, false) => {
            let push = contact.normal * (penetration / 2.0);
            a.pos += push;
            b.pos -= push;

            // Equal-mass elastic exchange: velocities trade places exactly.
            std::mem::swap(&mut a.velocity, &mut b.velocity);

            a.angular_vel += random_spin(rng, config.collision_torque);
            b.angular_vel += random_spin(rng, config.collision_torque);
        }
        (false, true) => bounce_off_anchor(a, contact.normal, penetration, config, rng),
        (true, false) => bounce_off_anchor(b, -contact.normal, penetration, config, rng),
        (true, true) => {}
    }
}

/// An anchored body behaves like a wall: the free body takes the whole
/// correction and reflects its approaching normal velocity with `bounce`.
/// `normal` points from the anchor toward the free body.
fn bounce_off_anchor<R: Rng>(body: &mut Body, normal: Vec2, penetration: f32, config: &EngineConfig, rng: &mut R) {
    body.pos += normal * penetration;

    let approach = body.velocity.dot(normal);
    if approach < 0.0 {
        body.velocity -= normal * ((1.0 + config.bounce) * approach);
    }

    body.angular_vel += random_spin(rng, config.collision_torque);
}

/// Floor on the attraction denominator. Only near-coincident centres reach it.
const MIN_MAGNET_DIST_SQ: f32 = 1e-4;

/// Inverse-square pull along the pair normal, `strength / (d² + softening)`.
fn attract(a: &mut Body, b: &mut Body, contact: &PairContact, config: &EngineConfig) {
    let dist_sq = (contact.dist * contact.dist + config.magnet_softening).max(MIN_MAGNET_DIST_SQ);
    let force = config.magnet_strength / dist_sq;
    let pull = contact.normal * force;

    if !a.anchored {
        a.velocity -= pull;
    }
    if !b.anchored {
        b.velocity += pull;
    }
}

#[inline]
fn random_spin<R: Rng>(rng: &mut R, torque: f32) -> f32 {
    if rng.random_bool(0.5) {
        torque
    } else {
        -torque
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Appearance;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DEFAULT_TORQUE: f32 = crate::domain::config::DEFAULT_COLLISION_TORQUE;

    fn body(id: u32, x: f32, y: f32, size: f32) -> Body {
        Body::new(id, x, y, size, 1.0, Appearance::default())
    }

    fn run(bodies: &mut [Body], config: &EngineConfig) -> StepStats {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut stats = StepStats::default();
        resolve_pairs(bodies, config, &mut rng, &mut stats);
        stats
    }

    #[test]
    fn overlapping_pair_separates_symmetrically() {
        let mut bodies = vec![body(1, 0.0, 0.0, 20.0), body(2, 10.0, 0.0, 20.0)];
        let stats = run(&mut bodies, &EngineConfig::default());

        assert_eq!(stats.contacts, 1);
        // 10px of penetration, 5px each
        assert_eq!(bodies[0].pos.x, -5.0);
        assert_eq!(bodies[1].pos.x, 15.0);
        assert_eq!(bodies[0].angular_vel.abs(), DEFAULT_TORQUE);
        assert_eq!(bodies[1].angular_vel.abs(), DEFAULT_TORQUE);
    }

    #[test]
    fn coincident_centres_are_skipped() {
        let mut bodies = vec![
            body(1, 10.0, 10.0, 20.0).with_velocity(1.0, 0.0),
            body(2, 10.0, 10.0, 20.0).with_velocity(-1.0, 0.0),
        ];
        let before = bodies.clone();
        let config = EngineConfig { magnetism: true, ..EngineConfig::default() };
        let stats = run(&mut bodies, &config);

        assert_eq!(stats.degenerate_pairs, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(bodies, before);
    }

    #[test]
    fn free_body_reflects_off_anchor_which_stays_put() {
        let mut anchor = body(1, 0.0, 0.0, 20.0);
        anchor.anchor();
        let mut bodies = vec![anchor.clone(), body(2, 10.0, 0.0, 20.0).with_velocity(-2.0, 0.0)];
        run(&mut bodies, &EngineConfig::default());

        assert_eq!(bodies[0], anchor);
        assert_eq!(bodies[1].pos.x, 20.0);
        assert!((bodies[1].velocity.x - 2.0 * 0.7).abs() < 1e-6);
        assert_eq!(bodies[1].velocity.y, 0.0);
    }

    #[test]
    fn magnetism_pulls_distant_pair_together() {
        let mut bodies = vec![body(1, 0.0, 0.0, 10.0), body(2, 100.0, 0.0, 10.0)];
        let config = EngineConfig { magnetism: true, ..EngineConfig::default() };
        let stats = run(&mut bodies, &config);

        assert_eq!(stats.contacts, 0);
        // Plain inverse square with the default zero softening
        let expected = 50.0 / (100.0 * 100.0);
        assert_eq!(bodies[0].velocity.x, expected);
        assert_eq!(bodies[1].velocity.x, -expected);
        assert_eq!(bodies[0].velocity.x + bodies[1].velocity.x, 0.0);
    }

    #[test]
    fn colliding_pair_still_attracts_using_pre_separation_geometry() {
        let mut bodies = vec![
            body(1, 0.0, 0.0, 20.0).with_velocity(3.0, 0.0),
            body(2, 10.0, 0.0, 20.0).with_velocity(-1.0, 0.0),
        ];
        let config = EngineConfig { magnetism: true, ..EngineConfig::default() };
        let contact = PairContact::measure(&bodies[0], &bodies[1]).unwrap();
        let pull = contact.normal * (config.magnet_strength / (contact.dist * contact.dist));

        let stats = run(&mut bodies, &config);

        assert_eq!(stats.contacts, 1);
        assert_eq!(bodies[0].velocity, Vec2::new(-1.0, 0.0) - pull);
        assert_eq!(bodies[1].velocity, Vec2::new(3.0, 0.0) + pull);
    }

    #[test]
    fn near_coincident_magnets_stay_finite() {
        let mut bodies = vec![body(1, 0.0, 0.0, 10.0), body(2, 0.001, 0.0, 10.0)];
        let config = EngineConfig { magnetism: true, ..EngineConfig::default() };
        run(&mut bodies, &config);

        for b in &bodies {
            assert!(b.velocity.is_finite());
            // Capped by the denominator floor: 50 / 1e-4
            assert!(b.velocity.length() < 1e6);
        }
    }

    #[test]
    fn every_pair_is_visited_once() {
        let mut bodies: Vec<Body> = (0..5).map(|i| body(i + 1, i as f32 * 100.0, 0.0, 10.0)).collect();
        assert_eq!(run(&mut bodies, &EngineConfig::default()).pairs_checked, 10);
    }
}
