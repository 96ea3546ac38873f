use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::core::error::{EngineError, Result};
use crate::domain::config::{require_finite, require_unit};
use crate::domain::EngineConfig;
use crate::rigid_body::{Body, BodyId, Vec2};

use super::boundary::resolve_boundary;
use super::collision::resolve_pairs;
use super::forces::{apply_force_field, integrate, pin};
use super::springs::{apply_springs, Spring, SpringId, SpringRegistry, DEFAULT_REST_LENGTH, DEFAULT_STIFFNESS};
use super::types::{Bounds, StepStats};

/// Contact-spin generator. ChaCha output is specified per seed, so native and
/// wasm32 builds replay the same spins.
pub type SpinRng = ChaCha8Rng;

/// The physics step engine.
///
/// Holds tunables, the spring registry and the contact-spin RNG. Bodies are
/// never owned: each `step` borrows the caller's list.
pub struct Engine {
    config: EngineConfig,
    springs: SpringRegistry,
    rng: SpinRng,
    stats: StepStats,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = SpinRng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            springs: SpringRegistry::new(),
            rng,
            stats: StepStats::default(),
        })
    }

    /// Advance `bodies` by one frame inside `bounds`.
    ///
    /// Order: integrate + walls per body, then every pair, then springs.
    /// Everything is validated first; on error no body has been touched.
    pub fn step(&mut self, bodies: &mut [Body], bounds: Bounds) -> Result<()> {
        bounds.validate()?;
        let slots = self.prepare(bodies).inspect_err(|e| warn!(error = %e, "step rejected"))?;

        let mut stats = StepStats::default();

        for body in bodies.iter_mut() {
            if body.anchored {
                pin(body);
                continue;
            }
            integrate(body, &self.config);
            if resolve_boundary(body, bounds, &self.config) {
                stats.boundary_hits += 1;
            }
        }

        resolve_pairs(bodies, &self.config, &mut self.rng, &mut stats);
        apply_springs(bodies, &self.springs, &slots, &self.config, &mut stats);

        self.stats = stats;
        Ok(())
    }

    /// Validate bodies and map spring endpoints to slice slots.
    fn prepare(&self, bodies: &[Body]) -> Result<Vec<(usize, usize)>> {
        let mut index: HashMap<BodyId, usize> = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            body.validate()?;
            if index.insert(body.id, i).is_some() {
                return Err(EngineError::InvalidBody { id: body.id, reason: "duplicate id in body list" });
            }
        }
        self.springs.resolve(&index)
    }

    // === Configuration ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_wind(&mut self, wind: f32) -> Result<()> {
        require_finite("wind", wind)?;
        self.config.wind = wind;
        Ok(())
    }

    pub fn wind(&self) -> f32 {
        self.config.wind
    }

    pub fn clear_wind(&mut self) {
        self.config.wind = 0.0;
    }

    pub fn toggle_magnetism(&mut self, enabled: bool) {
        debug!(enabled, "magnetism toggled");
        self.config.magnetism = enabled;
    }

    pub fn magnetism(&self) -> bool {
        self.config.magnetism
    }

    pub fn set_gravity(&mut self, gravity: f32) -> Result<()> {
        require_finite("gravity", gravity)?;
        self.config.gravity = gravity;
        Ok(())
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    pub fn set_bounce(&mut self, bounce: f32) -> Result<()> {
        require_unit("bounce", bounce)?;
        self.config.bounce = bounce;
        Ok(())
    }

    pub fn bounce(&self) -> f32 {
        self.config.bounce
    }

    pub fn set_friction(&mut self, friction: f32) -> Result<()> {
        require_unit("friction", friction)?;
        self.config.friction = friction;
        Ok(())
    }

    pub fn friction(&self) -> f32 {
        self.config.friction
    }

    pub fn set_air_drag(&mut self, air_drag: f32) -> Result<()> {
        require_unit("air_drag", air_drag)?;
        self.config.air_drag = air_drag;
        Ok(())
    }

    pub fn air_drag(&self) -> f32 {
        self.config.air_drag
    }

    /// Restart the contact-spin sequence.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = SpinRng::seed_from_u64(seed);
    }

    // === Springs ===

    pub fn add_spring(&mut self, a: BodyId, b: BodyId, rest_length: f32, stiffness: f32) -> Result<SpringId> {
        self.springs.add(a, b, rest_length, stiffness)
    }

    /// Rest length 100, k = 0.05
    pub fn add_default_spring(&mut self, a: BodyId, b: BodyId) -> Result<SpringId> {
        self.add_spring(a, b, DEFAULT_REST_LENGTH, DEFAULT_STIFFNESS)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> bool {
        self.springs.remove(id)
    }

    /// Forget every spring attached to `body`; call when the body is destroyed.
    pub fn prune_springs(&mut self, body: BodyId) -> usize {
        self.springs.remove_attached(body)
    }

    pub fn clear_springs(&mut self) {
        self.springs.clear();
    }

    pub fn springs(&self) -> impl Iterator<Item = &Spring> {
        self.springs.iter()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    // === External forces ===

    /// Velocity impulse on one body; anchored bodies ignore it.
    pub fn apply_force(&self, body: &mut Body, fx: f32, fy: f32) -> Result<()> {
        require_finite("force x", fx)?;
        require_finite("force y", fy)?;
        let impulse = Vec2::new(fx, fy);
        if !(body.velocity + impulse).is_finite() {
            return Err(EngineError::InvalidBody { id: body.id, reason: "impulse overflows velocity" });
        }
        body.apply_impulse(impulse);
        Ok(())
    }

    pub fn apply_force_field(&self, bodies: &mut [Body], cx: f32, cy: f32, strength: f32) -> Result<()> {
        apply_force_field(bodies, Vec2::new(cx, cy), strength)
            .inspect_err(|e| warn!(error = %e, "force field rejected"))
    }

    /// Counters from the last successful step
    pub fn last_stats(&self) -> StepStats {
        self.stats
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            springs: SpringRegistry::new(),
            rng: SpinRng::seed_from_u64(crate::domain::config::DEFAULT_SEED),
            stats: StepStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Appearance;

    const BOUNDS: Bounds = Bounds { width: 800.0, height: 600.0 };

    fn body(id: BodyId, x: f32, y: f32) -> Body {
        Body::new(id, x, y, 20.0, 1.0, Appearance::default())
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = EngineConfig { friction: 2.0, ..EngineConfig::default() };
        assert!(matches!(Engine::new(config), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn dangling_spring_fails_before_any_mutation() {
        let mut engine = Engine::default();
        engine.add_default_spring(1, 2).unwrap();
        let mut bodies = vec![body(1, 100.0, 100.0).with_velocity(1.0, 1.0)];
        let before = bodies.clone();

        let err = engine.step(&mut bodies, BOUNDS).unwrap_err();
        assert!(matches!(err, EngineError::DanglingReference { body: 2, .. }));
        assert_eq!(bodies, before);
    }

    #[test]
    fn non_finite_body_is_rejected() {
        let mut engine = Engine::default();
        let mut bodies = vec![body(1, 100.0, 100.0), body(2, f32::NAN, 0.0)];
        let before = bodies.clone();
        assert!(matches!(
            engine.step(&mut bodies, BOUNDS),
            Err(EngineError::InvalidBody { id: 2, .. })
        ));
        assert_eq!(bodies[0], before[0]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut engine = Engine::default();
        let mut bodies = vec![body(1, 100.0, 100.0), body(1, 300.0, 100.0)];
        assert!(engine.step(&mut bodies, BOUNDS).is_err());
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let mut engine = Engine::default();
        let mut bodies = vec![body(1, 100.0, 100.0)];
        assert!(engine.step(&mut bodies, Bounds::new(0.0, 600.0)).is_err());
        assert!(engine.step(&mut bodies, Bounds::new(800.0, f32::NAN)).is_err());
    }

    #[test]
    fn setters_validate_and_apply() {
        let mut engine = Engine::default();
        engine.set_wind(0.3).unwrap();
        engine.set_gravity(1.0).unwrap();
        engine.toggle_magnetism(true);
        assert_eq!(engine.wind(), 0.3);
        assert_eq!(engine.gravity(), 1.0);
        assert!(engine.magnetism());

        assert!(engine.set_bounce(1.2).is_err());
        assert!(engine.set_wind(f32::INFINITY).is_err());
        assert_eq!(engine.bounce(), 0.7);
        assert_eq!(engine.wind(), 0.3);
    }

    #[test]
    fn wind_pushes_free_bodies_sideways() {
        let mut engine = Engine::new(EngineConfig { gravity: 0.0, ..EngineConfig::default() }).unwrap();
        engine.set_wind(1.0).unwrap();
        let mut bodies = vec![body(1, 100.0, 100.0)];
        engine.step(&mut bodies, BOUNDS).unwrap();
        assert!(bodies[0].pos.x > 100.0);
        assert_eq!(bodies[0].pos.y, 100.0);
    }

    #[test]
    fn apply_force_rejects_bad_impulses_without_mutation() {
        let engine = Engine::default();
        let mut b = body(1, 100.0, 100.0).with_velocity(f32::MAX, 0.0);
        let before = b.clone();

        assert!(matches!(engine.apply_force(&mut b, f32::NAN, 0.0), Err(EngineError::InvalidConfig(_))));
        assert!(matches!(
            engine.apply_force(&mut b, f32::MAX, 0.0),
            Err(EngineError::InvalidBody { id: 1, .. })
        ));
        assert_eq!(b, before);

        engine.apply_force(&mut b, -1.0, 2.0).unwrap();
        assert_eq!(b.velocity.y, 2.0);
    }

    #[test]
    fn rejected_force_field_keeps_the_world_steppable() {
        let mut engine = Engine::default();
        let mut bodies = vec![body(1, 100.0, 100.0), body(2, 300.0, 100.0)];

        assert!(engine.apply_force_field(&mut bodies, 400.0, 300.0, f32::NAN).is_err());
        // Field point on body 2's centre
        assert!(engine.apply_force_field(&mut bodies, 310.0, 110.0, 1e38).is_err());
        for _ in 0..3 {
            engine.step(&mut bodies, BOUNDS).unwrap();
        }
        assert!(bodies.iter().all(|b| b.velocity.is_finite()));
    }

    #[test]
    fn reseed_replays_the_same_contact_spins() {
        fn spins(engine: &mut Engine) -> Vec<f32> {
            let mut bodies = vec![body(1, 100.0, 100.0), body(2, 110.0, 100.0)];
            engine.step(&mut bodies, BOUNDS).unwrap();
            bodies.iter().map(|b| b.angular_vel).collect()
        }

        let mut engine = Engine::default();
        let first = spins(&mut engine);
        let _ = spins(&mut engine);
        engine.reseed(crate::domain::config::DEFAULT_SEED);
        assert_eq!(spins(&mut engine), first);

        let mut fresh = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(spins(&mut fresh), first);
    }

    #[test]
    fn stats_count_pairs_and_wall_hits() {
        let mut engine = Engine::default();
        let mut bodies = vec![body(1, 100.0, 100.0), body(2, 300.0, 590.0), body(3, 500.0, 100.0)];
        engine.step(&mut bodies, BOUNDS).unwrap();

        let stats = engine.last_stats();
        assert_eq!(stats.pairs_checked, 3);
        assert_eq!(stats.boundary_hits, 1);
        assert_eq!(stats.contacts, 0);
    }
}
