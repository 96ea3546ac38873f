use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::error::{EngineError, Result};
use crate::domain::EngineConfig;
use crate::rigid_body::{Body, BodyId};

use super::types::StepStats;

pub type SpringId = u32;

pub const DEFAULT_REST_LENGTH: f32 = 100.0;
pub const DEFAULT_STIFFNESS: f32 = 0.05;

/// Hookean link between two bodies, by id. Springs never own their endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Spring {
    pub id: SpringId,
    pub a: BodyId,
    pub b: BodyId,
    pub rest_length: f32,
    /// k
    pub stiffness: f32,
}

impl Spring {
    pub fn touches(&self, body: BodyId) -> bool {
        self.a == body || self.b == body
    }
}

/// Springs in registration order. Application order is this order.
pub struct SpringRegistry {
    springs: Vec<Spring>,
    next_id: SpringId,
}

impl SpringRegistry {
    pub fn new() -> Self {
        Self {
            springs: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, a: BodyId, b: BodyId, rest_length: f32, stiffness: f32) -> Result<SpringId> {
        if a == b {
            return Err(EngineError::InvalidConfig(format!("spring endpoints must differ, got {} twice", a)));
        }
        if !rest_length.is_finite() || rest_length < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "spring rest length must be finite and >= 0, got {}",
                rest_length
            )));
        }
        if !stiffness.is_finite() {
            return Err(EngineError::InvalidConfig(format!("spring stiffness must be finite, got {}", stiffness)));
        }

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.springs.push(Spring { id, a, b, rest_length, stiffness });
        debug!(spring = id, a, b, rest_length, stiffness, "spring added");
        Ok(id)
    }

    pub fn remove(&mut self, id: SpringId) -> bool {
        let before = self.springs.len();
        self.springs.retain(|s| s.id != id);
        self.springs.len() != before
    }

    /// Drop every spring attached to `body`. Returns how many went.
    pub fn remove_attached(&mut self, body: BodyId) -> usize {
        let before = self.springs.len();
        self.springs.retain(|s| !s.touches(body));
        let removed = before - self.springs.len();
        if removed > 0 {
            debug!(body, removed, "pruned springs of removed body");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.springs.clear();
        self.next_id = 1;
    }

    pub fn get(&self, id: SpringId) -> Option<&Spring> {
        self.springs.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spring> {
        self.springs.iter()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Map every spring endpoint to its slot in `bodies`.
    ///
    /// Fails on the first endpoint that is not in the slice.
    pub fn resolve(&self, index: &HashMap<BodyId, usize>) -> Result<Vec<(usize, usize)>> {
        self.springs
            .iter()
            .map(|s| -> Result<(usize, usize)> {
                let lookup = |body: BodyId| {
                    index
                        .get(&body)
                        .copied()
                        .ok_or(EngineError::DanglingReference { spring: s.id, body })
                };
                Ok((lookup(s.a)?, lookup(s.b)?))
            })
            .collect()
    }
}

impl Default for SpringRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Below this centre distance a spring has no direction and is skipped.
const MIN_SPRING_DISTANCE: f32 = 1e-6;

/// One impulse per spring: `k * (dist - rest)` along the centre line, equal
/// and opposite, plus a spin nudge proportional to the tension.
///
/// `slots` comes from [`SpringRegistry::resolve`] against the same slice.
pub fn apply_springs(
    bodies: &mut [Body],
    registry: &SpringRegistry,
    slots: &[(usize, usize)],
    config: &EngineConfig,
    stats: &mut StepStats,
) {
    for (spring, &(ia, ib)) in registry.iter().zip(slots) {
        let delta = bodies[ia].center() - bodies[ib].center();
        let dist = delta.length();
        if dist < MIN_SPRING_DISTANCE {
            stats.degenerate_pairs += 1;
            trace!(spring = spring.id, "spring endpoints coincide, skipped");
            continue;
        }

        let force = spring.stiffness * (dist - spring.rest_length);
        let impulse = delta.div_len(dist) * force;
        let spin = force * config.spring_spin;

        let a = &mut bodies[ia];
        if !a.anchored {
            a.velocity -= impulse;
            a.angular_vel += spin;
        }
        let b = &mut bodies[ib];
        if !b.anchored {
            b.velocity += impulse;
            b.angular_vel -= spin;
        }
        stats.springs_applied += 1;
    }
}
