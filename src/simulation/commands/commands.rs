use tracing::debug;

use crate::core::error::{EngineError, Result};
use crate::domain::{Appearance, ShapeKind};
use crate::physics::SpringId;
use crate::rigid_body::{Body, BodyId};

use super::{Sandbox, COPY_OFFSET};

pub(super) fn spawn(
    world: &mut Sandbox,
    kind: ShapeKind,
    x: f32,
    y: f32,
    size: f32,
    color: u32,
    mass: f32,
) -> Result<BodyId> {
    let id = world.next_id;
    let body = Body::new(id, x, y, size, mass, Appearance::new(kind, color));
    body.validate()?;

    world.next_body_id();
    world.bodies.push(body);
    debug!(id, kind = kind.name(), x, y, size, "body spawned");
    Ok(id)
}

pub(super) fn remove_body(world: &mut Sandbox, id: BodyId) -> bool {
    let Some(idx) = world.bodies.iter().position(|b| b.id == id) else {
        return false;
    };
    // Keep render order stable; the pair pass iterates in list order.
    world.bodies.remove(idx);
    world.engine.prune_springs(id);
    debug!(id, "body removed");
    true
}

pub(super) fn copy_body(world: &mut Sandbox, id: BodyId) -> Result<BodyId> {
    let source = world.body(id).ok_or(EngineError::UnknownBody(id))?.clone();

    let new_id = spawn(
        world,
        source.appearance.kind,
        source.pos.x + COPY_OFFSET,
        source.pos.y + COPY_OFFSET,
        source.size,
        source.appearance.color,
        source.mass,
    )?;

    if let Some(copy) = world.body_mut(new_id) {
        copy.velocity = source.velocity;
        copy.angle = source.angle;
        copy.angular_vel = source.angular_vel;
    }
    Ok(new_id)
}

pub(super) fn copy_anchored(world: &mut Sandbox) -> Vec<BodyId> {
    let anchored: Vec<BodyId> = world.bodies.iter().filter(|b| b.anchored).map(|b| b.id).collect();
    anchored
        .into_iter()
        .filter_map(|id| copy_body(world, id).ok())
        .collect()
}

pub(super) fn connect(
    world: &mut Sandbox,
    a: BodyId,
    b: BodyId,
    rest_length: f32,
    stiffness: f32,
) -> Result<SpringId> {
    for id in [a, b] {
        if world.body(id).is_none() {
            return Err(EngineError::UnknownBody(id));
        }
    }
    world.engine.add_spring(a, b, rest_length, stiffness)
}

pub(super) fn apply_force(world: &mut Sandbox, id: BodyId, fx: f32, fy: f32) -> Result<()> {
    let body = world
        .bodies
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or(EngineError::UnknownBody(id))?;
    world.engine.apply_force(body, fx, fy)
}

pub(super) fn apply_force_field(world: &mut Sandbox, cx: f32, cy: f32, strength: f32) -> Result<()> {
    world.engine.apply_force_field(&mut world.bodies, cx, cy, strength)
}

pub(super) fn clear_forces(world: &mut Sandbox) {
    for body in world.bodies.iter_mut() {
        body.clear_forces();
    }
}

pub(super) fn clear(world: &mut Sandbox) {
    world.bodies.clear();
    world.engine.clear_springs();
    world.next_id = 1;
    world.frame = 0;
}
