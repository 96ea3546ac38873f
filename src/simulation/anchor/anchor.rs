use tracing::debug;

use crate::core::error::{EngineError, Result};
use crate::rigid_body::{Body, BodyId};

use super::Sandbox;

fn find(world: &mut Sandbox, id: BodyId) -> Result<&mut Body> {
    world.body_mut(id).ok_or(EngineError::UnknownBody(id))
}

pub(super) fn anchor(world: &mut Sandbox, id: BodyId) -> Result<()> {
    let body = find(world, id)?;
    if !body.anchored {
        body.anchor();
        debug!(id, "body anchored");
    }
    Ok(())
}

pub(super) fn unanchor(world: &mut Sandbox, id: BodyId) -> Result<()> {
    find(world, id)?.unanchor();
    Ok(())
}

pub(super) fn toggle_anchor(world: &mut Sandbox, id: BodyId) -> Result<bool> {
    let body = find(world, id)?;
    if body.anchored {
        body.unanchor();
    } else {
        body.anchor();
    }
    Ok(body.anchored)
}

/// Every body whose box strictly contains the point flips its anchor.
pub(super) fn anchor_at(world: &mut Sandbox, x: f32, y: f32) -> usize {
    let mut toggled = 0;
    for body in world.bodies.iter_mut().filter(|b| b.contains_point(x, y)) {
        if body.anchored {
            body.unanchor();
        } else {
            body.anchor();
        }
        toggled += 1;
    }
    toggled
}
