use std::collections::HashMap;

use crate::core::error::Result;
use crate::rigid_body::{Body, BodyId};

use super::Sandbox;

/// Floats per body in the shape buffer: cx, cy, size, angle, kind
pub const RENDER_STRIDE: usize = 5;
/// Floats per spring in the segment buffer: ax, ay, bx, by
pub const SPRING_STRIDE: usize = 4;

pub(super) fn extract_render(world: &mut Sandbox) -> usize {
    let render = &mut world.render;
    render.shapes.clear();
    render.colors.clear();
    render.springs.clear();

    for body in &world.bodies {
        let c = body.center();
        render.shapes.extend_from_slice(&[
            c.x,
            c.y,
            body.size,
            body.angle,
            f32::from(body.appearance.kind.as_u8()),
        ]);
        render.colors.push(body.appearance.color);
    }

    let by_id: HashMap<BodyId, &Body> = world.bodies.iter().map(|b| (b.id, b)).collect();
    for spring in world.engine.springs() {
        // Sandbox prunes on removal, so a miss here means a caller went
        // through engine_mut() directly. Nothing sensible to draw.
        let (Some(a), Some(b)) = (by_id.get(&spring.a), by_id.get(&spring.b)) else {
            continue;
        };
        let (ca, cb) = (a.center(), b.center());
        render.springs.extend_from_slice(&[ca.x, ca.y, cb.x, cb.y]);
    }

    world.bodies.len()
}

pub(super) fn bodies_json(world: &Sandbox) -> Result<String> {
    Ok(serde_json::to_string(&world.bodies)?)
}
