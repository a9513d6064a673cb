use crate::rigid_body::{RigidBody, Shape, Vec2};

/// A single contact between bodies `a` and `b` (indices into the body list).
///
/// `normal` points from `a` towards `b`.
#[derive(Clone, Copy, Debug)]
pub(super) struct Contact {
    pub a: usize,
    pub b: usize,
    pub normal: Vec2,
    pub depth: f32,
    pub point: Vec2,
    /// Normal velocity the solver aims for (restitution bounce)
    pub target_vn: f32,
    pub normal_impulse: f32,
    pub tangent_impulse: f32,
}

/// Narrow phase for one pair. Box/box pairs never collide (both are static).
pub(super) fn detect(a: &RigidBody, b: &RigidBody) -> Option<(Vec2, f32, Vec2)> {
    match (a.shape, b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => circle_circle(a.pos, ra, b.pos, rb),
        (Shape::Circle { radius }, Shape::Rect { half_width, half_height }) => {
            circle_rect(a.pos, radius, b.pos, half_width, half_height)
        }
        (Shape::Rect { half_width, half_height }, Shape::Circle { radius }) => {
            circle_rect(b.pos, radius, a.pos, half_width, half_height).map(|(n, d, p)| (-n, d, p))
        }
        (Shape::Rect { .. }, Shape::Rect { .. }) => None,
    }
}

fn circle_circle(pa: Vec2, ra: f32, pb: Vec2, rb: f32) -> Option<(Vec2, f32, Vec2)> {
    let delta = pb - pa;
    let dist2 = delta.length_squared();
    let reach = ra + rb;
    if dist2 >= reach * reach {
        return None;
    }

    let dist = dist2.sqrt();
    // Coincident centers: push straight up so the result stays deterministic.
    let normal = if dist > 1e-4 { delta * (1.0 / dist) } else { Vec2::new(0.0, -1.0) };
    let point = pa + normal * (ra - (reach - dist) * 0.5);
    Some((normal, reach - dist, point))
}

/// Circle vs axis-aligned box. Normal points from the circle into the box.
fn circle_rect(pc: Vec2, r: f32, pr: Vec2, hw: f32, hh: f32) -> Option<(Vec2, f32, Vec2)> {
    let closest = Vec2::new(
        pc.x.clamp(pr.x - hw, pr.x + hw),
        pc.y.clamp(pr.y - hh, pr.y + hh),
    );
    let delta = closest - pc;
    let dist2 = delta.length_squared();

    if dist2 > 1e-8 {
        if dist2 >= r * r {
            return None;
        }
        let dist = dist2.sqrt();
        return Some((delta * (1.0 / dist), r - dist, closest));
    }

    // Center is inside the box: exit through the nearest face.
    let overlap_x = hw - (pc.x - pr.x).abs();
    let overlap_y = hh - (pc.y - pr.y).abs();
    if overlap_x < overlap_y {
        let sign = if pc.x < pr.x { 1.0 } else { -1.0 };
        let normal = Vec2::new(sign, 0.0);
        Some((normal, overlap_x + r, Vec2::new(pr.x - sign * hw, pc.y)))
    } else {
        let sign = if pc.y < pr.y { 1.0 } else { -1.0 };
        let normal = Vec2::new(0.0, sign);
        Some((normal, overlap_y + r, Vec2::new(pc.x, pr.y - sign * hh)))
    }
}
