//! Draw-over-physics compositing
//!
//! After each render pass the icon is drawn centered on every live body at
//! a fixed size. Collision radius plays no part and rotation is ignored:
//! icons stay axis-aligned.

use crate::rigid_body_system::RigidBodySystem;

use super::LiveBody;

/// A display image that may still be loading.
pub trait DisplayImage {
    fn is_ready(&self) -> bool;
}

/// A 2D drawing target.
pub trait Surface<I: ?Sized> {
    /// Wipe the previous frame
    fn clear(&mut self, width: f32, height: f32);

    /// Draw `image` into the rect with top-left (x, y)
    fn draw_image(&mut self, image: &I, x: f32, y: f32, width: f32, height: f32);
}

/// Largest device pixel ratio honoured for the backing buffer
pub const MAX_BACKING_SCALE: f64 = 4.0;

/// Backing-buffer scale for a reported device pixel ratio.
/// Simulation units stay CSS pixels; only the drawing resolution changes.
pub fn backing_scale(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_BACKING_SCALE)
    } else {
        1.0
    }
}

/// Backing-buffer side for a CSS length at `scale`
pub fn backing_size(css_length: f32, scale: f64) -> u32 {
    (css_length as f64 * scale).round().max(0.0) as u32
}

/// Top-left corner and size of the icon for a body centered at (x, y)
#[inline]
pub fn icon_rect(x: f32, y: f32, size: f32) -> (f32, f32, f32, f32) {
    let half = size * 0.5;
    (x - half, y - half, size, size)
}

/// Draw every ready icon. Returns how many were drawn.
pub(super) fn composite<I, S>(
    live: &[LiveBody<I>],
    world: &RigidBodySystem,
    display_size: f32,
    surface: &mut S,
) -> usize
where
    I: DisplayImage,
    S: Surface<I> + ?Sized,
{
    let mut drawn = 0;
    for entry in live {
        if !entry.image.is_ready() {
            continue;
        }
        let Some(body) = world.body(entry.id) else {
            continue;
        };
        let (x, y, w, h) = icon_rect(body.pos.x, body.pos.y, display_size);
        surface.draw_image(&entry.image, x, y, w, h);
        drawn += 1;
    }
    drawn
}
