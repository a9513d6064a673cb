//! Pointer input: page-space events to simulation space.
//!
//! The coordinate mapper undoes page scroll, the surface's on-screen offset
//! and the ratio between its CSS size and its backing buffer, then applies
//! the device pixel ratio:
//!
//! ```text
//! sim_x = (page_x - left - scroll_x) / (client_width / buffer_width) * pixel_ratio
//! ```
//!
//! Degenerate surfaces (zero or non-finite client size) map to `None` so the
//! pointer state is never fed non-finite positions.

use crate::rigid_body::Vec2;

/// Geometry of the drawing surface at the time of the event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    /// Bounding rect origin, viewport-relative
    pub left: f32,
    pub top: f32,
    /// On-screen (CSS) size
    pub client_width: f32,
    pub client_height: f32,
    /// Backing buffer size; 0 falls back to the client size
    pub buffer_width: f32,
    pub buffer_height: f32,
    pub pixel_ratio: f32,
}

impl SurfaceMetrics {
    /// Surface at the viewport origin whose buffer matches its CSS size.
    pub fn identity(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            client_width: width,
            client_height: height,
            buffer_width: width,
            buffer_height: height,
            pixel_ratio: 1.0,
        }
    }
}

/// A raw pointer-move sample in page space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PagePointer {
    pub page_x: f32,
    pub page_y: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// Map a page-space pointer into simulation space.
pub fn map_to_simulation(event: PagePointer, surface: SurfaceMetrics) -> Option<Vec2> {
    let x = map_axis(
        event.page_x - surface.left - event.scroll_x,
        surface.client_width,
        surface.buffer_width,
        surface.pixel_ratio,
    )?;
    let y = map_axis(
        event.page_y - surface.top - event.scroll_y,
        surface.client_height,
        surface.buffer_height,
        surface.pixel_ratio,
    )?;
    Some(Vec2::new(x, y))
}

fn map_axis(offset: f32, client: f32, buffer: f32, pixel_ratio: f32) -> Option<f32> {
    if !(client.is_finite() && client > 0.0) {
        return None;
    }
    let buffer = if buffer > 0.0 { buffer } else { client };
    let value = offset / (client / buffer) * pixel_ratio;
    value.is_finite().then_some(value)
}

/// Latest and previous pointer positions in simulation space.
///
/// Only [`PointerState::update`] writes it; `previous` always holds the value
/// `current` had before the last update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    current: Option<Vec2>,
    previous: Option<Vec2>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Vec2> {
        self.current
    }

    pub fn previous(&self) -> Option<Vec2> {
        self.previous
    }

    /// Displacement between the last two samples
    pub fn delta(&self) -> Vec2 {
        match (self.current, self.previous) {
            (Some(c), Some(p)) => c - p,
            _ => Vec2::zero(),
        }
    }

    pub fn update(&mut self, position: Vec2) {
        self.previous = self.current;
        self.current = Some(position);
    }

    /// Map and store an event. A degenerate surface leaves the state untouched.
    pub fn update_from_event(&mut self, event: PagePointer, surface: SurfaceMetrics) -> bool {
        match map_to_simulation(event, surface) {
            Some(position) => {
                self.update(position);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(x: f32, y: f32) -> PagePointer {
        PagePointer { page_x: x, page_y: y, ..Default::default() }
    }

    #[test]
    fn identity_scaling_subtracts_offset_and_scroll() {
        let surface = SurfaceMetrics { left: 10.0, top: 20.0, ..SurfaceMetrics::identity(800.0, 600.0) };
        let e = PagePointer { page_x: 300.0, page_y: 400.0, scroll_x: 50.0, scroll_y: 100.0 };
        let p = map_to_simulation(e, surface).expect("valid surface");
        assert_eq!(p, Vec2::new(240.0, 280.0));
    }

    #[test]
    fn mapping_is_linear() {
        let surface = SurfaceMetrics::identity(800.0, 600.0);
        let a = map_to_simulation(event(100.0, 50.0), surface).expect("a");
        let b = map_to_simulation(event(200.0, 100.0), surface).expect("b");
        assert_eq!(b, a * 2.0);
    }

    #[test]
    fn buffer_scale_and_pixel_ratio_apply() {
        // CSS 400x300 shown over an 800x600 buffer at pixel ratio 2.
        let surface = SurfaceMetrics {
            left: 0.0,
            top: 0.0,
            client_width: 400.0,
            client_height: 300.0,
            buffer_width: 800.0,
            buffer_height: 600.0,
            pixel_ratio: 2.0,
        };
        let p = map_to_simulation(event(100.0, 30.0), surface).expect("valid");
        assert_eq!(p, Vec2::new(400.0, 120.0));
    }

    #[test]
    fn zero_buffer_falls_back_to_client_size() {
        let surface = SurfaceMetrics { buffer_width: 0.0, buffer_height: 0.0, ..SurfaceMetrics::identity(800.0, 600.0) };
        let p = map_to_simulation(event(12.0, 34.0), surface).expect("valid");
        assert_eq!(p, Vec2::new(12.0, 34.0));
    }

    #[test]
    fn zero_client_size_is_rejected() {
        let surface = SurfaceMetrics { client_width: 0.0, ..SurfaceMetrics::identity(800.0, 600.0) };
        assert_eq!(map_to_simulation(event(1.0, 1.0), surface), None);

        let surface = SurfaceMetrics { client_height: f32::NAN, ..SurfaceMetrics::identity(800.0, 600.0) };
        assert_eq!(map_to_simulation(event(1.0, 1.0), surface), None);
    }

    #[test]
    fn previous_tracks_last_current() {
        let mut state = PointerState::new();
        assert_eq!(state.current(), None);

        state.update(Vec2::new(1.0, 1.0));
        state.update(Vec2::new(4.0, 5.0));
        assert_eq!(state.previous(), Some(Vec2::new(1.0, 1.0)));
        assert_eq!(state.current(), Some(Vec2::new(4.0, 5.0)));
        assert_eq!(state.delta(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn degenerate_event_is_a_no_op() {
        let mut state = PointerState::new();
        state.update(Vec2::new(7.0, 7.0));
        let before = state;

        let surface = SurfaceMetrics { client_width: 0.0, ..SurfaceMetrics::identity(800.0, 600.0) };
        assert!(!state.update_from_event(event(1.0, 1.0), surface));
        assert_eq!(state, before);
    }
}
