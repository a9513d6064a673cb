use crate::input::{PagePointer, SurfaceMetrics};
use crate::rigid_body::{BodyId, Vec2};

use super::{DisplayImage, Simulation};

pub(super) fn pointer_moved<I: DisplayImage>(
    sim: &mut Simulation<I>,
    event: PagePointer,
    surface: SurfaceMetrics,
) -> bool {
    if !sim.is_running() {
        return false;
    }
    sim.pointer.update_from_event(event, surface)
}

pub(super) fn set_pointer<I: DisplayImage>(sim: &mut Simulation<I>, position: Vec2) -> bool {
    if !sim.is_running() || !position.is_finite() {
        return false;
    }
    sim.pointer.update(position);
    true
}

pub(super) fn pointer_pressed<I: DisplayImage>(sim: &mut Simulation<I>) -> Option<BodyId> {
    if !sim.is_running() {
        return None;
    }
    let pointer = sim.pointer.current()?;
    sim.grab.press(&sim.world, pointer)
}

pub(super) fn pointer_released<I: DisplayImage>(sim: &mut Simulation<I>) {
    sim.grab.release();
}
