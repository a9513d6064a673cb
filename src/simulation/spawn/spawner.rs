//! Body Spawner - staggered, one-shot insertions above the viewport
//!
//! `schedule` hands out N tickets, the i-th due at `start + i * stagger`.
//! The lifecycle redeems due tickets on every tick; cancelling drops the
//! remaining ones so nothing can land in a torn-down world.

use std::collections::VecDeque;

use crate::core::random::Rng;
use crate::domain::config::SimulationConfig;
use crate::rigid_body::RigidBody;

use super::Viewport;

/// One pending insertion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnTicket {
    pub index: u32,
    pub due_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SpawnSchedule {
    tickets: VecDeque<SpawnTicket>,
}

impl SpawnSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, count: u32, stagger_ms: f64, start_ms: f64) {
        self.tickets.clear();
        self.tickets.extend((0..count).map(|index| SpawnTicket {
            index,
            due_ms: start_ms + index as f64 * stagger_ms,
        }));
    }

    /// Next ticket due at or before `now_ms` (tickets are in due order)
    pub fn pop_due(&mut self, now_ms: f64) -> Option<SpawnTicket> {
        match self.tickets.front() {
            Some(t) if t.due_ms <= now_ms => self.tickets.pop_front(),
            _ => None,
        }
    }

    pub fn pending(&self) -> usize {
        self.tickets.len()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.tickets.front().map(|t| t.due_ms)
    }

    /// Drop every remaining ticket
    pub fn cancel(&mut self) -> usize {
        let dropped = self.tickets.len();
        self.tickets.clear();
        dropped
    }
}

/// Build one falling body: x uniform over the width, y inside the band above the top edge.
pub(super) fn spawn_body(rng: &mut Rng, viewport: Viewport, config: &SimulationConfig) -> RigidBody {
    let x = rng.range(0.0, viewport.width);
    let y = -config.spawn_band_top - rng.next_f32() * config.spawn_band_height;

    let mut body = RigidBody::new_circle(x, y, config.body_radius);
    body.set_restitution(config.restitution);
    body
}
