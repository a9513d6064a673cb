//! Fixed-step runner
//!
//! Converts host timestamps into a whole number of fixed physics steps.
//! Leftover time carries over to the next tick; long stalls (background
//! tabs) are capped at `max_steps` and the backlog dropped.

#[derive(Clone, Debug)]
pub struct Runner {
    step_ms: f64,
    max_steps: u32,
    last_ms: Option<f64>,
    accumulator: f64,
    running: bool,
}

impl Runner {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        Self {
            step_ms,
            max_steps: max_steps.max(1),
            last_ms: None,
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, now_ms: f64) {
        self.running = true;
        self.last_ms = Some(now_ms);
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_ms = None;
        self.accumulator = 0.0;
    }

    /// Number of fixed steps owed at `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }
        let last = self.last_ms.unwrap_or(now_ms);
        // Clocks going backwards contribute nothing.
        self.accumulator += (now_ms - last).max(0.0);
        self.last_ms = Some(now_ms.max(last));

        let mut steps = 0;
        while self.accumulator >= self.step_ms && steps < self.max_steps {
            self.accumulator -= self.step_ms;
            steps += 1;
        }
        // Still owing a full step after the cap means a stall: drop the backlog.
        if self.accumulator >= self.step_ms {
            self.accumulator = 0.0;
        }
        steps
    }
}
