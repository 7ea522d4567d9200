//! Fixed-rate simulation clock.
//!
//! Turns wall-clock deltas from the host loop into whole 16ms steps. The
//! clock only accumulates time while running.

use super::constants::{MAX_FRAME_DELTA_MS, TICK_INTERVAL_MS};

#[derive(Debug, Clone)]
pub struct FixedClock {
    step_ms: u64,
    running: bool,
    /// Sub-step time carried over between calls (milliseconds).
    accumulated_ms: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl FixedClock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            step_ms: step_ms.max(1),
            running: false,
            accumulated_ms: 0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop immediately and drop any partial step.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step_ms(&self) -> u64 {
        self.step_ms
    }

    /// Feed `dt_ms` of wall time and return how many steps are due.
    ///
    /// `dt_ms` is clamped so a long stall (suspend, debugger) never turns
    /// into a burst of catch-up steps.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }

        self.accumulated_ms += dt_ms.min(MAX_FRAME_DELTA_MS);
        let steps = self.accumulated_ms / self.step_ms;
        self.accumulated_ms %= self.step_ms;
        steps as u32
    }
}
