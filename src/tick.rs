/// Length of one logic tick in seconds. Gameplay delays are counted in
/// these fixed ticks regardless of how often `update` is actually called.
pub(crate) const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Fixed-tick accumulator used to gate per-tick-group gameplay delays
/// (walk acceleration, camera look nudges).
///
/// Feeding it variable frame durations keeps gameplay timing deterministic
/// at the nominal 60 ticks/second rate.
#[derive(Debug, Default, Clone)]
pub struct TickStepper {
    leftover: f32,
    elapsed_ticks: u32,
}

impl TickStepper {
    /// Fresh stepper with no accumulated time.
    pub fn new() -> Self {
        TickStepper::default()
    }

    /// Accumulate `dt` seconds; returns true once `desired_ticks` whole
    /// ticks have elapsed since the last time it fired, then restarts the
    /// count.
    pub fn update_and_check(&mut self, desired_ticks: u32, dt: f32) -> bool {
        self.leftover += dt;
        while self.leftover >= TICK_SECONDS {
            self.leftover -= TICK_SECONDS;
            self.elapsed_ticks += 1;
        }
        if self.elapsed_ticks >= desired_ticks {
            self.elapsed_ticks = 0;
            true
        } else {
            false
        }
    }
}
