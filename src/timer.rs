/// Fuse for the current prompt.
///
/// Counts down by the wall-clock delta measured each tick and reports a
/// timeout once per crossing of zero. `reset` re-arms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: i64,
    fired: bool,
}

impl Countdown {
    pub fn new(initial_ms: u64) -> Self {
        Self {
            remaining_ms: clamp_ms(initial_ms),
            fired: false,
        }
    }

    pub fn reset(&mut self, initial_ms: u64) {
        self.remaining_ms = clamp_ms(initial_ms);
        self.fired = false;
    }

    /// Subtracts `delta_ms`. Returns `true` only on the tick that crosses zero.
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(clamp_ms(delta_ms));
        if self.remaining_ms <= 0 && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    /// Remaining time, which may be negative after the fuse has burnt out.
    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms <= 0
    }

    /// Whole seconds shown to the player (`remaining / 1000 + 1`).
    pub fn display_secs(&self) -> i64 {
        self.remaining_ms.max(0) / 1000 + 1
    }
}

fn clamp_ms(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}
