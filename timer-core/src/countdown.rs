use crate::{Effect, MAX_INTERVAL_SECS};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Idle,
    Running { remaining: u32 },
}

/// One-second resolution countdown, advanced by externally delivered ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct CountdownTimer {
    state: TimerState,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Arm the countdown with `seed` seconds.
    ///
    /// Ignored while already running. A zero seed would expire on the same
    /// instant it started, so it leaves the timer idle.
    pub fn start(&mut self, seed: u32) {
        if self.is_running() || seed == 0 {
            return;
        }
        self.state = TimerState::Running {
            remaining: seed.min(MAX_INTERVAL_SECS),
        };
    }

    /// Advance by one second. Returns `Some(Effect::Expired)` exactly once,
    /// on the tick that reaches zero. Stray ticks while idle are dropped.
    pub fn tick(&mut self) -> Option<Effect> {
        let TimerState::Running { remaining } = self.state else {
            return None;
        };
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = TimerState::Idle;
            Some(Effect::Expired)
        } else {
            self.state = TimerState::Running { remaining };
            None
        }
    }

    /// Stop immediately without any expiry effect. No-op while idle.
    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Seconds left, or 0 while idle.
    pub fn remaining(&self) -> u32 {
        match self.state {
            TimerState::Running { remaining } => remaining,
            TimerState::Idle => 0,
        }
    }
}
