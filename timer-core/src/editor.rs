use crate::MAX_INTERVAL_SECS;

/// Which way a directional button moves the interval.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

/// Step size for a press-and-hold gesture: the longer the hold, the coarser the step.
pub fn step_for(repeat_count: u32) -> u32 {
    if repeat_count > 15 {
        15
    } else if repeat_count > 10 {
        10
    } else if repeat_count > 5 {
        5
    } else {
        1
    }
}

/// Round `value` down to a multiple of `step`. A step of 1 leaves it untouched.
pub fn aligned(value: u32, step: u32) -> u32 {
    if step <= 1 {
        return value;
    }
    value / step * step
}

/// Holds the interval the user is dialing in before the countdown is armed.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalEditor {
    value: u32,
    step: u32,
}

impl Default for IntervalEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalEditor {
    pub fn new() -> Self {
        Self { value: 0, step: 1 }
    }

    pub fn with_value(seconds: u32) -> Self {
        let mut editor = Self::new();
        editor.set_value(seconds);
        editor
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Step used by the most recent adjustment.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Out-of-range values wrap to 0, same as stepping past 59:59.
    pub fn set_value(&mut self, seconds: u32) {
        self.value = if seconds > MAX_INTERVAL_SECS { 0 } else { seconds };
    }

    /// Apply one adjustment and return the new value for display.
    ///
    /// Coarse steps first snap the value onto their grid, so holding a button
    /// always lands on round numbers. Past either end the value wraps around
    /// (59:59 -> 00:00 and 00:00 -> 59:59) rather than clamping.
    pub fn adjust(&mut self, repeat_count: u32, direction: Direction) -> u32 {
        self.step = step_for(repeat_count);
        let candidate =
            aligned(self.value, self.step) as i32 + direction.sign() * self.step as i32;

        self.value = if candidate > MAX_INTERVAL_SECS as i32 {
            0
        } else if candidate < 0 {
            MAX_INTERVAL_SECS
        } else {
            candidate as u32
        };
        self.value
    }
}
