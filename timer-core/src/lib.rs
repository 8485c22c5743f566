//! Pure countdown logic with no platform dependencies.
//! Testable on host, driven on device by a thin event binding.

mod countdown;
mod editor;
mod face;

pub use countdown::{CountdownTimer, TimerState};
pub use editor::{aligned, step_for, Direction, IntervalEditor};
pub use face::{SelectOutcome, TimerFace};

/// Largest representable interval: 59:59.
pub const MAX_INTERVAL_SECS: u32 = 59 * 60 + 59;

/// Buzz-pause-buzz-pause-buzz, in milliseconds.
pub const EXPIRY_VIBE_PATTERN_MS: [u32; 5] = [500, 300, 500, 300, 300];

/// Side effects the core asks the binding to perform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    /// The countdown reached zero; play [`EXPIRY_VIBE_PATTERN_MS`] once.
    Expired,
}

impl Effect {
    pub fn vibe_pattern(&self) -> &'static [u32] {
        match self {
            Effect::Expired => &EXPIRY_VIBE_PATTERN_MS,
        }
    }
}

/// Format whole seconds as "MM:SS"
pub fn format_mmss(seconds: u32) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}", m, s)
}

/// Parse "MM:SS" (or plain seconds) back into whole seconds.
///
/// Returns `None` for malformed input or anything past 59:59.
pub fn parse_mmss(s: &str) -> Option<u32> {
    let parts: Vec<&str> = s.split(':').collect();
    let secs = match parts.len() {
        1 => parts[0].trim().parse::<u32>().ok()?,
        2 => {
            let mins = parts[0].trim().parse::<u32>().ok()?;
            let secs = parts[1].trim().parse::<u32>().ok()?;
            if secs >= 60 {
                return None;
            }
            mins.checked_mul(60)?.checked_add(secs)?
        }
        _ => return None,
    };
    if secs > MAX_INTERVAL_SECS {
        None
    } else {
        Some(secs)
    }
}
