use timer_core::Effect;

/// Sink for vibration requests; the device motor on hardware, a log line on host.
pub trait Haptics {
    fn vibe(&mut self, pattern_ms: &[u32]);
}

#[derive(Clone, Debug)]
pub struct AlertConfig {
    pub vibration: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { vibration: true }
    }
}

pub fn fire_alert<H: Haptics>(config: &AlertConfig, haptics: &mut H, effect: Effect) {
    log::info!("alert: {:?}", effect);
    if config.vibration {
        haptics.vibe(effect.vibe_pattern());
    }
}

/// Host stand-in for the vibration motor: rings the terminal bell.
pub struct TerminalHaptics;

impl Haptics for TerminalHaptics {
    fn vibe(&mut self, pattern_ms: &[u32]) {
        log::info!("vibe pattern {:?}", pattern_ms);
        eprint!("\x07");
    }
}
