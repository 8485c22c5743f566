//! Command-line configuration for the face binding

use clap::Parser;
use timer_core::parse_mmss;

use crate::alerts::AlertConfig;

#[derive(Parser, Debug)]
#[command(name = "countdown-face")]
#[command(about = "Countdown timer watch face driven from the terminal")]
#[command(version)]
pub struct Config {
    /// Tick period in milliseconds (one countdown second)
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Presses of the same button closer together than this count as one held gesture
    #[arg(long, default_value = "300")]
    pub repeat_ms: u64,

    /// Starting interval as MM:SS
    #[arg(long, default_value = "00:00", value_parser = parse_initial)]
    pub initial: u32,

    /// Disable the expiry vibration
    #[arg(long)]
    pub no_vibe: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            vibration: !self.no_vibe,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

fn parse_initial(s: &str) -> Result<u32, String> {
    parse_mmss(s).ok_or_else(|| format!("`{}` is not a time between 00:00 and 59:59", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["countdown-face"]);
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.repeat_ms, 300);
        assert_eq!(config.initial, 0);
        assert!(config.alert_config().vibration);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "countdown-face", "--initial", "02:30", "--no-vibe", "-v", "--tick-ms", "50",
        ]);
        assert_eq!(config.initial, 150);
        assert_eq!(config.tick_ms, 50);
        assert!(!config.alert_config().vibration);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_out_of_range_initial() {
        assert!(Config::try_parse_from(["countdown-face", "--initial", "75:00"]).is_err());
    }
}
