use crate::constants::{CLOCK_SPEED, MAX_SAVED_STATES, TIMER_SPEED};
use crate::error::{Chip8Error, Result};

/// Pacing works in whole nanoseconds, so nothing can run faster than once per nanosecond
pub const MAX_RATE_HZ: u32 = 1_000_000_000;

/// Knobs for a single machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second
    pub clock_hz: u32,
    /// Timer ticks per second; 60 on every real Chip-8
    pub timer_hz: u32,
    /// Release a key once EX9E, EXA1 or FX0A has seen it held.
    /// Off by default: keys stay down until the frontend reports them released.
    pub clear_keys_on_read: bool,
    /// Seed for CXKK; random when unset
    pub seed: Option<u64>,
    /// How many past states to keep for rewinding
    pub history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_hz: CLOCK_SPEED,
            timer_hz: TIMER_SPEED,
            clear_keys_on_read: false,
            seed: None,
            history: MAX_SAVED_STATES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_rate("clock", self.clock_hz)?;
        check_rate("timer", self.timer_hz)
    }
}

fn check_rate(name: &str, hz: u32) -> Result<()> {
    if hz == 0 || hz > MAX_RATE_HZ {
        return Err(Chip8Error::InvalidConfig(format!(
            "{} rate must be between 1Hz and {}Hz, got {}Hz",
            name, MAX_RATE_HZ, hz
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.clock_hz, 60);
        assert_eq!(config.timer_hz, 60);
        assert!(!config.clear_keys_on_read);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_rates() {
        let config = Config {
            clock_hz: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Chip8Error::InvalidConfig(_))
        ));
        let config = Config {
            timer_hz: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_rates_faster_than_a_nanosecond() {
        let config = Config {
            clock_hz: MAX_RATE_HZ + 1,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Chip8Error::InvalidConfig(_))
        ));
        let config = Config {
            timer_hz: 2_000_000_000,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_the_fastest_rate() {
        let config = Config {
            clock_hz: MAX_RATE_HZ,
            timer_hz: MAX_RATE_HZ,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
