use std::time::Duration;

/// Default lower bound of the delay between two steps.
pub const DEFAULT_TICK_MIN: Duration = Duration::from_millis(500);
/// Default upper bound of the delay between two steps.
pub const DEFAULT_TICK_MAX: Duration = Duration::from_millis(900);
/// Default pause between the last step and the verdict.
pub const DEFAULT_FINALIZE_DELAY: Duration = Duration::from_millis(600);

/// Timing of a simulated run.
///
/// Each tick waits for a delay drawn uniformly from `tick_min..=tick_max`, independently for every
/// tick. Once all steps are done the simulator waits `finalize_delay` before producing a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub tick_min: Duration,
    pub tick_max: Duration,
    pub finalize_delay: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_min: DEFAULT_TICK_MIN,
            tick_max: DEFAULT_TICK_MAX,
            finalize_delay: DEFAULT_FINALIZE_DELAY,
        }
    }
}

impl SimulatorConfig {
    pub fn with_tick_bounds(mut self, tick_min: Duration, tick_max: Duration) -> Self {
        self.tick_min = tick_min;
        self.tick_max = tick_max;
        self
    }

    pub fn with_finalize_delay(mut self, finalize_delay: Duration) -> Self {
        self.finalize_delay = finalize_delay;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_min > self.tick_max {
            return Err(ConfigError {
                msg: format!(
                    "Minimum tick delay {:?} is greater than the maximum {:?}",
                    self.tick_min, self.tick_max
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn tick_bounds_ms(&self) -> (u64, u64) {
        (as_millis(self.tick_min), as_millis(self.tick_max))
    }
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SimulatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((500, 900), config.tick_bounds_ms());
    }

    #[test]
    fn inverted_tick_bounds_are_rejected() {
        let config = SimulatorConfig::default()
            .with_tick_bounds(Duration::from_millis(900), Duration::from_millis(500));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("greater than the maximum"));
    }

    #[test]
    fn equal_tick_bounds_are_allowed() {
        let config = SimulatorConfig::default()
            .with_tick_bounds(Duration::from_millis(1), Duration::from_millis(1))
            .with_finalize_delay(Duration::ZERO);

        assert!(config.validate().is_ok());
    }
}
