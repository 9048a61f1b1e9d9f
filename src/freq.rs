//! Frequency to timer configuration mapping
//!
//! Selects a prescaler divisor and computes the integer counter top that
//! best approximates a requested frequency. Two divisor ranges are used so
//! that both very low and moderately high frequencies stay within the
//! counter's representable range: lower frequencies take the coarser
//! divisor, trading frequency resolution for range.

use crate::{Result, ToneError};

/// Frequencies at or above this threshold use the fine prescaler, below it
/// the coarse one. Historically tuned so low notes stay representable no
/// matter what the timer clock runs at.
pub const PRESCALER_SWITCH_HZ: u32 = 122;

/// Smallest usable counter top. A top of 0 or 1 leaves no duty range, so
/// computed tops are clamped here.
pub const MIN_TOP: u32 = 2;

const DEFAULT_CLOCK_HZ: u32 = 48_000_000;
const DEFAULT_COUNTER_MAX: u32 = 0x00FF_FFFF; // 24-bit counter

/// Timer clock divisor selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    /// Fine divisor (clock / 8), used at and above [`PRESCALER_SWITCH_HZ`]
    Div8,
    /// Coarse divisor (clock / 256), used below [`PRESCALER_SWITCH_HZ`]
    Div256,
}

impl Prescaler {
    /// The integer divisor applied to the timer clock
    pub fn divisor(&self) -> u32 {
        match self {
            Prescaler::Div8 => 8,
            Prescaler::Div256 => 256,
        }
    }
}

/// Computed timer configuration for one tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Selected clock divisor
    pub prescaler: Prescaler,
    /// Counter top (period) value, in `MIN_TOP..=counter_max`
    pub top: u32,
}

/// Static description of the target timer/counter peripheral
///
/// Holds the timer input clock and the counter's maximum representable
/// value. The default matches the reference platform: a 48 MHz clock
/// feeding a 24-bit counter.
#[derive(Debug, Clone, Copy)]
pub struct TimerSpec {
    clock_hz: u32,
    counter_max: u32,
}

impl TimerSpec {
    /// Create a timer spec with custom clock and counter width
    ///
    /// # Errors
    ///
    /// Returns [`ToneError::ConfigError`] if `clock_hz` is zero or
    /// `counter_max` is below [`MIN_TOP`].
    pub fn new(clock_hz: u32, counter_max: u32) -> Result<Self> {
        if clock_hz == 0 {
            return Err(ToneError::ConfigError(
                "timer clock must be non-zero".to_string(),
            ));
        }
        if counter_max < MIN_TOP {
            return Err(ToneError::ConfigError(format!(
                "counter max {} below minimum usable top {}",
                counter_max, MIN_TOP
            )));
        }
        Ok(TimerSpec {
            clock_hz,
            counter_max,
        })
    }

    /// Timer input clock in Hz
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Maximum representable counter value
    pub fn counter_max(&self) -> u32 {
        self.counter_max
    }

    /// Lowest requestable frequency in Hz (never below 1)
    ///
    /// Bounded by the coarse divisor and the counter width: below this the
    /// computed top would exceed the counter and gets clamped anyway.
    pub fn min_frequency(&self) -> u32 {
        let span = Prescaler::Div256.divisor() as u64 * (self.counter_max as u64 + 1);
        let f = (self.clock_hz as u64 + span - 1) / span;
        (f.min(u32::MAX as u64) as u32).max(1)
    }

    /// Highest requestable frequency in Hz
    ///
    /// Bounded by the fine divisor and [`MIN_TOP`]: above this the period
    /// is too short for any usable duty range.
    pub fn max_frequency(&self) -> u32 {
        let f = self.clock_hz as u64 / (Prescaler::Div8.divisor() as u64 * (MIN_TOP as u64 + 1));
        (f.max(1)).min(u32::MAX as u64) as u32
    }

    /// Map a frequency to prescaler and counter top
    ///
    /// The frequency is saturated into
    /// `min_frequency()..=max_frequency()` first, so the computation can
    /// neither overflow nor produce an unusable period. A frequency of zero
    /// is a stop request and must be routed to the stop path by the caller,
    /// never here.
    pub fn timer_config(&self, frequency: u32) -> TimerConfig {
        debug_assert!(frequency != 0, "frequency 0 is a stop request");
        let frequency = frequency.clamp(self.min_frequency(), self.max_frequency());

        let prescaler = if frequency >= PRESCALER_SWITCH_HZ {
            Prescaler::Div8
        } else {
            Prescaler::Div256
        };

        let ticks = self.clock_hz as u64 / (prescaler.divisor() as u64 * frequency as u64);
        let top = ticks
            .saturating_sub(1)
            .clamp(MIN_TOP as u64, self.counter_max as u64) as u32;

        TimerConfig { prescaler, top }
    }
}

impl Default for TimerSpec {
    fn default() -> Self {
        TimerSpec {
            clock_hz: DEFAULT_CLOCK_HZ,
            counter_max: DEFAULT_COUNTER_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prescaler_boundary_inclusive() {
        let spec = TimerSpec::default();
        // At the threshold: fine divisor. One below: coarse divisor.
        assert_eq!(
            spec.timer_config(PRESCALER_SWITCH_HZ).prescaler,
            Prescaler::Div8
        );
        assert_eq!(
            spec.timer_config(PRESCALER_SWITCH_HZ - 1).prescaler,
            Prescaler::Div256
        );
    }

    #[test]
    fn test_top_formula() {
        let spec = TimerSpec::default();
        // 48 MHz / (8 * 440) = 13636 -> top 13635
        let cfg = spec.timer_config(440);
        assert_eq!(cfg.prescaler, Prescaler::Div8);
        assert_eq!(cfg.top, 13635);

        // 48 MHz / (256 * 30) = 6250 -> top 6249
        let cfg = spec.timer_config(30);
        assert_eq!(cfg.prescaler, Prescaler::Div256);
        assert_eq!(cfg.top, 6249);
    }

    #[test]
    fn test_high_frequency_saturates_to_min_top() {
        let spec = TimerSpec::default();
        let cfg = spec.timer_config(u32::MAX);
        assert_eq!(cfg.top, MIN_TOP);
    }

    #[test]
    fn test_low_frequency_stays_representable() {
        let spec = TimerSpec::default();
        let cfg = spec.timer_config(1);
        assert_eq!(cfg.prescaler, Prescaler::Div256);
        assert!(cfg.top <= spec.counter_max());
        // 48 MHz / 256 = 187500 -> top 187499, well within 24 bits
        assert_eq!(cfg.top, 187_499);
    }

    #[test]
    fn test_low_frequency_saturates_on_narrow_counter() {
        // 16-bit counter: 1 Hz does not fit even with the coarse divisor,
        // so the request saturates to the lowest representable frequency
        // and the resulting top stays within the counter.
        let spec = TimerSpec::new(48_000_000, 0xFFFF).unwrap();
        assert_eq!(spec.min_frequency(), 3);

        let cfg = spec.timer_config(1);
        assert_eq!(cfg, spec.timer_config(spec.min_frequency()));
        // 48 MHz / (256 * 3) = 62500 -> top 62499
        assert_eq!(cfg.top, 62_499);
        assert!(cfg.top <= spec.counter_max());
    }

    #[test]
    fn test_achieved_frequency_accuracy() {
        let spec = TimerSpec::default();
        for &freq in &[50u32, 122, 440, 1000, 4978, 20_000] {
            let cfg = spec.timer_config(freq);
            let achieved = spec.clock_hz() as f64
                / (cfg.prescaler.divisor() as f64 * (cfg.top as f64 + 1.0));
            assert_relative_eq!(achieved, freq as f64, max_relative = 0.001);
        }
    }

    #[test]
    fn test_spec_validation() {
        assert!(TimerSpec::new(0, 0xFFFF).is_err());
        assert!(TimerSpec::new(48_000_000, 1).is_err());
        assert!(TimerSpec::new(48_000_000, 0xFFFF).is_ok());
    }

    #[test]
    fn test_frequency_range_endpoints() {
        let spec = TimerSpec::default();
        assert_eq!(spec.min_frequency(), 1);
        // 48 MHz / (8 * 3) = 2 MHz
        assert_eq!(spec.max_frequency(), 2_000_000);
    }
}
