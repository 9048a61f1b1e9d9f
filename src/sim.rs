//! Simulated timer backend
//!
//! Models the register state a real timer/counter peripheral would hold
//! after being programmed through [`TimerBackend`]: control flags, selected
//! prescaler, counter top and duty compare. The simulation is sampleable —
//! pin levels can be read at any counter value and the differential output
//! can be rendered to audio samples — which is what the behavioural tests
//! and the optional WAV export build on.

use bitflags::bitflags;

use crate::backend::TimerBackend;
use crate::freq::Prescaler;

const DEFAULT_CLOCK_HZ: u32 = 48_000_000;

bitflags! {
    /// Control register of the simulated timer
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimerCtrl: u8 {
        /// Counter running, pins driven complementarily
        const ENABLE = 0x01;
        /// Both pins held at the idle level (low)
        const IDLE = 0x02;
    }
}

/// Simulated two-pin timer/counter peripheral
#[derive(Debug, Clone)]
pub struct SimTimer {
    clock_hz: u32,
    ctrl: TimerCtrl,
    prescaler: Prescaler,
    top: u32,
    compare: u32,
}

impl SimTimer {
    /// Create a simulated timer with the reference 48 MHz input clock
    pub fn new() -> Self {
        Self::with_clock_hz(DEFAULT_CLOCK_HZ)
    }

    /// Create a simulated timer with a custom input clock
    pub fn with_clock_hz(clock_hz: u32) -> Self {
        SimTimer {
            clock_hz,
            ctrl: TimerCtrl::IDLE,
            prescaler: Prescaler::Div8,
            top: 0,
            compare: 0,
        }
    }

    /// Current control flags
    pub fn ctrl(&self) -> TimerCtrl {
        self.ctrl
    }

    /// Is the counter running?
    pub fn is_enabled(&self) -> bool {
        self.ctrl.contains(TimerCtrl::ENABLE)
    }

    /// Programmed prescaler
    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Programmed counter top
    pub fn top(&self) -> u32 {
        self.top
    }

    /// Programmed duty compare value
    pub fn compare(&self) -> u32 {
        self.compare
    }

    /// Pin levels `(a, b)` at counter value `count`
    ///
    /// While enabled, pin A is high below the compare value and pin B is
    /// its exact inverse. While disabled, both pins sit at the idle level
    /// (low), so they read equal by design.
    pub fn pin_levels(&self, count: u32) -> (bool, bool) {
        if !self.is_enabled() {
            return (false, false);
        }
        let a = count % (self.top + 1) < self.compare;
        (a, !a)
    }

    /// Output frequency in Hz implied by the programmed period
    pub fn effective_frequency(&self) -> f64 {
        self.clock_hz as f64 / (self.prescaler.divisor() as f64 * (self.top as f64 + 1.0))
    }

    /// Fraction of each period pin A is held high
    pub fn duty_fraction(&self) -> f64 {
        self.compare as f64 / (self.top as f64 + 1.0)
    }

    /// Render the differential voltage across the two pins
    ///
    /// Produces `sample_rate * duration_ms / 1000` samples in `[-1.0, 1.0]`:
    /// +1 while pin A leads, -1 while pin B leads, 0 when the timer is
    /// disabled.
    pub fn render_differential(&self, sample_rate: u32, duration_ms: u32) -> Vec<f32> {
        let count = (sample_rate as u64 * duration_ms as u64 / 1000) as usize;
        if !self.is_enabled() {
            return vec![0.0; count];
        }

        let period_s = 1.0 / self.effective_frequency();
        let duty = self.duty_fraction();
        (0..count)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                let phase = (t / period_s).fract();
                if phase < duty {
                    1.0
                } else {
                    -1.0
                }
            })
            .collect()
    }
}

impl Default for SimTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerBackend for SimTimer {
    fn set_period(&mut self, prescaler: Prescaler, top: u32) {
        self.prescaler = prescaler;
        self.top = top;
    }

    fn set_duty(&mut self, compare: u32) {
        self.compare = compare;
    }

    fn enable(&mut self) {
        self.ctrl.insert(TimerCtrl::ENABLE);
        self.ctrl.remove(TimerCtrl::IDLE);
    }

    fn disable(&mut self) {
        self.ctrl.remove(TimerCtrl::ENABLE);
    }

    fn set_idle_level(&mut self) {
        self.ctrl.insert(TimerCtrl::IDLE);
    }
}
