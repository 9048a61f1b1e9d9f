//! Timer capability trait abstraction
//!
//! This module defines the small register-level interface the playback
//! controller programs, keeping the mapper/controller logic portable while
//! the register adapter is swapped per target platform.

use crate::freq::Prescaler;

/// Register-level interface to a timer/counter driving two complementary
/// output pins.
///
/// Implementations exist per target platform; the crate ships a simulated
/// one ([`crate::SimTimer`]) for host-side testing. The contract:
///
/// - While enabled, pin A is high whenever the counter is below the duty
///   compare value and pin B is the exact logical inverse of pin A at every
///   instant (push-pull), doubling the effective drive voltage across a
///   load connected between the pins.
/// - While disabled, both pins are driven to a defined idle level (low),
///   never left floating. Complementarity holds only while a tone plays.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "sim")]
/// # {
/// use duotone::{Prescaler, SimTimer, TimerBackend};
///
/// fn play_square<B: TimerBackend>(timer: &mut B) {
///     timer.set_period(Prescaler::Div8, 13635); // 440 Hz at 48 MHz
///     timer.set_duty(6817); // 50% duty
///     timer.enable();
/// }
///
/// let mut timer = SimTimer::new();
/// play_square(&mut timer);
/// # }
/// ```
pub trait TimerBackend {
    /// Program the clock divisor and counter top (period)
    fn set_period(&mut self, prescaler: Prescaler, top: u32);

    /// Program the duty compare value
    ///
    /// Pin A is driven high while the counter is below `compare`; pin B is
    /// driven as the complement of pin A.
    fn set_duty(&mut self, compare: u32);

    /// Start the counter driving the output pins
    fn enable(&mut self);

    /// Stop the counter; the pins hold their last driven state until
    /// [`TimerBackend::set_idle_level`] is called
    fn disable(&mut self);

    /// Drive both output pins to the defined idle level (low)
    fn set_idle_level(&mut self);
}
