//! Playback controller
//!
//! Owns the mute state and the end time of the currently playing note, and
//! turns tone requests into timer programming through the
//! [`TimerBackend`] capability trait. Single execution context by design:
//! the only suspension point is the non-yielding busy-wait of a foreground
//! timed note.

use crate::backend::TimerBackend;
use crate::clock::Clock;
use crate::freq::TimerSpec;
use crate::volume::{clamp_volume, duty_compare};

/// Push-pull tone driver
///
/// One driver exists per physical two-pin output pair; it exclusively owns
/// the timer backend and the time source.
///
/// [`ToneDriver::init`] must be called once before any tone request; calling
/// other operations first leaves the hardware in whatever state the
/// platform booted with (a documented precondition, not a checked one).
#[derive(Debug)]
pub struct ToneDriver<B: TimerBackend, C: Clock> {
    backend: B,
    clock: C,
    spec: TimerSpec,
    muted: bool,
    note_end: Option<u64>,
}

impl<B: TimerBackend, C: Clock> ToneDriver<B, C> {
    /// Create a driver for the reference timer (48 MHz clock, 24-bit counter)
    pub fn new(backend: B, clock: C) -> Self {
        Self::with_spec(backend, clock, TimerSpec::default())
    }

    /// Create a driver for a custom timer description
    pub fn with_spec(backend: B, clock: C, spec: TimerSpec) -> Self {
        ToneDriver {
            backend,
            clock,
            spec,
            muted: false,
            note_end: None,
        }
    }

    /// Configure output pins and take ownership of the timer
    ///
    /// Must run before the first tone request. Idempotent: calling it again
    /// just re-asserts the silent idle state.
    pub fn init(&mut self) {
        self.backend.disable();
        self.backend.set_idle_level();
        self.note_end = None;
    }

    /// Play a note
    ///
    /// * `frequency` - frequency in Hz; 0 stops the current note. Values
    ///   outside the timer's representable range saturate to the nearest
    ///   bound (see [`TimerSpec::min_frequency`] / [`TimerSpec::max_frequency`]).
    /// * `volume` - 0 (off) to 10 (max); values above 10 clamp to 10.
    /// * `length_ms` - 0 plays until stopped; otherwise the note's length.
    /// * `background` - with a finite length, `false` blocks the caller for
    ///   the full length and stops the note before returning; `true` returns
    ///   immediately with the note left running.
    ///
    /// A background note is NOT terminated autonomously when its length
    /// elapses: the caller must either stop it explicitly or call
    /// [`ToneDriver::poll`] periodically. When muted, no hardware is touched but
    /// a foreground length still blocks for its full duration, so caller
    /// timing is unaffected by mute.
    pub fn tone(&mut self, frequency: u32, volume: u8, length_ms: u32, background: bool) {
        if frequency == 0 || volume == 0 {
            self.no_tone();
            return;
        }

        if self.muted {
            if length_ms > 0 && !background {
                self.spin_until(self.clock.now_ms() + length_ms as u64);
            }
            return;
        }

        let volume = clamp_volume(volume);
        let cfg = self.spec.timer_config(frequency);
        self.backend.set_period(cfg.prescaler, cfg.top);
        self.backend.set_duty(duty_compare(cfg.top, volume));
        self.backend.enable();

        if length_ms > 0 {
            let end = self.clock.now_ms() + length_ms as u64;
            self.note_end = Some(end);
            if !background {
                self.spin_until(end);
                self.no_tone();
            }
        } else {
            self.note_end = None;
        }
    }

    /// Stop the current note
    ///
    /// Disables the timer, drives both pins to the idle level and clears
    /// the tracked end time. Idempotent: stopping while idle is a no-op.
    pub fn no_tone(&mut self) {
        self.backend.disable();
        self.backend.set_idle_level();
        self.note_end = None;
    }

    /// Set the mute state
    ///
    /// Muting while a note plays silences it immediately. Unmuting never
    /// resumes a previous note; mute gates future requests, it is not a
    /// pause/resume mechanism.
    pub fn set_mute(&mut self, mute: bool) {
        self.muted = mute;
        if mute {
            self.no_tone();
        }
    }

    /// Current mute state
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Caller-driven expiry check for background notes
    ///
    /// Stops the note and returns `true` once the tracked end time has
    /// passed; returns `false` while the note still has time left or when
    /// no end time is tracked.
    pub fn poll(&mut self) -> bool {
        match self.note_end {
            Some(end) if self.clock.now_ms() >= end => {
                self.no_tone();
                true
            }
            _ => false,
        }
    }

    /// End time of the current finite-length note, in clock milliseconds
    pub fn note_end_ms(&self) -> Option<u64> {
        self.note_end
    }

    /// Inspect the owned timer backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inspect the owned time source
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // Non-yielding wait; no scheduler is assumed on the target.
    fn spin_until(&self, end_ms: u64) {
        while self.clock.now_ms() < end_ms {
            std::hint::spin_loop();
        }
    }
}

#[cfg(all(test, feature = "sim"))]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::sim::SimTimer;

    fn driver() -> ToneDriver<SimTimer, ManualClock> {
        let mut d = ToneDriver::new(SimTimer::new(), ManualClock::new());
        d.init();
        d
    }

    #[test]
    fn test_indefinite_tone_enables_timer() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        assert!(d.backend().is_enabled());
        assert_eq!(d.note_end_ms(), None);
    }

    #[test]
    fn test_zero_frequency_stops() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        d.tone(0, 10, 0, false);
        assert!(!d.backend().is_enabled());
    }

    #[test]
    fn test_zero_volume_stops() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        d.tone(440, 0, 0, false);
        assert!(!d.backend().is_enabled());
    }

    #[test]
    fn test_volume_above_ten_clamps() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        let compare_at_max = d.backend().compare();
        d.tone(440, 11, 0, false);
        assert_eq!(d.backend().compare(), compare_at_max);
    }

    #[test]
    fn test_mute_suppresses_programming() {
        let mut d = driver();
        d.set_mute(true);
        d.tone(440, 10, 0, false);
        assert!(!d.backend().is_enabled());
    }

    #[test]
    fn test_mute_silences_playing_note() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        d.set_mute(true);
        assert!(!d.backend().is_enabled());
    }

    #[test]
    fn test_unmute_does_not_resume() {
        let mut d = driver();
        d.tone(440, 10, 0, false);
        d.set_mute(true);
        d.set_mute(false);
        assert!(!d.backend().is_enabled());
    }

    #[test]
    fn test_background_note_tracks_end_time() {
        let mut d = driver();
        d.clock().advance(10);
        d.tone(440, 10, 100, true);
        assert!(d.backend().is_enabled());
        assert_eq!(d.note_end_ms(), Some(110));
    }

    #[test]
    fn test_poll_before_expiry_keeps_playing() {
        let mut d = driver();
        d.tone(440, 10, 100, true);
        d.clock().advance(99);
        assert!(!d.poll());
        assert!(d.backend().is_enabled());
    }

    #[test]
    fn test_poll_after_expiry_stops() {
        let mut d = driver();
        d.tone(440, 10, 100, true);
        d.clock().advance(100);
        assert!(d.poll());
        assert!(!d.backend().is_enabled());
        assert_eq!(d.note_end_ms(), None);
    }

    #[test]
    fn test_poll_while_idle_is_noop() {
        let mut d = driver();
        assert!(!d.poll());
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut d = driver();
        d.init();
        d.init();
        assert!(!d.backend().is_enabled());
        assert!(d.backend().ctrl().contains(crate::sim::TimerCtrl::IDLE));
    }
}
