//! Differential push-pull tone driver
//!
//! Drives two complementary output pins from a hardware timer/counter to
//! produce a differential square wave on a small speaker, for roughly twice
//! the output amplitude of a single-pin tone driver. The crate contains the
//! portable core only: the mapping from a requested frequency and volume to
//! timer configuration (prescaler, counter top, duty compare) and the
//! control state machine for starting, stopping, muting and timed playback.
//!
//! # Features
//! - Two-range prescaler selection so both very low and moderately high
//!   frequencies stay within the counter's representable range
//! - Ten-step volume control through an empirically tuned duty table
//! - Foreground (blocking) and background (fire-and-forget) timed notes
//! - Mute gate that preserves caller-observable timing
//! - Simulated timer backend for host-side testing and rendering
//!
//! # Crate feature flags
//! - `sim` (default): Simulated timer backend (`SimTimer`)
//! - `export-wav` (opt-in): WAV rendering of the simulated differential
//!   output (enables optional `hound` dep)
//!
//! # Backend Trait
//! The [`TimerBackend`] trait is the seam between the portable core and the
//! platform's timer/GPIO registers. Target platforms implement it over their
//! real peripheral; hosts use the bundled [`SimTimer`].
//!
//! # Quick start
//! ```
//! # #[cfg(feature = "sim")]
//! # {
//! use duotone::{ManualClock, SimTimer, ToneDriver};
//!
//! let mut driver = ToneDriver::new(SimTimer::new(), ManualClock::new());
//! driver.init();
//! driver.tone(440, 10, 0, false); // A4, max volume, until stopped
//! driver.no_tone();
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend; // Timer capability trait abstraction
pub mod clock; // Monotonic elapsed-time collaborators
pub mod driver; // Playback controller
pub mod freq; // Frequency to timer configuration mapping
pub mod volume; // Duty table for linear perceived loudness

#[cfg(feature = "sim")]
pub mod sim; // Simulated timer backend

#[cfg(feature = "export-wav")]
pub mod export; // WAV rendering of simulated output

/// Error types for tone driver operations
///
/// The playback surface itself is infallible: invalid volumes and
/// out-of-range frequencies are clamped, never reported. Errors only arise
/// from configuration validation and optional file export.
#[derive(thiserror::Error, Debug)]
pub enum ToneError {
    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFileError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

/// Result type for tone driver operations
pub type Result<T> = std::result::Result<T, ToneError>;

// Public API exports
pub use backend::TimerBackend;
pub use clock::{Clock, ManualClock, StdClock};
pub use driver::ToneDriver;
pub use freq::{Prescaler, TimerConfig, TimerSpec};
pub use volume::{duty_compare, MAX_VOLUME};

#[cfg(feature = "sim")]
pub use sim::{SimTimer, TimerCtrl};

#[cfg(feature = "export-wav")]
pub use export::{export_to_wav, ExportConfig};
