//! WAV rendering of simulated output
//!
//! Renders the differential voltage of a [`crate::SimTimer`] to a WAV file
//! so a programmed tone can be auditioned on a host without any hardware.

mod wav;

pub use wav::export_to_wav;

/// Export configuration
#[derive(Debug, Clone, Copy)]
pub struct ExportConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Peak amplitude of the rendered square wave, 0.0..=1.0
    pub amplitude: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            sample_rate: 44_100,
            amplitude: 0.8,
        }
    }
}
