//! WAV file export functionality

use std::path::Path;

use super::ExportConfig;
use crate::sim::SimTimer;
use crate::{Result, ToneError};

/// Render a programmed tone to a WAV file
///
/// Samples the differential output of the simulated timer for
/// `duration_ms` milliseconds and writes it as 16-bit mono PCM. A disabled
/// timer renders as silence.
///
/// # Examples
///
/// ```no_run
/// use duotone::export::{export_to_wav, ExportConfig};
/// use duotone::{ManualClock, SimTimer, ToneDriver};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut driver = ToneDriver::new(SimTimer::new(), ManualClock::new());
/// driver.init();
/// driver.tone(440, 10, 0, true);
///
/// export_to_wav(driver.backend(), 500, "tone.wav", ExportConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub fn export_to_wav<P: AsRef<Path>>(
    timer: &SimTimer,
    duration_ms: u32,
    output_path: P,
    config: ExportConfig,
) -> Result<()> {
    let samples = timer.render_differential(config.sample_rate, duration_ms);
    write_wav_file(
        output_path.as_ref(),
        &samples,
        config.sample_rate,
        config.amplitude,
    )
}

/// Write samples to a mono 16-bit WAV file
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32, amplitude: f32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| ToneError::AudioFileError(format!("Failed to create WAV file: {}", e)))?;

    for &sample in samples {
        let sample_i16 = ((sample * amplitude).clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| ToneError::AudioFileError(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| ToneError::AudioFileError(format!("Failed to finalize WAV file: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TimerBackend;
    use crate::freq::Prescaler;

    #[test]
    fn test_export_writes_well_formed_wav() {
        let mut timer = SimTimer::new();
        timer.set_period(Prescaler::Div8, 13635);
        timer.set_duty(6818);
        timer.enable();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        export_to_wav(&timer, 50, &path, ExportConfig::default()).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(reader.duration(), 44_100 * 50 / 1000);
    }

    #[test]
    fn test_disabled_timer_exports_silence() {
        let timer = SimTimer::new();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        export_to_wav(&timer, 10, &path, ExportConfig::default()).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert!(reader.samples::<i16>().all(|s| s.unwrap() == 0));
    }
}
