//! Audio resampling using rubato
//!
//! Band-limited sinc resampling of mono waveforms. Output length is
//! proportional to input duration: `round(len * to_rate / from_rate)`, with
//! the filter delay removed so the waveform stays time-aligned.

use super::error::IntakeError;
use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Capability: change the sample rate of a mono waveform
///
/// Implementations must preserve duration proportionally and return the
/// input unchanged when the rates already match.
pub trait Resampler: Send + Sync {
    fn resample(&self, samples: &[f32], from_rate: u32, to_rate: u32)
        -> Result<Vec<f32>, IntakeError>;
}

/// High-quality sinc resampler
#[derive(Debug, Clone, Copy)]
pub struct SincResampler {
    /// Input frames fed to rubato per call
    chunk_size: usize,
}

impl Default for SincResampler {
    fn default() -> Self {
        Self { chunk_size: 1024 }
    }
}

impl SincResampler {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    fn build(&self, ratio: f64) -> Result<SincFixedIn<f32>, IntakeError> {
        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        SincFixedIn::<f32>::new(ratio, 1.0, params, self.chunk_size, 1)
            .map_err(|e| IntakeError::ResampleFailed(format!("Failed to create resampler: {}", e)))
    }
}

impl Resampler for SincResampler {
    fn resample(
        &self,
        samples: &[f32],
        from_rate: u32,
        to_rate: u32,
    ) -> Result<Vec<f32>, IntakeError> {
        if from_rate == to_rate {
            return Ok(samples.to_vec());
        }
        if from_rate == 0 || to_rate == 0 {
            return Err(IntakeError::ResampleFailed(format!(
                "Invalid rate conversion {} Hz -> {} Hz",
                from_rate, to_rate
            )));
        }
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let ratio = to_rate as f64 / from_rate as f64;
        let expected = (samples.len() as f64 * ratio).round() as usize;

        let mut resampler = self.build(ratio)?;
        let delay = resampler.output_delay();
        let wanted = expected + delay;
        let mut output = Vec::with_capacity(wanted + self.chunk_size);

        let process_err =
            |e: rubato::ResampleError| IntakeError::ResampleFailed(format!("Rubato resampling failed: {}", e));

        let mut chunks = samples.chunks_exact(self.chunk_size);
        for chunk in &mut chunks {
            let out = resampler.process(&[chunk][..], None).map_err(process_err)?;
            output.extend_from_slice(&out[0]);
        }

        let remainder = chunks.remainder();
        if !remainder.is_empty() {
            let out = resampler
                .process_partial(Some(&[remainder][..]), None)
                .map_err(process_err)?;
            output.extend_from_slice(&out[0]);
        }

        // Flush the filter tail until the delayed samples are out
        while output.len() < wanted {
            let out = resampler
                .process_partial(None::<&[&[f32]]>, None)
                .map_err(process_err)?;
            if out[0].is_empty() {
                break;
            }
            output.extend_from_slice(&out[0]);
        }

        output.drain(..delay.min(output.len()));
        output.truncate(expected);

        debug!(
            "Resampled {} samples ({} Hz) -> {} samples ({} Hz)",
            samples.len(),
            from_rate,
            output.len(),
            to_rate
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, rate: u32, seconds: f32, amplitude: f32) -> Vec<f32> {
        let n = (rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_same_rate_is_copy() {
        let input = vec![0.1, -0.2, 0.3, 0.4];
        let output = SincResampler::default().resample(&input, 16000, 16000).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_downsample_length_is_proportional() {
        let input = sine(440.0, 48000, 1.0, 0.5);
        let output = SincResampler::default().resample(&input, 48000, 16000).unwrap();
        assert_eq!(output.len(), 16000);
    }

    #[test]
    fn test_upsample_length_is_proportional() {
        let input = sine(440.0, 8000, 0.75, 0.5);
        let output = SincResampler::default().resample(&input, 8000, 16000).unwrap();
        assert_eq!(output.len(), 12000);
    }

    #[test]
    fn test_odd_ratio_and_partial_chunk() {
        // 44100 -> 16000 with a length that is not a multiple of the chunk size
        let input = sine(300.0, 44100, 0.37, 0.5);
        let expected = (input.len() as f64 * 16000.0 / 44100.0).round() as usize;
        let output = SincResampler::default().resample(&input, 44100, 16000).unwrap();
        assert_eq!(output.len(), expected);
    }

    #[test]
    fn test_tone_survives_resampling() {
        let input = sine(440.0, 48000, 1.0, 0.5);
        let output = SincResampler::default().resample(&input, 48000, 16000).unwrap();

        // Skip the edges where the filter ramps in and out
        let middle = &output[1000..15000];
        let peak = middle.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.02, "peak {}", peak);
    }

    #[test]
    fn test_silence_stays_silent() {
        let input = vec![0.0; 9600];
        let output = SincResampler::default().resample(&input, 48000, 16000).unwrap();
        assert_eq!(output.len(), 3200);
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_input() {
        let output = SincResampler::default().resample(&[], 48000, 16000).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_zero_rate_is_error() {
        let result = SincResampler::default().resample(&[0.1; 10], 0, 16000);
        assert!(matches!(result, Err(IntakeError::ResampleFailed(_))));
    }
}
