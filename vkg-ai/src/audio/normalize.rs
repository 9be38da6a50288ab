//! Mono downmix and sample-rate normalization
//!
//! All audio leaving this stage is mono f32 at [`TARGET_SAMPLE_RATE`].

use super::error::IntakeError;
use super::resampler::Resampler;
use super::types::{DecodedAudio, Samples, Waveform};
use tracing::debug;

/// Pipeline-wide analysis sample rate
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Average all channels into one
///
/// Mono input is moved through untouched.
pub fn downmix(samples: Samples) -> Vec<f32> {
    match samples {
        Samples::Mono(data) => data,
        Samples::Planar(channels) => {
            let count = channels.len();
            // Uneven channels: only frames present in every channel are mixed
            let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
            (0..frames)
                .map(|i| channels.iter().map(|ch| ch[i]).sum::<f32>() / count as f32)
                .collect()
        }
        Samples::Interleaved { data, channels } => {
            if channels <= 1 {
                return data;
            }
            data.chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        }
    }
}

/// Downmixes and resamples to the target rate
#[derive(Debug, Clone)]
pub struct Normalizer<R> {
    resampler: R,
    target_rate: u32,
}

impl<R: Resampler> Normalizer<R> {
    pub fn new(resampler: R) -> Self {
        Self {
            resampler,
            target_rate: TARGET_SAMPLE_RATE,
        }
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Produce a mono waveform at the target rate
    ///
    /// When the native rate already matches, samples pass through without
    /// touching the resampler.
    pub fn normalize(&self, audio: DecodedAudio) -> Result<Waveform, IntakeError> {
        let channels = audio.samples.channel_count();
        let mono = downmix(audio.samples);

        if audio.sample_rate == self.target_rate {
            debug!(
                "Normalized {} channel(s) to mono, already at {} Hz",
                channels, self.target_rate
            );
            return Ok(Waveform::new(mono, self.target_rate));
        }

        debug!(
            "Normalizing {} channel(s) at {} Hz to mono at {} Hz",
            channels, audio.sample_rate, self.target_rate
        );
        let resampled = self
            .resampler
            .resample(&mono, audio.sample_rate, self.target_rate)?;

        Ok(Waveform::new(resampled, self.target_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::resampler::SincResampler;

    /// Fails the test if the resampler is ever called
    struct NeverResample;

    impl Resampler for NeverResample {
        fn resample(&self, _: &[f32], from: u32, to: u32) -> Result<Vec<f32>, IntakeError> {
            panic!("resampler called for {} Hz -> {} Hz", from, to);
        }
    }

    fn sine(rate: u32, seconds: f32) -> Vec<f32> {
        let n = (rate as f32 * seconds) as usize;
        (0..n)
            .map(|i| 0.5 * (2.0 * std::f32::consts::PI * 440.0 * i as f32 / rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_target_rate_is_bit_identical_passthrough() {
        let tone = sine(TARGET_SAMPLE_RATE, 1.0);
        let normalizer = Normalizer::new(NeverResample);
        let waveform = normalizer
            .normalize(DecodedAudio {
                samples: Samples::Mono(tone.clone()),
                sample_rate: TARGET_SAMPLE_RATE,
            })
            .unwrap();

        assert_eq!(waveform.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(
            waveform.samples.iter().map(|s| s.to_bits()).collect::<Vec<_>>(),
            tone.iter().map(|s| s.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_planar_stereo_is_averaged() {
        let samples = Samples::Planar(vec![vec![1.0, 0.5, -1.0], vec![0.0, 0.5, 1.0]]);
        assert_eq!(downmix(samples), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_uneven_planar_channels_mix_shortest_length() {
        let samples = Samples::Planar(vec![vec![1.0, 1.0, 1.0, 1.0], vec![0.0, 0.0]]);
        assert_eq!(downmix(samples), vec![0.5, 0.5]);

        let samples = Samples::Planar(vec![vec![0.2], vec![]]);
        assert!(downmix(samples).is_empty());
    }

    #[test]
    fn test_interleaved_stereo_is_averaged() {
        let samples = Samples::Interleaved {
            data: vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0],
            channels: 2,
        };
        assert_eq!(downmix(samples), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_matrix_orientation_gives_same_mono() {
        // Same stereo signal stored channels-first and channels-last
        let left = [0.2f32, 0.4, 0.6, 0.8];
        let right = [0.0f32, 0.2, 0.4, 0.6];

        let channels_first: Vec<f32> = left.iter().chain(right.iter()).copied().collect();
        let channels_last: Vec<f32> = left
            .iter()
            .zip(right.iter())
            .flat_map(|(l, r)| [*l, *r])
            .collect();

        let a = downmix(Samples::from_matrix(channels_first, 2, 4).unwrap());
        let b = downmix(Samples::from_matrix(channels_last, 4, 2).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn test_stereo_at_target_rate_skips_resampler() {
        let normalizer = Normalizer::new(NeverResample);
        let waveform = normalizer
            .normalize(DecodedAudio {
                samples: Samples::Planar(vec![vec![0.25; 100], vec![0.75; 100]]),
                sample_rate: TARGET_SAMPLE_RATE,
            })
            .unwrap();
        assert_eq!(waveform.len(), 100);
        assert!(waveform.samples.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_resamples_to_target_rate() {
        let normalizer = Normalizer::new(SincResampler::default());
        let waveform = normalizer
            .normalize(DecodedAudio {
                samples: Samples::Mono(sine(44100, 2.0)),
                sample_rate: 44100,
            })
            .unwrap();

        assert_eq!(waveform.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(waveform.len(), 32000);
        assert!((waveform.duration_seconds() - 2.0).abs() < 1e-3);
    }
}
