//! Audio Test Fixture Generator
//!
//! Builds WAV containers in memory so intake tests never touch the disk.

use base64::{engine::general_purpose, Engine as _};
use std::io::Cursor;

/// Configuration for generated audio
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Tone length, excluding leading/trailing silence
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// Peak amplitude in [0, 1]; 0.0 produces digital silence
    pub amplitude: f32,
    pub frequency: f32,
    pub leading_silence: f64,
    pub trailing_silence: f64,
    /// Write the second channel phase-inverted
    pub invert_second_channel: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 3.0,
            sample_rate: 16_000,
            channels: 1,
            amplitude: 0.3,
            frequency: 440.0,
            leading_silence: 0.0,
            trailing_silence: 0.0,
            invert_second_channel: false,
        }
    }
}

/// Generate a 16-bit PCM WAV container with the given configuration
pub fn generate_wav_bytes(config: &AudioConfig) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let rate = config.sample_rate as f64;
    let lead = (config.leading_silence * rate) as usize;
    let tone = (config.duration_seconds * rate) as usize;
    let trail = (config.trailing_silence * rate) as usize;

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..lead + tone + trail {
            let sample = if i >= lead && i < lead + tone {
                let t = (i - lead) as f32 / config.sample_rate as f32;
                config.amplitude * (2.0 * std::f32::consts::PI * config.frequency * t).sin()
            } else {
                0.0
            };
            let value = (sample * i16::MAX as f32) as i16;

            for ch in 0..config.channels {
                let out = if ch == 1 && config.invert_second_channel {
                    -value
                } else {
                    value
                };
                writer.write_sample(out).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Base64 of a mono 16 kHz tone of the given length
pub fn tone_base64(duration_seconds: f64) -> String {
    encode_base64(&generate_wav_bytes(&AudioConfig {
        duration_seconds,
        ..Default::default()
    }))
}
