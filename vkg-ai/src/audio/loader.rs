//! Container decoding using symphonia
//!
//! Turns raw container bytes into planar f32 PCM at the container's native
//! sample rate. No resampling or trimming happens here.
//!
//! Every probe, track, codec, or packet failure collapses into
//! `UnsupportedOrCorruptFormat`; partially decoded audio is discarded.

use super::error::IntakeError;
use super::types::{DecodedAudio, Samples};
use std::io::Cursor;
use symphonia::core::audio::{AudioBuffer, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

/// Channel layouts beyond stereo are not handled by the normalizer policy
pub const MAX_CHANNELS: usize = 2;

/// Native rates below this are treated as a corrupt header
///
/// Bounds the upsampling ratio to the target rate, and with it the size of
/// the normalized waveform relative to the upload.
pub const MIN_NATIVE_SAMPLE_RATE: u32 = 4_000;

/// Capability: parse container bytes into PCM
pub trait ContainerLoader: Send + Sync {
    fn load(&self, bytes: Vec<u8>) -> Result<DecodedAudio, IntakeError>;
}

/// Loader backed by symphonia's default format and codec registries
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaLoader;

impl ContainerLoader for SymphoniaLoader {
    fn load(&self, bytes: Vec<u8>) -> Result<DecodedAudio, IntakeError> {
        let byte_len = bytes.len();
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

        // No file extension to hint with; rely on content probing
        let probed = symphonia::default::get_probe()
            .format(
                &Hint::new(),
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(corrupt("probe"))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| corrupt("track lookup")("no audio track"))?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = match codec_params.sample_rate {
            Some(rate) if rate >= MIN_NATIVE_SAMPLE_RATE => rate,
            Some(rate) => {
                return Err(corrupt("codec params")(format!("implausible sample rate {} Hz", rate)))
            }
            None => return Err(corrupt("codec params")("missing sample rate")),
        };

        // Reject wide layouts before spending time decoding
        if let Some(channels) = codec_params.channels {
            check_channel_count(channels.count())?;
        }

        debug!(
            "Probed container: {} bytes, {} Hz, channels={:?}",
            byte_len, sample_rate, codec_params.channels
        );

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(corrupt("decoder setup"))?;

        let mut planar: Vec<Vec<f32>> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(corrupt("packet read")(e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = decoder.decode(&packet).map_err(corrupt("packet decode"))?;

            let spec = *decoded.spec();
            let channels = spec.channels.count();
            check_channel_count(channels)?;

            if planar.is_empty() {
                planar = vec![Vec::new(); channels];
            } else if planar.len() != channels {
                return Err(corrupt("layout")("channel count changed mid-stream"));
            }

            let mut buf = AudioBuffer::<f32>::new(decoded.capacity() as u64, spec);
            decoded.convert(&mut buf);

            for (ch, out) in planar.iter_mut().enumerate() {
                out.extend_from_slice(buf.chan(ch));
            }
        }

        // A container that declares its length must deliver all of it
        let frames = planar.first().map_or(0, Vec::len) as u64;
        if let Some(declared) = codec_params.n_frames {
            if frames < declared {
                return Err(corrupt("packet read")(format!(
                    "truncated stream: {} of {} frames",
                    frames, declared
                )));
            }
        }

        let samples = match planar.len() {
            0 => Samples::Mono(Vec::new()),
            1 => Samples::Mono(planar.remove(0)),
            _ => Samples::Planar(planar),
        };

        debug!(
            "Decoded {} frames x {} channel(s) at {} Hz",
            samples.frame_count(),
            samples.channel_count(),
            sample_rate
        );

        Ok(DecodedAudio {
            samples,
            sample_rate,
        })
    }
}

/// Accept mono and stereo only
pub fn check_channel_count(channels: usize) -> Result<(), IntakeError> {
    if channels == 0 {
        return Err(corrupt("layout")("zero channels"));
    }
    if channels > MAX_CHANNELS {
        debug!("Rejecting {}-channel audio", channels);
        return Err(IntakeError::UnsupportedChannelLayout { channels });
    }
    Ok(())
}

/// Log the underlying cause, then collapse it into the single format error
fn corrupt<E: std::fmt::Display>(stage: &'static str) -> impl FnOnce(E) -> IntakeError {
    move |e| {
        debug!("Container {} failed: {}", stage, e);
        IntakeError::UnsupportedOrCorruptFormat
    }
}
