//! Test Helper Utilities
//!
//! Shared utilities for testing vkg-ai

#![allow(dead_code)]

pub mod audio_generator;

pub use audio_generator::{encode_base64, generate_wav_bytes, tone_base64, AudioConfig};
