//! Voice assistant settings
//!
//! A single persisted record, last-write-wins. Fields default
//! individually so records written by older clients (or with fields
//! missing) still rehydrate cleanly.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Accepted speech rate range; values outside are clamped on load
pub const SPEECH_RATE_RANGE: RangeInclusive<f32> = 0.1..=2.0;

/// Accepted speech pitch range; values outside are clamped on load
pub const SPEECH_PITCH_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// User-facing voice behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Allow voice recording and speech recognition
    #[serde(default = "default_voice_enabled")]
    pub voice_enabled: bool,
    /// Speak assistant replies aloud automatically
    #[serde(default = "default_auto_speak")]
    pub auto_speak: bool,
    /// Text-to-speech rate
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    /// Text-to-speech pitch
    #[serde(default = "default_speech_pitch")]
    pub speech_pitch: f32,
}

fn default_voice_enabled() -> bool {
    true
}

fn default_auto_speak() -> bool {
    true
}

fn default_speech_rate() -> f32 {
    0.9
}

fn default_speech_pitch() -> f32 {
    1.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            voice_enabled: default_voice_enabled(),
            auto_speak: default_auto_speak(),
            speech_rate: default_speech_rate(),
            speech_pitch: default_speech_pitch(),
        }
    }
}

impl AppSettings {
    /// Clamp rate and pitch into their accepted ranges.
    /// Non-finite values fall back to the field default.
    pub fn sanitized(mut self) -> Self {
        self.speech_rate = clamp_or(self.speech_rate, SPEECH_RATE_RANGE, default_speech_rate());
        self.speech_pitch = clamp_or(
            self.speech_pitch,
            SPEECH_PITCH_RANGE,
            default_speech_pitch(),
        );
        self
    }
}

fn clamp_or(value: f32, range: RangeInclusive<f32>, fallback: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(*range.start(), *range.end())
}
