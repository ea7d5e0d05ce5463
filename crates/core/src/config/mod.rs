use serde::{Deserialize, Serialize};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub audio: AudioConfig,
    pub visual: VisualConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

/// Configuration specific to the audio analysis subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    /// Transform size of the analyser; the snapshot carries half as many bins.
    pub fft_size: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            fft_size: 256,
        }
    }
}

/// Configuration for the audio-reactive visual layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualConfig {
    /// Number of decorative bubbles floating behind the player.
    pub bubble_count: usize,
    /// Pixel dimensions of the waveform drawing surface.
    pub waveform_width: f32,
    pub waveform_height: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            bubble_count: 15,
            waveform_width: 500.0,
            waveform_height: 80.0,
        }
    }
}
