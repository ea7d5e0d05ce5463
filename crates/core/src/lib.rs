//! Core library for the SoundCanvas music player.
//!
//! Each module owns a distinct subsystem: the track catalog, the playback
//! transport, audio frequency analysis, the per-frame render loop and the two
//! audio-reactive effects it drives. Everything is substrate-agnostic; hosts
//! plug in their own element handles, drawing surface and frame scheduler
//! through the traits in [`render`] and [`driver`].

pub mod analyser;
pub mod audio;
pub mod bubbles;
pub mod catalog;
pub mod config;
pub mod driver;
pub mod error;
pub mod lyrics;
pub mod moodboard;
pub mod playback;
pub mod render;
pub mod session;
pub mod waveform;

pub use analyser::{Analyser, FrequencySnapshot};
pub use audio::AudioGraph;
pub use bubbles::{Bubble, BubbleField};
pub use catalog::{Catalog, LyricLine, Track};
pub use config::{AppConfig, AudioConfig, VisualConfig};
pub use driver::{FrameRequest, FrameScheduler, FrameSink, LoopState, ManualScheduler, RenderLoop};
pub use error::{PlayerError, Result};
pub use lyrics::LyricsTracker;
pub use moodboard::{ImageGenerator, Moodboard, MoodboardState};
pub use playback::{PlaybackState, Player, RepeatMode};
pub use render::{RecordingSurface, ScaleTarget, ScaledElement, Surface};
pub use session::PlayerSession;
