use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Catalog, PlayerError, Result, Track};

/// Playback gate observed by the render loop. Pausing keeps the elapsed
/// position; only [`Player::close`] rewinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Off, All and One cycle in that order.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Seconds into a track below which "previous" steps back instead of
/// restarting the current track.
const RESTART_THRESHOLD: f32 = 3.0;

/// Transport and queue state for one listening session.
#[derive(Debug, Clone)]
pub struct Player {
    catalog: Catalog,
    current_index: usize,
    state: PlaybackState,
    /// Host-reported position within the current track, in seconds.
    elapsed: f32,
    /// Host-reported track duration, once metadata has loaded.
    duration: Option<f32>,
    volume: f32,
    shuffle: bool,
    repeat: RepeatMode,
}

impl Player {
    pub fn new(catalog: Catalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(PlayerError::InvalidInput(
                "a player needs at least one track",
            ));
        }
        Ok(Self {
            catalog,
            current_index: 0,
            state: PlaybackState::Stopped,
            elapsed: 0.0,
            duration: None,
            volume: 0.75,
            shuffle: false,
            repeat: RepeatMode::Off,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> &Track {
        // current_index is kept in range by every mutation below.
        &self.catalog.tracks()[self.current_index]
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn toggle_play_pause(&mut self) {
        self.state = match self.state {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        };
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn cycle_repeat(&mut self) {
        self.repeat = self.repeat.next();
    }

    /// Picks a queue entry directly; selecting always starts playback.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.catalog.len() {
            return Err(PlayerError::InvalidInput("track index out of range"));
        }
        self.switch_to(index);
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Advances to the next track; with shuffle on, a random other track is
    /// chosen whenever more than one exists.
    pub fn next<R: Rng>(&mut self, rng: &mut R) {
        let len = self.catalog.len();
        let target = if self.shuffle && len > 1 {
            let mut candidate = self.current_index;
            while candidate == self.current_index {
                candidate = rng.gen_range(0..len);
            }
            candidate
        } else {
            (self.current_index + 1) % len
        };
        self.switch_to(target);
    }

    /// Restarts the current track when more than three seconds in, otherwise
    /// steps back through the queue with wraparound.
    pub fn previous(&mut self) {
        if self.elapsed > RESTART_THRESHOLD {
            self.elapsed = 0.0;
        } else {
            let len = self.catalog.len();
            self.switch_to((self.current_index + len - 1) % len);
        }
    }

    /// Host timeupdate: the latest playback position.
    pub fn set_elapsed(&mut self, seconds: f32) {
        self.elapsed = seconds.max(0.0);
    }

    /// Host metadata: the duration of the current track.
    pub fn set_duration(&mut self, seconds: f32) {
        self.duration = Some(seconds.max(0.0));
    }

    pub fn seek(&mut self, seconds: f32) {
        let upper = self.duration.unwrap_or(f32::MAX);
        self.elapsed = seconds.clamp(0.0, upper);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// End-of-track handling: repeat-one restarts, repeat-all always moves
    /// on, and with repeat off the queue stops after its final track.
    pub fn handle_track_end<R: Rng>(&mut self, rng: &mut R) {
        match self.repeat {
            RepeatMode::One => self.elapsed = 0.0,
            RepeatMode::All => self.next(rng),
            RepeatMode::Off => {
                if self.current_index + 1 < self.catalog.len() {
                    self.next(rng);
                } else {
                    self.state = PlaybackState::Stopped;
                }
            }
        }
    }

    /// The host refused to start playback (autoplay policy or a dead
    /// source). The player falls back to stopped so the render loop never
    /// runs against a source that is not producing audio.
    pub fn playback_rejected(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Stops playback and rewinds to the start of the current track.
    pub fn close(&mut self) {
        self.state = PlaybackState::Stopped;
        self.elapsed = 0.0;
    }

    fn switch_to(&mut self, index: usize) {
        self.current_index = index;
        self.elapsed = 0.0;
        self.duration = None;
    }
}
