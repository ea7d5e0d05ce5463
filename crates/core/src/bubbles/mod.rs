use rand::Rng;

use crate::{render::ScaleTarget, FrequencySnapshot};

/// Static, per-bubble parameters fixed at generation time. Only the scale of
/// a bubble is audio-reactive; these values drive the ambient drift animation
/// the substrate runs regardless of playback.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Diameter in pixels, 20 to 100.
    pub size: f32,
    /// Horizontal position as a percentage of the viewport width.
    pub left: f32,
    /// Drift animation duration in seconds, 20 to 35.
    pub drift_duration: f32,
    /// Drift animation start delay in seconds, up to 20.
    pub drift_delay: f32,
}

/// The audio-reactive decorative background: a fixed set of bubbles whose
/// common scale factor follows the mean magnitude of the latest snapshot.
#[derive(Debug, Clone)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    /// Rolls static parameters for `count` bubbles. Called once per session;
    /// the parameters are never regenerated, so the ambient motion stays
    /// stable across frames.
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let bubbles = (0..count)
            .map(|_| Bubble {
                size: rng.gen_range(20.0..100.0),
                left: rng.gen_range(0.0..100.0),
                drift_duration: rng.gen_range(20.0..35.0),
                drift_delay: rng.gen_range(0.0..20.0),
            })
            .collect();
        Self { bubbles }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Scale factor derived from a snapshot: `1 + (average / 128) * 0.5`.
    /// Always at least 1 since the average is non-negative.
    pub fn scale_for(snapshot: &FrequencySnapshot) -> f32 {
        1.0 + (snapshot.average() / 128.0) * 0.5
    }

    /// Applies the snapshot-derived scale uniformly to every element handle.
    /// The handles compose this with their drift animation; nothing here
    /// touches position or timing.
    pub fn apply<E: ScaleTarget>(&self, targets: &mut [E], snapshot: &FrequencySnapshot) {
        let scale = Self::scale_for(snapshot);
        for target in targets {
            target.set_scale(scale);
        }
    }

    /// Rest state: every element back to scale 1.
    pub fn rest<E: ScaleTarget>(&self, targets: &mut [E]) {
        for target in targets {
            target.set_scale(1.0);
        }
    }
}
