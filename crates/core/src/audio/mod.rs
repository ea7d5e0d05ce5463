use crate::{Analyser, FrequencySnapshot, Result};

/// The audio analysis graph attached to a playback element.
///
/// Exactly one graph may exist per playback element; the session constructs
/// it lazily on first play and keeps it for the rest of its lifetime, so the
/// node is never re-attached. Absence of data is signalled through
/// [`AudioGraph::sample`] returning `None`, never through an error.
#[derive(Debug)]
pub struct AudioGraph {
    analyser: Analyser,
}

impl AudioGraph {
    /// Builds the graph with an analyser of the given transform size.
    pub fn new(fft_size: usize) -> Result<Self> {
        Ok(Self {
            analyser: Analyser::new(fft_size)?,
        })
    }

    /// Number of bins every snapshot from this graph carries.
    pub fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    /// Routes a block of decoded PCM through the analyser.
    pub fn push_samples(&mut self, samples: &[f32]) {
        self.analyser.push_samples(samples);
    }

    /// Returns the current frequency snapshot, or `None` when no audio has
    /// flowed through the graph yet. A failed transform also degrades to
    /// `None`; consumers fall back to their rest state either way.
    pub fn sample(&mut self) -> Option<FrequencySnapshot> {
        if !self.analyser.has_data() {
            return None;
        }
        self.analyser.snapshot().ok()
    }
}
