use std::{f32::consts::PI, fmt, sync::Arc};

use realfft::{num_complex::Complex32, RealFftPlanner, RealToComplex};

use crate::{PlayerError, Result};

const SMOOTHING_TIME_CONSTANT: f32 = 0.8;
const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;
const MIN_FFT_SIZE: usize = 32;

/// One frame's worth of per-bin magnitudes, each in `0..=255`.
///
/// Snapshots are produced fresh every frame and never retained; a consumer
/// reads it once and lets it drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySnapshot {
    bins: Vec<u8>,
}

impl FrequencySnapshot {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Arithmetic mean of all bin magnitudes.
    pub fn average(&self) -> f32 {
        if self.bins.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.bins.iter().map(|&bin| bin as u32).sum();
        sum as f32 / self.bins.len() as f32
    }
}

/// Frequency-domain view over the most recent audio samples.
///
/// Mirrors the behaviour of a platform analysis node: callers feed PCM blocks
/// in and read byte frequency data out. The magnitude spectrum is smoothed
/// over time and mapped onto `0..=255` through a fixed decibel range.
pub struct Analyser {
    fft_size: usize,
    plan: Arc<dyn RealToComplex<f32>>,
    input: Vec<f32>,
    spectrum: Vec<Complex32>,
    scratch: Vec<Complex32>,
    window: Vec<f32>,
    /// Ring of the latest `fft_size` samples.
    tail: Vec<f32>,
    smoothed: Vec<f32>,
    has_data: bool,
}

impl Analyser {
    /// Creates an analyser for the given transform size. The snapshot exposes
    /// `fft_size / 2` bins.
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size < MIN_FFT_SIZE || !fft_size.is_power_of_two() {
            return Err(PlayerError::InvalidInput(
                "fft size must be a power of two of at least 32",
            ));
        }

        let mut planner = RealFftPlanner::new();
        let plan = planner.plan_fft_forward(fft_size);
        let input = plan.make_input_vec();
        let spectrum = plan.make_output_vec();
        let scratch = plan.make_scratch_vec();
        let window = (0..fft_size).map(|i| hann_value(i, fft_size)).collect();

        Ok(Self {
            fft_size,
            plan,
            input,
            spectrum,
            scratch,
            window,
            tail: vec![0.0; fft_size],
            smoothed: vec![0.0; fft_size / 2],
            has_data: false,
        })
    }

    /// Number of bins in every snapshot this analyser produces.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Whether any audio has been fed in since construction.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Feeds a block of PCM samples. Only the latest `fft_size` samples are
    /// kept; an empty block is a no-op.
    pub fn push_samples(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        self.tail.extend_from_slice(samples);
        let overflow = self.tail.len().saturating_sub(self.fft_size);
        if overflow > 0 {
            self.tail.drain(0..overflow);
        }
        self.has_data = true;
    }

    /// Computes the current byte frequency data from the retained samples.
    pub fn snapshot(&mut self) -> Result<FrequencySnapshot> {
        for (index, value) in self.tail.iter().enumerate() {
            self.input[index] = value * self.window[index];
        }

        self.plan
            .process_with_scratch(&mut self.input, &mut self.spectrum, &mut self.scratch)?;

        let norm = 1.0 / self.fft_size as f32;
        let range = MAX_DECIBELS - MIN_DECIBELS;
        let mut bins = Vec::with_capacity(self.bin_count());

        for (slot, bin) in self.smoothed.iter_mut().zip(self.spectrum.iter()) {
            let magnitude = bin.norm() * norm;
            *slot = SMOOTHING_TIME_CONSTANT * *slot
                + (1.0 - SMOOTHING_TIME_CONSTANT) * magnitude;

            let db = if *slot > 0.0 {
                20.0 * slot.log10()
            } else {
                MIN_DECIBELS
            };
            let scaled = (db - MIN_DECIBELS) / range;
            bins.push((255.0 * scaled.clamp(0.0, 1.0)) as u8);
        }

        Ok(FrequencySnapshot::new(bins))
    }
}

impl fmt::Debug for Analyser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyser")
            .field("fft_size", &self.fft_size)
            .field("has_data", &self.has_data)
            .finish()
    }
}

fn hann_value(index: usize, len: usize) -> f32 {
    if len <= 1 {
        return 1.0;
    }

    0.5 - 0.5 * ((2.0 * PI * index as f32) / (len as f32 - 1.0)).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, cycles: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * cycles * i as f32 / len as f32).sin())
            .collect()
    }

    #[test]
    fn rejects_invalid_fft_sizes() {
        assert!(Analyser::new(0).is_err());
        assert!(Analyser::new(100).is_err());
        assert!(Analyser::new(256).is_ok());
    }

    #[test]
    fn exposes_half_the_transform_size_as_bins() {
        let mut analyser = Analyser::new(256).unwrap();
        analyser.push_samples(&sine(256, 8.0));
        let snapshot = analyser.snapshot().unwrap();
        assert_eq!(snapshot.len(), 128);
    }

    #[test]
    fn silence_produces_all_zero_bins() {
        let mut analyser = Analyser::new(256).unwrap();
        analyser.push_samples(&vec![0.0; 256]);
        let snapshot = analyser.snapshot().unwrap();
        assert!(snapshot.bins().iter().all(|&bin| bin == 0));
        assert_eq!(snapshot.average(), 0.0);
    }

    #[test]
    fn tone_energy_lands_near_its_bin() {
        let mut analyser = Analyser::new(256).unwrap();
        // Let the smoothed spectrum settle.
        for _ in 0..32 {
            analyser.push_samples(&sine(256, 16.0));
            analyser.snapshot().unwrap();
        }
        let snapshot = analyser.snapshot().unwrap();
        let peak = snapshot
            .bins()
            .iter()
            .enumerate()
            .max_by_key(|(_, &bin)| bin)
            .map(|(i, _)| i)
            .unwrap();
        assert!((15..=17).contains(&peak), "peak at bin {peak}");
        assert!(snapshot.average() > 0.0);
    }

    #[test]
    fn keeps_only_the_latest_transform_window() {
        let mut analyser = Analyser::new(256).unwrap();
        analyser.push_samples(&vec![1.0; 1024]);
        assert_eq!(analyser.tail.len(), 256);
    }

    #[test]
    fn average_of_uniform_snapshot_is_the_value() {
        let snapshot = FrequencySnapshot::new(vec![128; 128]);
        assert_eq!(snapshot.average(), 128.0);
    }
}
