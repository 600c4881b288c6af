use tracing::debug;

use crate::config::PitchConfig;
use crate::error::ConfigError;

/// Frame-by-frame F0 estimator based on normalized autocorrelation.
///
/// Output holds one value per analysis frame: the estimate in Hz, or `0.0`
/// for frames that are too quiet or not periodic enough.
#[derive(Debug, Clone, Default)]
pub struct PitchTracker {
    config: PitchConfig,
}

impl PitchTracker {
    pub fn new(config: PitchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of full frames `extract` produces for `sample_count` samples.
    pub fn frame_count(&self, sample_count: usize, sample_rate: u32) -> usize {
        let frame_len = self.config.frame_length(sample_rate);
        let hop = self.config.hop_length(sample_rate);
        if frame_len == 0 || sample_count <= frame_len {
            return 0;
        }
        (sample_count - frame_len - 1) / hop + 1
    }

    pub fn extract(&self, samples: &[f32], sample_rate: u32) -> Vec<f32> {
        let frame_len = self.config.frame_length(sample_rate);
        let hop = self.config.hop_length(sample_rate);
        let (min_lag, max_lag) = self.config.lag_range(sample_rate, frame_len);

        let mut pitches = Vec::with_capacity(self.frame_count(samples.len(), sample_rate));
        if frame_len == 0 {
            return pitches;
        }
        let mut start = 0;
        // The trailing window that would run to (or past) the end is dropped.
        while start + frame_len < samples.len() {
            let frame = &samples[start..start + frame_len];
            pitches.push(self.estimate_f0(frame, sample_rate, min_lag, max_lag));
            start += hop;
        }

        debug!(
            frames = pitches.len(),
            voiced = pitches.iter().filter(|&&f0| f0 > 0.0).count(),
            sample_rate,
            "extracted pitch track"
        );
        pitches
    }

    fn estimate_f0(&self, frame: &[f32], sample_rate: u32, min_lag: usize, max_lag: usize) -> f32 {
        let energy = frame.iter().map(|&s| f64::from(s).powi(2)).sum::<f64>() / frame.len() as f64;
        if energy < f64::from(self.config.silence_threshold) {
            return 0.0;
        }

        let mut best_lag = 0;
        let mut best_corr = -1.0_f64;
        for lag in min_lag..=max_lag {
            let corr = normalized_autocorrelation(frame, lag);
            if corr > best_corr {
                best_corr = corr;
                best_lag = lag;
            }
        }

        if best_lag == 0 || best_corr < f64::from(self.config.min_correlation) {
            return 0.0;
        }
        sample_rate as f32 / best_lag as f32
    }
}

/// Correlation of `frame` with itself shifted by `lag`, over the overlapping span.
fn normalized_autocorrelation(frame: &[f32], lag: usize) -> f64 {
    if lag >= frame.len() {
        return 0.0;
    }
    let mut sum = 0.0_f64;
    let mut head_energy = 0.0_f64;
    let mut tail_energy = 0.0_f64;
    for (&a, &b) in frame.iter().zip(&frame[lag..]) {
        let (a, b) = (f64::from(a), f64::from(b));
        sum += a * b;
        head_energy += a * a;
        tail_energy += b * b;
    }
    let norm = (head_energy * tail_energy).sqrt();
    if norm > 0.0 {
        sum / norm
    } else {
        0.0
    }
}
