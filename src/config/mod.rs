use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Tunable parameters for the autocorrelation pitch tracker.
///
/// Every field falls back to its default when omitted from a JSON override.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PitchConfig {
    /// Analysis window length in milliseconds.
    pub frame_ms: u32,
    /// Distance between consecutive window starts in milliseconds.
    pub hop_ms: u32,
    /// Lowest fundamental frequency considered voiced (Hz).
    pub min_f0: f32,
    /// Highest fundamental frequency considered voiced (Hz).
    pub max_f0: f32,
    /// Frames whose mean squared amplitude falls below this are unvoiced.
    pub silence_threshold: f32,
    /// Minimum normalized autocorrelation accepted as periodic.
    pub min_correlation: f32,
}

impl PitchConfig {
    pub const DEFAULT_FRAME_MS: u32 = 30;
    pub const DEFAULT_HOP_MS: u32 = 10;
    pub const DEFAULT_MIN_F0: f32 = 75.0;
    pub const DEFAULT_MAX_F0: f32 = 500.0;
    pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.001;
    pub const DEFAULT_MIN_CORRELATION: f32 = 0.3;

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Json { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_ms == 0 {
            return Err(ConfigError::invalid("frame_ms must be positive"));
        }
        if self.hop_ms == 0 {
            return Err(ConfigError::invalid("hop_ms must be positive"));
        }
        if !(self.min_f0.is_finite() && self.min_f0 > 0.0) {
            return Err(ConfigError::invalid(format!(
                "min_f0 must be a positive frequency, got {}",
                self.min_f0
            )));
        }
        if !(self.max_f0.is_finite() && self.max_f0 > self.min_f0) {
            return Err(ConfigError::invalid(format!(
                "max_f0 ({}) must exceed min_f0 ({})",
                self.max_f0, self.min_f0
            )));
        }
        if !(self.silence_threshold.is_finite() && self.silence_threshold >= 0.0) {
            return Err(ConfigError::invalid(
                "silence_threshold must be a non-negative number",
            ));
        }
        if !(-1.0..=1.0).contains(&self.min_correlation) {
            return Err(ConfigError::invalid(format!(
                "min_correlation must lie in [-1, 1], got {}",
                self.min_correlation
            )));
        }
        Ok(())
    }

    /// Window length in samples at `sample_rate`.
    pub fn frame_length(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.frame_ms, sample_rate)
    }

    /// Hop length in samples at `sample_rate`, never below one sample.
    pub fn hop_length(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.hop_ms, sample_rate).max(1)
    }

    /// Inclusive autocorrelation lag range searched for a frame of `frame_len` samples.
    pub fn lag_range(&self, sample_rate: u32, frame_len: usize) -> (usize, usize) {
        let min_lag = (sample_rate as f32 / self.max_f0).floor() as usize;
        let max_lag = (sample_rate as f32 / self.min_f0).floor() as usize;
        (min_lag, max_lag.min(frame_len.saturating_sub(1)))
    }
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            frame_ms: Self::DEFAULT_FRAME_MS,
            hop_ms: Self::DEFAULT_HOP_MS,
            min_f0: Self::DEFAULT_MIN_F0,
            max_f0: Self::DEFAULT_MAX_F0,
            silence_threshold: Self::DEFAULT_SILENCE_THRESHOLD,
            min_correlation: Self::DEFAULT_MIN_CORRELATION,
        }
    }
}

fn ms_to_samples(ms: u32, sample_rate: u32) -> usize {
    (u64::from(sample_rate) * u64::from(ms) / 1000) as usize
}

#[cfg(test)]
mod tests {
    use super::PitchConfig;

    #[test]
    fn default_frames_at_sixteen_khz() {
        let config = PitchConfig::default();
        assert_eq!(config.frame_length(16_000), 480);
        assert_eq!(config.hop_length(16_000), 160);
        assert_eq!(config.lag_range(16_000, 480), (32, 213));
    }

    #[test]
    fn lag_range_is_capped_by_frame_length() {
        let config = PitchConfig::default();
        let (_, max_lag) = config.lag_range(16_000, 100);
        assert_eq!(max_lag, 99);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PitchConfig::from_json_str(r#"{ "min_f0": 60.0 }"#).unwrap();
        assert_eq!(config.min_f0, 60.0);
        assert_eq!(config.max_f0, PitchConfig::DEFAULT_MAX_F0);
        assert_eq!(config.hop_ms, PitchConfig::DEFAULT_HOP_MS);
    }

    #[test]
    fn rejects_inverted_band() {
        let err = PitchConfig::from_json_str(r#"{ "min_f0": 400.0, "max_f0": 200.0 }"#);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(PitchConfig::from_json_str(r#"{ "hop": 5 }"#).is_err());
    }

    #[test]
    fn rejects_zero_hop() {
        let config = PitchConfig {
            hop_ms: 0,
            ..PitchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
