//! Core types shared by the audio and pronunciation modules

/// Raw audio data representation (mono, f32 samples)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioData {
    /// Audio samples, ideally within [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 16000)
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the buffer in seconds (0.0 when the sample rate is unset)
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::AudioData;

    #[test]
    fn duration_follows_sample_rate() {
        let audio = AudioData::new(vec![0.0; 8_000], 16_000);
        assert_eq!(audio.duration_secs(), 0.5);
        assert!(!audio.is_empty());
    }

    #[test]
    fn zero_sample_rate_has_no_duration() {
        let audio = AudioData::new(vec![0.0; 10], 0);
        assert_eq!(audio.duration_secs(), 0.0);
    }
}
