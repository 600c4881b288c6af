pub mod contour;
mod pitch;

pub use pitch::PitchTracker;

use crate::types::AudioData;

impl PitchTracker {
    /// Raw pitch track of `audio`, normalized into [0, 1].
    pub fn contour(&self, audio: &AudioData) -> Vec<f32> {
        contour::normalize(&self.extract(&audio.samples, audio.sample_rate))
    }
}
