pub mod assessment;
pub mod features;
pub mod tones;
pub mod transcript;

pub use assessment::{assess, Assessment, ToneScore, ToneScorer};
pub use features::PitchTracker;
pub use tones::Tone;
pub use transcript::{ErrorType, TranscriptScore, WordResult};
