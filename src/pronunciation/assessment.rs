use std::thread;

use serde::Serialize;
use tracing::{debug, warn};

use super::features::PitchTracker;
use super::tones::{self, Tone, ToneTemplate};
use super::transcript::{self, TranscriptScore};
use crate::audio::decoder::PcmDecoder;
use crate::error::DecodeError;
use crate::types::AudioData;

/// Local tone assessment of one recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneScore {
    pub tone_score: u8,
    pub detected_contour: Vec<f32>,
    pub expected_contour: ToneTemplate,
}

/// Runs the extract → normalize → compare chain for a target tone.
#[derive(Debug, Clone, Default)]
pub struct ToneScorer {
    tracker: PitchTracker,
}

impl ToneScorer {
    pub fn new(tracker: PitchTracker) -> Self {
        Self { tracker }
    }

    pub fn score_samples(&self, audio: &AudioData, tone: Tone) -> ToneScore {
        let detected_contour = self.tracker.contour(audio);
        let expected_contour = *tone.template();
        let tone_score = tones::compare(&detected_contour, &expected_contour);
        debug!(%tone, tone_score, frames = detected_contour.len(), "scored tone");
        ToneScore {
            tone_score,
            detected_contour,
            expected_contour,
        }
    }

    /// Decode `bytes` first; a decode failure means no pitch analysis runs.
    pub fn score_bytes(
        &self,
        decoder: &dyn PcmDecoder,
        bytes: &[u8],
        tone: Tone,
    ) -> Result<ToneScore, DecodeError> {
        let audio = decoder.decode(bytes).map_err(|err| {
            warn!(error = %err, "could not decode recording for tone scoring");
            err
        })?;
        Ok(self.score_samples(&audio, tone))
    }
}

/// Combined result of the pitch and lexical pipelines over one recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub tone: ToneScore,
    pub transcript: TranscriptScore,
}

/// Score tone and transcript concurrently and join both results.
pub fn assess(
    scorer: &ToneScorer,
    audio: &AudioData,
    tone: Tone,
    heard: Option<&str>,
    expected_text: &str,
) -> Assessment {
    thread::scope(|scope| {
        let lexical = scope.spawn(|| transcript::score(heard, expected_text));
        let tone = scorer.score_samples(audio, tone);
        let transcript = match lexical.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        Assessment { tone, transcript }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decoder::WavDecoder;
    use crate::audio::encoder::encode_wav;

    #[test]
    fn silent_recording_scores_zero() {
        let audio = AudioData::new(vec![0.0; 8_000], 16_000);
        let score = ToneScorer::default().score_samples(&audio, Tone::First);
        assert_eq!(score.tone_score, 0);
        assert!(score.detected_contour.iter().all(|&v| v == 0.0));
        assert_eq!(&score.expected_contour, Tone::First.template());
    }

    #[test]
    fn decode_failure_is_reported() {
        let result = ToneScorer::default().score_bytes(&WavDecoder, b"junk", Tone::Second);
        assert!(result.is_err());
    }

    #[test]
    fn scores_decoded_wav_bytes() {
        let bytes = encode_wav(&vec![0.0; 4_000], 16_000);
        let score = ToneScorer::default()
            .score_bytes(&WavDecoder, &bytes, Tone::Third)
            .unwrap();
        assert_eq!(score.tone_score, 0);
    }

    #[test]
    fn assess_joins_both_pipelines() {
        let audio = AudioData::new(vec![0.0; 1_600], 16_000);
        let assessment = assess(&ToneScorer::default(), &audio, Tone::Fourth, Some("大"), "大");
        assert_eq!(assessment.transcript.completeness_score, 100);
        assert_eq!(assessment.tone.tone_score, 0);
    }
}
