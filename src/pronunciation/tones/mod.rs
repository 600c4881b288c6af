//! Canonical Mandarin tone shapes and contour comparison.

pub mod catalog;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::features::contour;

/// Number of points in every canonical tone template.
pub const TEMPLATE_LEN: usize = 10;

pub type ToneTemplate = [f32; TEMPLATE_LEN];

const HIGH_FLAT: ToneTemplate = [0.9; TEMPLATE_LEN];
const RISING: ToneTemplate = [0.3, 0.35, 0.4, 0.45, 0.5, 0.6, 0.7, 0.8, 0.85, 0.9];
const DIPPING: ToneTemplate = [0.6, 0.5, 0.4, 0.3, 0.2, 0.15, 0.2, 0.3, 0.5, 0.7];
const FALLING: ToneTemplate = [0.9, 0.85, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

/// One of the four Mandarin lexical tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

    pub fn number(self) -> u8 {
        match self {
            Tone::First => 1,
            Tone::Second => 2,
            Tone::Third => 3,
            Tone::Fourth => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tone::First => "high flat",
            Tone::Second => "rising",
            Tone::Third => "dipping",
            Tone::Fourth => "falling",
        }
    }

    pub fn template(self) -> &'static ToneTemplate {
        match self {
            Tone::First => &HIGH_FLAT,
            Tone::Second => &RISING,
            Tone::Third => &DIPPING,
            Tone::Fourth => &FALLING,
        }
    }
}

impl From<Tone> for u8 {
    fn from(tone: Tone) -> Self {
        tone.number()
    }
}

impl TryFrom<u8> for Tone {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tone::First),
            2 => Ok(Tone::Second),
            3 => Ok(Tone::Third),
            4 => Ok(Tone::Fourth),
            other => Err(format!("tone must be 1-4, got {other}")),
        }
    }
}

impl Display for Tone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tone {} ({})", self.number(), self.name())
    }
}

/// Score how closely `actual` follows `expected`, from 0 to 100.
///
/// Unvoiced (`0.0`) points are dropped and the rest is resampled to the
/// template length before taking the cosine similarity. Negative similarity
/// scores 0.
pub fn compare(actual: &[f32], expected: &[f32]) -> u8 {
    let voiced: Vec<f32> = actual.iter().copied().filter(|&v| v > 0.0).collect();
    if voiced.is_empty() || expected.is_empty() {
        return 0;
    }
    let resampled = contour::resample(&voiced, expected.len());

    let mut dot = 0.0_f64;
    let mut actual_norm = 0.0_f64;
    let mut expected_norm = 0.0_f64;
    for (&a, &b) in resampled.iter().zip(expected) {
        let (a, b) = (f64::from(a), f64::from(b));
        dot += a * b;
        actual_norm += a * a;
        expected_norm += b * b;
    }
    let denom = actual_norm.sqrt() * expected_norm.sqrt();
    if denom == 0.0 {
        return 0;
    }

    let similarity = (dot / denom).clamp(0.0, 1.0);
    let score = (similarity * 100.0).round() as u8;
    trace!(voiced = voiced.len(), similarity, score, "compared tone contour");
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_stay_in_unit_range() {
        for tone in Tone::ALL {
            let template = tone.template();
            assert_eq!(template.len(), TEMPLATE_LEN);
            assert!(template.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn template_shapes_match_their_names() {
        let flat = Tone::First.template();
        assert!(flat.iter().all(|&v| v == 0.9));
        let rising = Tone::Second.template();
        assert!(rising[TEMPLATE_LEN - 1] > rising[0]);
        let dipping = Tone::Third.template();
        let middle = dipping[TEMPLATE_LEN / 2];
        assert!(middle < dipping[0] && middle < dipping[TEMPLATE_LEN - 1]);
        let falling = Tone::Fourth.template();
        assert!(falling[TEMPLATE_LEN - 1] < falling[0]);
    }

    #[test]
    fn tone_numbers_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(Tone::try_from(tone.number()), Ok(tone));
        }
        assert!(Tone::try_from(0).is_err());
        assert!(Tone::try_from(5).is_err());
    }

    #[test]
    fn single_voiced_point_compares_as_flat_line() {
        assert_eq!(compare(&[0.0, 0.7, 0.0], Tone::First.template()), 100);
    }

    #[test]
    fn unvoiced_gaps_are_ignored() {
        let rising = Tone::Second.template();
        let mut gapped = vec![0.0];
        for &v in rising {
            gapped.push(v);
            gapped.push(0.0);
        }
        assert_eq!(compare(&gapped, rising), 100);
    }

    #[test]
    fn empty_template_scores_zero() {
        assert_eq!(compare(&[0.5, 0.6], &[]), 0);
    }
}
