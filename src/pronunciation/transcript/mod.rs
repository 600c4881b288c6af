//! Lexical scoring of a recognized transcript against the expected text.
//!
//! Matching is a greedy walk over the expected tokens: each one consumes the
//! first still-unused identical token heard, wherever it sits in the
//! transcript. There is no alignment, so order only matters for which heard
//! duplicates get used up first.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

const MATCHED_ACCURACY: u8 = 100;

/// Outcome recorded for one expected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorType {
    None,
    Mispronunciation,
}

/// Per-phoneme detail; only filled when a server-side assessor supplies it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemeResult {
    pub phoneme: String,
    pub accuracy_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResult {
    pub word: String,
    pub accuracy_score: u8,
    pub error_type: ErrorType,
    pub phonemes: Vec<PhonemeResult>,
}

/// Transcript assessment, every score on a 0-100 scale.
///
/// `fluency_score` stays 0 here: timing data only exists server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptScore {
    pub pron_score: u8,
    pub accuracy_score: u8,
    pub fluency_score: u8,
    pub completeness_score: u8,
    pub words: Vec<WordResult>,
}

impl TranscriptScore {
    pub fn matched_count(&self) -> usize {
        self.words
            .iter()
            .filter(|word| word.error_type == ErrorType::None)
            .count()
    }
}

fn letter_pattern() -> &'static Regex {
    static LETTER: OnceLock<Regex> = OnceLock::new();
    LETTER.get_or_init(|| Regex::new(r"\p{L}").expect("letter class is a valid pattern"))
}

fn non_word_pattern() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_]").expect("ASCII word class is a valid pattern")
    })
}

/// Split text into comparable tokens.
///
/// Whitespace-separated ASCII chunks become one lowercase word each (pinyin,
/// English) with punctuation stripped. Any other chunk is split into single
/// letters so `"你好！"` yields `["你", "好"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .flat_map(|chunk| -> Vec<String> {
            if chunk.is_ascii() {
                let word = non_word_pattern().replace_all(chunk, "").to_lowercase();
                if word.is_empty() {
                    Vec::new()
                } else {
                    vec![word]
                }
            } else {
                letter_pattern()
                    .find_iter(chunk)
                    .map(|letter| letter.as_str().to_string())
                    .collect()
            }
        })
        .collect()
}

/// Score `transcript` against `expected_text`.
///
/// A missing transcript scores like an empty one. Empty expected text yields
/// an all-zero score with no words.
pub fn score(transcript: Option<&str>, expected_text: &str) -> TranscriptScore {
    let expected = tokenize(expected_text);
    if expected.is_empty() {
        debug!("expected text has no tokens; returning empty transcript score");
        return TranscriptScore::default();
    }
    let mut pool = transcript.map(tokenize).unwrap_or_default();
    let heard = pool.len();

    let words: Vec<WordResult> = expected
        .into_iter()
        .map(|token| {
            let matched = match pool.iter().position(|candidate| *candidate == token) {
                Some(index) => {
                    pool.remove(index);
                    true
                }
                None => false,
            };
            WordResult {
                word: token,
                accuracy_score: if matched { MATCHED_ACCURACY } else { 0 },
                error_type: if matched {
                    ErrorType::None
                } else {
                    ErrorType::Mispronunciation
                },
                phonemes: Vec::new(),
            }
        })
        .collect();

    let mut result = TranscriptScore {
        words,
        ..TranscriptScore::default()
    };
    let matched = result.matched_count();
    let completeness = (matched as f64 / result.words.len() as f64 * 100.0).round() as u8;
    debug!(
        expected = result.words.len(),
        heard,
        matched,
        completeness,
        "scored transcript"
    );

    result.pron_score = completeness;
    result.accuracy_score = completeness;
    result.completeness_score = completeness;
    result
}
