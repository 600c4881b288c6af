//! Rate conversion ahead of pitch analysis and WAV export

use anyhow::{ensure, Result};

use crate::types::AudioData;

/// Sample rate the analysis pipeline and the WAV upload expect.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Bring `audio` to `target_rate`, handing it back untouched when it already matches.
pub fn resample_audio(audio: AudioData, target_rate: u32) -> Result<AudioData> {
    if audio.sample_rate == target_rate {
        return Ok(audio);
    }
    let samples = linear_resample(&audio.samples, audio.sample_rate, target_rate)?;
    Ok(AudioData::new(samples, target_rate))
}

/// Linearly resample `samples` from `source_rate` to `target_rate`.
///
/// Output sample `i` sits at input position `i * source_rate / target_rate`.
/// The position is kept as an integer quotient and remainder, so long inputs
/// do not drift and integer rate ratios land exactly on input samples.
pub fn linear_resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    ensure!(source_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if samples.is_empty() || source_rate == target_rate {
        return Ok(samples.to_vec());
    }

    let source = u64::from(source_rate);
    let target = u64::from(target_rate);
    let output_len = (samples.len() as u64 * target).div_ceil(source);
    let last_index = samples.len() - 1;

    let resampled = (0..output_len)
        .map(|i| {
            let offset = i * source;
            // Bounded by last_index because output_len rounds up from len * target / source.
            let left = (offset / target) as usize;
            let right = (left + 1).min(last_index);
            let fraction = (offset % target) as f32 / target as f32;
            samples[left] + (samples[right] - samples[left]) * fraction
        })
        .collect();
    Ok(resampled)
}
