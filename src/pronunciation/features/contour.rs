/// Voiced frames whose pitch range is narrower than this are treated as flat.
pub const FLAT_RANGE_HZ: f32 = 1.0;
const FLAT_LEVEL: f32 = 0.5;

/// Scale a raw pitch track into the speaker's own [0, 1] range.
///
/// Min and max come from voiced (non-zero) frames only; unvoiced frames stay `0.0`.
pub fn normalize(pitches: &[f32]) -> Vec<f32> {
    let Some((min, max)) = voiced_range(pitches) else {
        return vec![0.0; pitches.len()];
    };
    let range = max - min;
    pitches
        .iter()
        .map(|&pitch| match pitch > 0.0 {
            false => 0.0,
            true if range < FLAT_RANGE_HZ => FLAT_LEVEL,
            true => (pitch - min) / range,
        })
        .collect()
}

fn voiced_range(pitches: &[f32]) -> Option<(f32, f32)> {
    pitches
        .iter()
        .copied()
        .filter(|&pitch| pitch > 0.0)
        .fold(None, |range, pitch| match range {
            None => Some((pitch, pitch)),
            Some((min, max)) => Some((min.min(pitch), max.max(pitch))),
        })
}

/// Linearly resample `series` to exactly `target_len` points.
///
/// An empty series stays empty and a single value is repeated.
pub fn resample(series: &[f32], target_len: usize) -> Vec<f32> {
    match (series.len(), target_len) {
        (0, _) | (_, 0) => Vec::new(),
        (1, len) => vec![series[0]; len],
        (_, 1) => vec![series[0]],
        (len, count) => interpolate(series, count, len),
    }
}

fn interpolate(series: &[f32], target_len: usize, len: usize) -> Vec<f32> {
    let denom = (target_len - 1) as f32;
    (0..target_len)
        .map(|index| {
            let position = index as f32 / denom * (len - 1) as f32;
            let lower = (position.floor() as usize).min(len - 1);
            let upper = (lower + 1).min(len - 1);
            let weight = position - lower as f32;
            series[lower] * (1.0 - weight) + series[upper] * weight
        })
        .collect()
}
