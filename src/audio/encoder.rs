//! Fixed-layout WAV encoding (mono, 16-bit signed PCM, little-endian)
//!
//! The output is always a 44-byte canonical header followed by the sample
//! data, so it can be sent as-is to an assessment endpoint.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

/// Content type for the encoded buffer when sent over HTTP.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";
/// Size of the RIFF/WAVE header emitted by [`encode_wav`].
pub const WAV_HEADER_LEN: usize = 44;

const BLOCK_ALIGN: u32 = 2;
/// Highest rate whose byte rate still fits the header's 32-bit field.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / BLOCK_ALIGN;
/// Most samples the RIFF size field can describe.
const MAX_SAMPLES: usize = ((u32::MAX - (WAV_HEADER_LEN as u32 - 8)) / BLOCK_ALIGN) as usize;

/// Encode mono float samples into a 16-bit PCM WAV buffer.
///
/// Samples are clamped to [-1.0, 1.0] before quantization. Empty input
/// yields a header-only buffer. The rate is clamped to
/// `1..=MAX_SAMPLE_RATE` and samples past the 4 GiB RIFF limit are dropped,
/// so every header field stays exact.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let rate = sample_rate.clamp(1, MAX_SAMPLE_RATE);
    let samples = &samples[..samples.len().min(MAX_SAMPLES)];
    // Only io errors can surface here and a Vec-backed cursor never produces one.
    write_pcm16(samples, rate).expect("16-bit mono PCM into memory cannot fail")
}

fn write_pcm16(samples: &[f32], sample_rate: u32) -> hound::Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(WAV_HEADER_LEN + samples.len() * 2));
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for &sample in samples {
        writer.write_sample(quantize_sample(sample))?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

/// Convert one float sample to i16, truncating toward zero.
///
/// Positive values scale by 0x7fff and negative values by 0x8000 so that
/// both ends of [-1.0, 1.0] map onto the full i16 range.
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}
