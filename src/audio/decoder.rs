use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::types::AudioData;

/// Host capability that turns encoded audio bytes into mono PCM.
///
/// The analysis pipeline only sees [`AudioData`], so any platform codec can
/// be plugged in here.
pub trait PcmDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<AudioData, DecodeError>;
}

/// Decodes any container/codec symphonia knows about (WebM, OGG, MP3, FLAC, WAV, ...).
#[derive(Debug, Clone, Default)]
pub struct SymphoniaDecoder {
    extension_hint: Option<String>,
}

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Help the format probe with a file extension such as `"webm"`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension_hint = Some(extension.into());
        self
    }
}

impl PcmDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioData, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let source = Box::new(Cursor::new(bytes.to_vec()));
        let mss = MediaSourceStream::new(source, Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = self.extension_hint.as_deref() {
            hint.with_extension(extension);
        }

        let probe_result = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|source| DecodeError::Probe { source })?;
        let mut format = probe_result.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoAudioTrack)?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or(DecodeError::MissingSampleRate)?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|source| DecodeError::codec("creating decoder", source))?;

        let mut samples = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(err))
                    if err.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(err) => return Err(DecodeError::codec("reading packet", err)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(reason)) => {
                    warn!(reason, "skipping undecodable packet");
                    continue;
                }
                Err(err) => return Err(DecodeError::codec("decoding packet", err)),
            };

            let channels = decoded.spec().channels.count();
            let mut interleaved =
                SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
            interleaved.copy_interleaved_ref(decoded);
            samples.extend(downmix(interleaved.samples(), channels));
        }

        debug!(samples = samples.len(), sample_rate, "decoded audio stream");
        Ok(AudioData::new(samples, sample_rate))
    }
}

/// Decodes RIFF/WAVE bytes with hound, without probing other formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl PcmDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioData, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }
        let reader = hound::WavReader::new(Cursor::new(bytes))
            .map_err(|source| DecodeError::Wav { source })?;
        let spec = reader.spec();
        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|source| DecodeError::Wav { source })?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(|source| DecodeError::Wav { source })?
            }
        };
        let samples = downmix(&interleaved, usize::from(spec.channels));
        debug!(
            samples = samples.len(),
            sample_rate = spec.sample_rate,
            "decoded WAV buffer"
        );
        Ok(AudioData::new(samples, spec.sample_rate))
    }
}

/// Pick a decoder from a file extension: hound for `.wav`, symphonia otherwise.
pub fn decoder_for_path(path: &Path) -> Box<dyn PcmDecoder> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("wav") => Box::new(WavDecoder),
        Some(ext) => Box::new(SymphoniaDecoder::new().with_extension(ext)),
        None => Box::new(SymphoniaDecoder::new()),
    }
}

/// Average interleaved frames down to a single channel.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::encoder::encode_wav;

    #[test]
    fn downmix_averages_stereo_frames() {
        let mono = downmix(&[1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2);
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn wav_decoder_reads_encoder_output() {
        let bytes = encode_wav(&[0.0, 0.5, -0.5, 1.0], 16_000);
        let audio = WavDecoder.decode(&bytes).unwrap();
        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(audio.samples.len(), 4);
        assert!((audio.samples[1] - 0.5).abs() < 1e-3);
        assert!((audio.samples[2] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn empty_bytes_are_a_decode_error() {
        assert!(matches!(WavDecoder.decode(&[]), Err(DecodeError::Empty)));
        assert!(matches!(
            SymphoniaDecoder::new().decode(&[]),
            Err(DecodeError::Empty)
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(WavDecoder.decode(b"not audio at all").is_err());
        assert!(matches!(
            SymphoniaDecoder::new().decode(b"not audio at all"),
            Err(DecodeError::Probe { .. })
        ));
    }

    #[test]
    fn symphonia_decodes_encoder_output() {
        let input: Vec<f32> = (0..1_600).map(|i| [0.0, 0.5, -0.5, 0.25][i % 4]).collect();
        let bytes = encode_wav(&input, 16_000);

        let audio = SymphoniaDecoder::new()
            .with_extension("wav")
            .decode(&bytes)
            .unwrap();

        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(audio.samples.len(), 1_600);
        for (decoded, expected) in audio.samples.iter().zip(&input) {
            assert!((decoded - expected).abs() < 1e-3, "{decoded} vs {expected}");
        }
    }

    #[test]
    fn symphonia_downmixes_stereo_frames() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for (left, right) in [(16_384_i16, 0_i16), (-16_384, -16_384), (8_192, 24_576)] {
            writer.write_sample(left).unwrap();
            writer.write_sample(right).unwrap();
        }
        writer.finalize().unwrap();

        let audio = SymphoniaDecoder::new().decode(&cursor.into_inner()).unwrap();

        assert_eq!(audio.sample_rate, 8_000);
        assert_eq!(audio.samples, vec![0.25, -0.5, 0.5]);
    }

    #[test]
    fn picks_decoder_by_extension() {
        let bytes = encode_wav(&[0.25; 16], 8_000);
        let audio = decoder_for_path(Path::new("clip.WAV")).decode(&bytes).unwrap();
        assert_eq!(audio.samples.len(), 16);
    }
}
