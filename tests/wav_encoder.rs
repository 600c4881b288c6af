use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use tonecoach::audio::encoder::{encode_wav, WAV_HEADER_LEN};

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

fn i16_at(bytes: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
}

#[test]
fn empty_input_produces_header_only() {
    let bytes = encode_wav(&[], 16_000);

    assert_eq!(bytes.len(), 44);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32_at(&bytes, 4), 36);
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(u32_at(&bytes, 16), 16);
    assert_eq!(u16_at(&bytes, 20), 1);
    assert_eq!(u16_at(&bytes, 22), 1);
    assert_eq!(u32_at(&bytes, 24), 16_000);
    assert_eq!(u32_at(&bytes, 28), 32_000);
    assert_eq!(u16_at(&bytes, 32), 2);
    assert_eq!(u16_at(&bytes, 34), 16);
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(u32_at(&bytes, 40), 0);
}

#[test]
fn quantizes_samples_by_sign() {
    let bytes = encode_wav(&[0.0, 1.0, -1.0, 0.5, -0.5], 16_000);

    assert_eq!(bytes.len(), WAV_HEADER_LEN + 10);
    assert_eq!(u32_at(&bytes, 4), 46);
    assert_eq!(u32_at(&bytes, 40), 10);
    assert_eq!(i16_at(&bytes, 44), 0);
    assert_eq!(i16_at(&bytes, 46), 32_767);
    assert_eq!(i16_at(&bytes, 48), -32_768);
    assert_eq!(i16_at(&bytes, 50), 16_383);
    assert_eq!(i16_at(&bytes, 52), -16_384);
}

#[test]
fn clamps_values_beyond_unit_range() {
    let bytes = encode_wav(&[2.0, -3.0], 16_000);

    assert_eq!(i16_at(&bytes, 44), 32_767);
    assert_eq!(i16_at(&bytes, 46), -32_768);
}

#[test]
fn header_follows_sample_rate() {
    let bytes = encode_wav(&[0.0; 100], 44_100);

    assert_eq!(u32_at(&bytes, 24), 44_100);
    assert_eq!(u32_at(&bytes, 28), 88_200);
    assert_eq!(bytes.len(), WAV_HEADER_LEN + 200);
}

#[test]
fn output_parses_as_standard_wav() {
    let samples: Vec<f32> = (0..320).map(|i| (i as f32 / 320.0) - 0.5).collect();
    let bytes = encode_wav(&samples, 16_000);

    let reader = WavReader::new(Cursor::new(bytes)).expect("hound accepts encoder output");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);
    assert_eq!(reader.len(), 320);

    let decoded: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(decoded[0], -16_384);
    assert_eq!(decoded[160], 0);
}
