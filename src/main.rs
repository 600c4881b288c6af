use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use tonecoach::audio::decoder::decoder_for_path;
use tonecoach::audio::encoder::{encode_wav, WAV_CONTENT_TYPE};
use tonecoach::audio::resample::{resample_audio, TARGET_SAMPLE_RATE};
use tonecoach::cli::{AssessArgs, Cli, Command, SyllablesArgs, ToneArgs, TranscriptArgs, WavArgs};
use tonecoach::logging;
use tonecoach::pronunciation::{assess, transcript, PitchTracker, ToneScorer};
use tonecoach::types::AudioData;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match &cli.command {
        Command::Tone(args) => handle_tone(args),
        Command::Assess(args) => handle_assess(args),
        Command::Transcript(args) => handle_transcript(args),
        Command::Wav(args) => handle_wav(args),
        Command::Syllables(args) => handle_syllables(args),
    }
}

fn handle_tone(args: &ToneArgs) -> Result<()> {
    let tone = args.target.tone()?;
    let scorer = build_scorer(args)?;
    let audio = load_recording(&args.input)?;
    print_json(&scorer.score_samples(&audio, tone))
}

fn handle_assess(args: &AssessArgs) -> Result<()> {
    let tone = args.tone.target.tone()?;
    let expected = args.expected_text()?;
    let scorer = build_scorer(&args.tone)?;
    let audio = load_recording(&args.tone.input)?;
    let assessment = assess(&scorer, &audio, tone, args.heard.as_deref(), &expected);
    print_json(&assessment)
}

fn handle_transcript(args: &TranscriptArgs) -> Result<()> {
    print_json(&transcript::score(args.heard.as_deref(), &args.expected))
}

fn handle_wav(args: &WavArgs) -> Result<()> {
    let audio = load_recording(&args.input)?;
    let bytes = encode_wav(&audio.samples, audio.sample_rate);
    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write WAV file {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        bytes = bytes.len(),
        content_type = WAV_CONTENT_TYPE,
        "wrote WAV file"
    );
    Ok(())
}

fn handle_syllables(args: &SyllablesArgs) -> Result<()> {
    print_json(&args.selection()?)
}

fn build_scorer(args: &ToneArgs) -> Result<ToneScorer> {
    let config = args.pitch.pitch_config()?;
    let tracker = PitchTracker::new(config).context("Failed to configure pitch tracker")?;
    Ok(ToneScorer::new(tracker))
}

/// Decode `path` and bring it to the analysis sample rate.
fn load_recording(path: &Path) -> Result<AudioData> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read recording {}", path.display()))?;
    let decoded = decoder_for_path(path)
        .decode(&bytes)
        .with_context(|| format!("Failed to decode recording {}", path.display()))?;
    info!(
        input = %path.display(),
        samples = decoded.samples.len(),
        sample_rate = decoded.sample_rate,
        duration_secs = decoded.duration_secs(),
        "decoded recording"
    );
    resample_audio(decoded, TARGET_SAMPLE_RATE).context("Failed to resample recording")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{rendered}");
    Ok(())
}
