use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::PitchConfig;
use crate::pronunciation::tones::catalog::{self, ToneSyllable, ToneVariant};
use crate::pronunciation::Tone;

#[derive(Parser, Debug)]
#[command(
    name = "tonecoach",
    version,
    about = "Offline Mandarin tone and transcript assessment"
)]
pub struct Cli {
    /// Emit debug logs on stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a recording's pitch contour against a canonical tone.
    Tone(ToneArgs),
    /// Score a recording's tone and a recognized transcript together.
    Assess(AssessArgs),
    /// Score a recognized transcript against the expected text.
    Transcript(TranscriptArgs),
    /// Decode a recording and re-encode it as 16 kHz mono 16-bit WAV.
    Wav(WavArgs),
    /// List the practice syllables and their tone variants.
    Syllables(SyllablesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Target tone number (1-4).
    #[arg(long, value_parser = parse_tone, conflicts_with = "syllable")]
    pub tone: Option<Tone>,
    /// Target syllable as marked pinyin from the practice set (e.g. "mǎ").
    #[arg(long)]
    pub syllable: Option<String>,
}

impl TargetArgs {
    pub fn tone(&self) -> Result<Tone> {
        match (self.tone, self.variant()?) {
            (Some(tone), _) => Ok(tone),
            (None, Some(variant)) => Ok(variant.tone),
            (None, None) => bail!("provide either --tone or --syllable"),
        }
    }

    pub fn variant(&self) -> Result<Option<&'static ToneVariant>> {
        match self.syllable.as_deref() {
            Some(pinyin) => catalog::find_variant(pinyin)
                .map(Some)
                .with_context(|| format!("unknown practice syllable '{pinyin}'")),
            None => Ok(None),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PitchArgs {
    /// JSON file overriding pitch tracker parameters.
    #[arg(long = "pitch-config", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Lowest voiced frequency in Hz.
    #[arg(long = "min-f0")]
    pub min_f0: Option<f32>,
    /// Highest voiced frequency in Hz.
    #[arg(long = "max-f0")]
    pub max_f0: Option<f32>,
    /// Mean squared amplitude below which a frame is silent.
    #[arg(long = "silence-threshold")]
    pub silence_threshold: Option<f32>,
    /// Minimum normalized autocorrelation for a voiced frame.
    #[arg(long = "min-correlation")]
    pub min_correlation: Option<f32>,
}

impl PitchArgs {
    pub fn pitch_config(&self) -> Result<PitchConfig> {
        let mut config = match self.config.as_deref() {
            Some(path) => PitchConfig::from_path(path)
                .with_context(|| format!("failed to load pitch config {}", path.display()))?,
            None => PitchConfig::default(),
        };
        if let Some(min_f0) = self.min_f0 {
            config.min_f0 = min_f0;
        }
        if let Some(max_f0) = self.max_f0 {
            config.max_f0 = max_f0;
        }
        if let Some(threshold) = self.silence_threshold {
            config.silence_threshold = threshold;
        }
        if let Some(correlation) = self.min_correlation {
            config.min_correlation = correlation;
        }
        config.validate().context("invalid pitch parameters")?;
        Ok(config)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ToneArgs {
    /// Recording to analyse (WAV, WebM, OGG, MP3, FLAC, ...).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    #[command(flatten)]
    pub target: TargetArgs,
    #[command(flatten)]
    pub pitch: PitchArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    #[command(flatten)]
    pub tone: ToneArgs,
    /// What the speech recognizer heard.
    #[arg(long)]
    pub heard: Option<String>,
    /// Reference text; defaults to the syllable's hanzi when --syllable is given.
    #[arg(long)]
    pub expected: Option<String>,
}

impl AssessArgs {
    pub fn expected_text(&self) -> Result<String> {
        if let Some(expected) = &self.expected {
            return Ok(expected.clone());
        }
        match self.tone.target.variant()? {
            Some(variant) => Ok(variant.hanzi.to_string()),
            None => bail!("provide --expected or --syllable"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TranscriptArgs {
    /// What the speech recognizer heard; omit when nothing was recognized.
    #[arg(long)]
    pub heard: Option<String>,
    /// Reference text the learner was asked to say.
    #[arg(long)]
    pub expected: String,
}

#[derive(Args, Debug, Clone)]
pub struct WavArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SyllablesArgs {
    /// Only show this toneless base (e.g. "ma").
    #[arg(value_name = "BASE")]
    pub base: Option<String>,
}

impl SyllablesArgs {
    pub fn selection(&self) -> Result<Vec<&'static ToneSyllable>> {
        match self.base.as_deref() {
            Some(base) => catalog::find_syllable(base)
                .map(|syllable| vec![syllable])
                .with_context(|| format!("'{base}' is not in the practice set")),
            None => Ok(catalog::SYLLABLES.iter().collect()),
        }
    }
}

fn parse_tone(raw: &str) -> std::result::Result<Tone, String> {
    let number: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a tone number"))?;
    Tone::try_from(number)
}
