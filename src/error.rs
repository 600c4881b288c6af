use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning encoded audio bytes into PCM.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no audio bytes to decode")]
    Empty,
    #[error("failed to probe audio format: {source}")]
    Probe {
        #[source]
        source: symphonia::core::errors::Error,
    },
    #[error("no decodable audio track found")]
    NoAudioTrack,
    #[error("sample rate not specified in audio stream")]
    MissingSampleRate,
    #[error("codec error while {context}: {source}")]
    Codec {
        context: &'static str,
        #[source]
        source: symphonia::core::errors::Error,
    },
    #[error("invalid WAV data: {source}")]
    Wav {
        #[source]
        source: hound::Error,
    },
}

impl DecodeError {
    pub(crate) fn codec(context: &'static str, source: symphonia::core::errors::Error) -> Self {
        Self::Codec { context, source }
    }
}

/// Failures raised while loading or validating analysis parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid pitch config JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid pitch config: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
