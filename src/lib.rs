//! Offline Mandarin pronunciation assessment: WAV encoding, F0 tracking,
//! tone-contour comparison and lexical transcript scoring.

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pronunciation;
pub mod types;
