use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the game core and its startup plumbing.
///
/// Rejected submissions are not errors; they are [`crate::validator::Verdict`]
/// values handled by the session.
#[derive(Debug, Error)]
pub enum GameError {
    /// An operation was attempted on an object that cannot support it,
    /// e.g. advancing an animation with no frames.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Statistics were requested but no words were recorded.
    #[error("no words recorded")]
    NoData,

    /// A prompt or word corpus could not be loaded or was empty.
    #[error("failed to load corpus from {path}: {reason}")]
    CorpusLoad { path: PathBuf, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
