// Error types for the edges of the crate.
//
// Generation itself never fails: unknown genres and degenerate output are
// recovered from in place (see generate.rs). Only the strict parsing helpers,
// config loading, and file export return `RhythmError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RhythmError {
    #[error("unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MIDI encoding failed: {0}")]
    Midi(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RhythmError>;
