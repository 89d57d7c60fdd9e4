use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the data layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The input file is missing or is not a readable player table.
    /// Fatal to the session; shown to the user, never retried.
    #[error("data unavailable ({}): {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A sign name outside the twelve-sign zodiac.
    #[error("unknown zodiac sign: '{0}'")]
    UnknownSign(String),
}
