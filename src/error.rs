use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("sentiment value {0} is outside [-1, 1]")]
    SentimentOutOfRange(f64),

    #[error("sentiment has no value")]
    NoSentimentValue,

    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("polygons have no positive finite total area")]
    ZeroTotalArea,

    #[error("state {0} has zero total area")]
    DegenerateState(String),

    #[error("no state centers to compare against")]
    NoStateCenters,

    #[error("tweet {0} has no finite distance to any state")]
    Unlocatable(String),

    #[error("invalid search term {term:?}: {reason}")]
    InvalidTerm { term: String, reason: String },

    #[error("unknown state {0}")]
    UnknownState(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon: {0}")]
    Lexicon(#[from] csv::Error),

    #[error("malformed state shapes: {0}")]
    States(#[from] serde_json::Error),

    #[error("malformed tweet on line {line}: {reason}")]
    Tweet { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, TrendsError>;
