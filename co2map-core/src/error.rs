use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Co2MapError>;

/// Everything that can go wrong in this crate. Load-time variants are
/// fatal to startup; `InvalidArgument` is the boundary-validation kind
/// surfaced to HTTP clients as a 400.
#[derive(Debug, Error)]
pub enum Co2MapError {
    #[error("cannot open city dataset {path:?}")]
    DatasetOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read city dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed dataset row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
