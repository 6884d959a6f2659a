use std::{io, path::PathBuf};
use thiserror::Error;

/// Reasons a [`ThresholdScale`](crate::ThresholdScale) cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScaleError {
    #[error("cannot build a scale from an empty set of values")]
    Empty,
    #[error("value #{index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
    #[error("a scale needs at least one class")]
    NoClasses,
}

/// Everything that can go wrong between reading the inputs and
/// writing the map.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Scale(#[from] ScaleError),
    #[error("failed to fetch {location}: {source}")]
    Fetch { location: String, source: io::Error },
    #[error("unsupported resource location “{0}”")]
    UnsupportedLocation(String),
    #[error("failed to parse {location}: {source}")]
    Parse { location: String, source: serde_json::Error },
    #[error("topology has no object named “{0}”")]
    MissingObject(String),
    #[error("arc index {0} out of range")]
    InvalidArc(i64),
    #[error("malformed {0} geometry")]
    InvalidGeometry(&'static str),
    #[error("unknown palette “{0}”")]
    UnknownPalette(String),
    #[error("invalid CSS color “{0}”")]
    InvalidColor(String),
    #[error("a palette needs at least one color")]
    EmptyPalette,
    #[error("cannot read configuration {}: {source}", path.display())]
    Config { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
