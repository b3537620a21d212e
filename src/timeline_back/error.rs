use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("media duration must be a positive, finite number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("the timeline has no media duration yet, call `ready` first")]
    NotReady,
    #[error("the media does not know its duration yet")]
    UnknownDuration,
    #[error("track {order} does not exist, the timeline has {count} tracks")]
    UnknownTrack { order: usize, count: usize },
    #[error("invalid color {0:?}, expected `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`")]
    InvalidColor(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}
