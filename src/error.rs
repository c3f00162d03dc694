//! Error type shared by loading, aggregation-backed chart building and rendering.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The data resource could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited text itself is malformed (unbalanced quotes, ragged rows, ...).
    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one of `geo`, `country`, `year`, `value`.
    #[error("header is missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A row field could not be parsed into its typed form.
    #[error("line {line}: column `{column}` has invalid value {value:?}: {reason}")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// The year cannot be turned into a calendar date.
    #[error("year {0} cannot be represented as a calendar date")]
    InvalidYear(i32),

    /// A chart was requested over zero records.
    #[error("no records to chart ({0})")]
    EmptyDataset(String),

    #[error("no mount point named `{0}`")]
    MountPointMissing(String),

    #[error("mount point `{0}` already holds a drawing surface")]
    SurfaceExists(String),

    /// Bitmap output draws glyphs itself and needs a registered font.
    #[error("PNG output needs a font file (see --font)")]
    FontRequired,

    #[error("cannot register font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("drawing failed: {0}")]
    Render(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True for the failures that abort a load before any chart is drawn.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Csv(_)
                | Error::MissingColumn(_)
                | Error::Parse { .. }
                | Error::InvalidYear(_)
        )
    }
}
