use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the whole read → parse → aggregate → plot → write pipeline.
#[derive(Debug, Error)]
pub enum TanitaError {
    #[error("input file {} does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("series '{label}' has {found} values but the time axis has {expected}")]
    LengthMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("no measurements to plot")]
    EmptySeries,

    #[error("drawing error: {0}")]
    Drawing(String),

    #[error("png encoding error: {0}")]
    Encoding(#[from] image::ImageError),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for TanitaError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        TanitaError::Drawing(e.to_string())
    }
}

/// Why a single line could not be turned into a measurement.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line does not match the DT,Ti,Bt,...,ww tag sequence")]
    NoMatch,

    #[error("invalid date/time '{text}': {source}")]
    Datetime {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid value '{text}' for field {field}")]
    Number { field: &'static str, text: String },

    #[error("unknown code {code} for tag {tag}")]
    Code { tag: &'static str, code: String },
}
