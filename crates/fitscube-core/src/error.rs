use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitscubeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FITS file: {0}")]
    InvalidFits(String),

    #[error("FITS error: {0}")]
    Fits(#[from] fitsio::errors::Error),

    #[error("Unsupported image dimensions: NAXIS={naxis}, axes={axes:?}")]
    UnsupportedDimensions { naxis: usize, axes: Vec<usize> },

    #[error("Frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    DimensionMismatch {
        index: usize,
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Directory contains no files: {0}")]
    EmptyDirectory(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Frame stack is not ready")]
    NotReady,

    #[error("A directory is already loading")]
    LoadInProgress,

    #[error("Load cancelled")]
    Cancelled,

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl FitscubeError {
    /// Coarse classification used when a load failure is reported to the UI.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Io(_) | Self::NotADirectory(_) | Self::EmptyDirectory(_) => FailureKind::Io,
            Self::InvalidFits(_) | Self::Fits(_) => FailureKind::InvalidFits,
            Self::UnsupportedDimensions { .. } => FailureKind::UnsupportedFormat,
            Self::DimensionMismatch { .. } => FailureKind::DimensionMismatch,
            Self::Cancelled => FailureKind::Cancelled,
            _ => FailureKind::Other,
        }
    }
}

/// Classification of a failed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Io,
    InvalidFits,
    UnsupportedFormat,
    DimensionMismatch,
    Cancelled,
    Other,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::InvalidFits => write!(f, "Invalid FITS"),
            Self::UnsupportedFormat => write!(f, "Unsupported format"),
            Self::DimensionMismatch => write!(f, "Dimension mismatch"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Other => write!(f, "Error"),
        }
    }
}

pub type Result<T> = std::result::Result<T, FitscubeError>;
