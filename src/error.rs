//! Error types for fmask_utils

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fmask_utils operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is not a file")]
    NotAFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Could not keep temporary file: {0}")]
    Persist(#[from] tempfile::PathPersistError),

    #[error("Invalid raster shape {0:?}: expected (rows, cols) or (rows, cols, bands) with no empty axis")]
    InvalidShape(Vec<usize>),

    #[error("Unknown symbology category: {0}")]
    UnknownCategory(String),

    #[error("Symbology is missing category: {0}")]
    MissingCategory(&'static str),

    #[error("Symbology enabled must list {expected} flags, got {actual}")]
    EnabledLength { expected: usize, actual: usize },

    #[error("Invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },
}

/// Result type alias for fmask_utils operations
pub type Result<T> = std::result::Result<T, Error>;
