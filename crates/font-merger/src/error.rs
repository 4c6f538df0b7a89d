use std::result;

use read_fonts::ReadError;
use thiserror::Error;
use write_fonts::{BuilderError, error};

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("failed to read font: {0}")]
    ReadError(#[from] ReadError),

    #[error("failed to write font: {0}")]
    WriteError(#[from] error::Error),

    #[error("failed to build font: {0}")]
    BuilderError(#[from] BuilderError),

    #[error("fonts have incompatible unitsPerEm: expected {expected}, got {actual}")]
    IncompatibleUnitsPerEm { expected: u16, actual: u16 },

    #[error("required table '{0}' not found")]
    MissingTable(&'static str),

    #[error("merged font would have {0} glyphs, the limit is 65535")]
    TooManyGlyphs(usize),

    #[error("failed to build cmap table")]
    CmapBuildError,
}

pub type Result<T> = result::Result<T, MergeError>;
