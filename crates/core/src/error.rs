//! Error type shared by the monospacifier pipeline.

use std::{io, path::PathBuf, result};

use monospacifier_font_merger::MergeError;
use read_fonts::ReadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not a valid font: {source}", path.display())]
    Parse { path: PathBuf, source: ReadError },

    #[error("font '{font}' has no glyphs")]
    EmptyGlyphSet { font: String },

    #[error("source width must be greater than zero")]
    ZeroSourceWidth,

    #[error("reference width must be greater than zero")]
    ZeroReferenceWidth,

    #[error("font '{font}' has no glyf outlines")]
    UnsupportedOutlines { font: String },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to merge glyphs: {0}")]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Font(#[from] anyhow::Error),
}

pub type Result<T> = result::Result<T, Error>;
