//! Glyph merging for TrueType fonts.
//!
//! A *base* font is extended with the glyphs of a *donor* font for every
//! codepoint the base does not map. Base glyph ids never change; donor glyphs
//! (and the components they reference) are appended after them.

mod error;
mod merger;
mod plan;
mod tables;
mod types;

pub use error::{MergeError, Result};
pub use merger::{DROPPED_TABLES, Merger};
pub use plan::MergePlan;
pub use types::{Codepoint, GlyphId, MergedGlyphId};

/// Merge the missing glyphs of `donor` into `base`.
///
/// This is a convenience wrapper around [`Merger`].
///
/// # Example
///
/// ```no_run
/// use monospacifier_font_merger::merge_missing_glyphs;
///
/// let base = std::fs::read("base.ttf").unwrap();
/// let donor = std::fs::read("donor.ttf").unwrap();
/// let merged = merge_missing_glyphs(&base, &donor).unwrap();
/// ```
pub fn merge_missing_glyphs(base: &[u8], donor: &[u8]) -> Result<Vec<u8>> {
    Merger::new(base, donor)?.merge()
}
