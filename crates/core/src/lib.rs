//! Monospacifier core: stretch variable-width fonts to the cell width of a
//! monospace reference font.
//!
//! [`process_fonts`] runs the whole batch; the pieces it is built from
//! ([`FontScaler`], [`StretchingGlyphScaler`], [`cleanup_font_name`], the
//! width statistics) are usable on their own.

pub mod config;
mod error;
pub mod font;
pub mod font_scaler;
pub mod io;
pub mod metrics;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod scaler;
pub mod stats;

pub use error::{Error, Result};
pub use font::{Font, fname};
pub use font_scaler::FontScaler;
pub use metrics::{METRICS, Metric};
pub use monospacifier_font_merger::{MergeError, merge_missing_glyphs};
pub use monospacifier_font_scale::HorizontalMetrics;
pub use naming::{OutputNames, RenameRule, cleanup_font_name};
pub use pipeline::{
    PairFailure, ProcessFonts, ProcessOptions, ResultRecord, make_monospace, merge_fonts,
    process_fonts,
};
pub use report::{ReportFormat, render};
pub use scaler::{GlyphScaler, StretchingGlyphScaler};
pub use stats::{WidthStatistic, average_width, median_width, most_common_width, width_histogram};
