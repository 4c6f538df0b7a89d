//! Horizontal metric and em size rewriting for TrueType fonts.
//!
//! Glyph advance widths and side bearings are read as [`HorizontalMetrics`],
//! edited by the caller, and written back with [`apply_horizontal_metrics`],
//! which moves outlines to honour the new left side bearings.

mod em;
mod glyf;
mod horizontal;
mod metrics;

pub use em::{UNCONVERTED_TABLES, has_glyf_outlines, rescale_units_per_em};
pub use horizontal::{DEVICE_METRIC_TABLES, VARIATION_TABLES, apply_horizontal_metrics};
pub use metrics::{HorizontalMetrics, advance_widths, read_horizontal_metrics};
