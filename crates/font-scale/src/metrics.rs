//! Per-glyph horizontal metrics.

use anyhow::{Context, Result};
use read_fonts::{FontRef, TableProvider, tables::glyf::Glyph as ReadGlyph, types::GlyphId};

/// Advance width and side bearings of a single glyph, in font units.
///
/// `left_side_bearing + ink_width() + right_side_bearing == advance_width` holds for
/// every value produced by [`read_horizontal_metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalMetrics {
    pub advance_width: u16,
    pub left_side_bearing: i32,
    pub right_side_bearing: i32,
}

impl HorizontalMetrics {
    pub const fn new(advance_width: u16, left_side_bearing: i32, right_side_bearing: i32) -> Self {
        Self { advance_width, left_side_bearing, right_side_bearing }
    }

    /// Horizontal extent of the outline.
    pub fn ink_width(&self) -> i32 {
        self.advance_width as i32 - self.left_side_bearing - self.right_side_bearing
    }
}

/// Read the horizontal metrics of every glyph, in glyph id order.
///
/// Bearings come from the outline bounding box when the font has a `glyf` table,
/// otherwise from `hmtx` (and the outline is treated as zero-width).
pub fn read_horizontal_metrics(font: &FontRef) -> Result<Vec<HorizontalMetrics>> {
    let num_glyphs = font.maxp().context("Font has no maxp table")?.num_glyphs();
    let hmtx = font.hmtx().context("Font has no hmtx table")?;
    let outlines = font.glyf().ok().zip(font.loca(None).ok());

    let mut metrics = Vec::with_capacity(num_glyphs as usize);
    for gid in 0..num_glyphs {
        let glyph_id = GlyphId::new(gid as u32);
        let advance = hmtx.advance(glyph_id).unwrap_or(0);
        let hmtx_lsb = hmtx.side_bearing(glyph_id).unwrap_or(0) as i32;

        let extent = outlines.as_ref().and_then(|(glyf, loca)| {
            match loca.get_glyf(glyph_id, glyf) {
                Ok(Some(ReadGlyph::Simple(simple))) => {
                    Some((simple.x_min() as i32, simple.x_max() as i32))
                }
                Ok(Some(ReadGlyph::Composite(composite))) => {
                    Some((composite.x_min() as i32, composite.x_max() as i32))
                }
                _ => None,
            }
        });

        let (lsb, x_max) = extent.unwrap_or((hmtx_lsb, hmtx_lsb));
        metrics.push(HorizontalMetrics::new(advance, lsb, advance as i32 - x_max));
    }

    Ok(metrics)
}

/// Advance widths of every glyph, in glyph id order.
pub fn advance_widths(font: &FontRef) -> Result<Vec<u16>> {
    Ok(read_horizontal_metrics(font)?.into_iter().map(|m| m.advance_width).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_width() {
        let m = HorizontalMetrics::new(600, 50, 70);
        assert_eq!(m.ink_width(), 480);
    }

    #[test]
    fn test_ink_width_empty_glyph() {
        let m = HorizontalMetrics::new(250, 0, 250);
        assert_eq!(m.ink_width(), 0);
    }
}
