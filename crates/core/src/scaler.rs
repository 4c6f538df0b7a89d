//! Per-glyph width transforms.

use monospacifier_font_scale::HorizontalMetrics;

use crate::{Error, Result};

/// Transforms the horizontal metrics of one glyph.
pub trait GlyphScaler {
    fn scale(&self, glyph: HorizontalMetrics) -> HorizontalMetrics;
}

/// Stretches every advance by `reference_width / source_width`, splitting the
/// extra space evenly between both side bearings.
///
/// Zero-width glyphs such as combining marks are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchingGlyphScaler {
    reference_width: u32,
    source_width: u32,
}

impl StretchingGlyphScaler {
    pub fn new(reference_width: u32, source_width: u32) -> Result<Self> {
        if source_width == 0 {
            return Err(Error::ZeroSourceWidth);
        }
        if reference_width == 0 {
            return Err(Error::ZeroReferenceWidth);
        }
        Ok(Self { reference_width, source_width })
    }

    pub fn reference_width(&self) -> u32 {
        self.reference_width
    }

    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    /// `round(width * reference_width / source_width)`, rounding halves up.
    pub fn scale_width(&self, width: u32) -> u32 {
        let numerator = 2 * width as u64 * self.reference_width as u64 + self.source_width as u64;
        (numerator / (2 * self.source_width as u64)).min(u32::MAX as u64) as u32
    }
}

impl GlyphScaler for StretchingGlyphScaler {
    fn scale(&self, glyph: HorizontalMetrics) -> HorizontalMetrics {
        if glyph.advance_width == 0 {
            return glyph;
        }
        let advance = self.scale_width(glyph.advance_width as u32).min(u16::MAX as u32) as u16;
        let delta = advance as i32 - glyph.advance_width as i32;
        let left = delta.div_euclid(2);
        HorizontalMetrics::new(
            advance,
            glyph.left_side_bearing + left,
            glyph.right_side_bearing + (delta - left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_widths_rejected() {
        assert!(matches!(StretchingGlyphScaler::new(600, 0), Err(Error::ZeroSourceWidth)));
        assert!(matches!(StretchingGlyphScaler::new(0, 600), Err(Error::ZeroReferenceWidth)));
    }

    #[test]
    fn test_source_width_maps_to_reference_width() {
        for (reference, source) in [(1200, 600), (600, 1229), (1229, 1000), (7, 3)] {
            let scaler = StretchingGlyphScaler::new(reference, source).unwrap();
            assert_eq!(scaler.scale_width(source), reference);
        }
    }

    #[test]
    fn test_scale_width_rounds_half_up() {
        let scaler = StretchingGlyphScaler::new(1, 2).unwrap();
        assert_eq!(scaler.scale_width(1), 1);
        assert_eq!(scaler.scale_width(3), 2);
        assert_eq!(scaler.scale_width(4), 2);
    }

    #[test]
    fn test_scale_centres_ink() {
        let scaler = StretchingGlyphScaler::new(1200, 600).unwrap();
        let glyph = HorizontalMetrics::new(600, 100, 100);
        assert_eq!(scaler.scale(glyph), HorizontalMetrics::new(1200, 400, 400));
    }

    #[test]
    fn test_scale_odd_delta() {
        let scaler = StretchingGlyphScaler::new(601, 600).unwrap();
        let glyph = HorizontalMetrics::new(600, 50, 70);
        let scaled = scaler.scale(glyph);
        assert_eq!(scaled, HorizontalMetrics::new(601, 50, 71));
        assert_eq!(scaled.ink_width(), glyph.ink_width());
    }

    #[test]
    fn test_scale_shrinks() {
        let scaler = StretchingGlyphScaler::new(500, 1000).unwrap();
        let scaled = scaler.scale(HorizontalMetrics::new(999, 300, 299));
        assert_eq!(scaled.advance_width, 500);
        assert_eq!(scaled.left_side_bearing, 300 - 250);
        assert_eq!(scaled.ink_width(), 400);
    }

    #[test]
    fn test_zero_width_glyph_untouched() {
        let scaler = StretchingGlyphScaler::new(1200, 600).unwrap();
        let mark = HorizontalMetrics::new(0, -150, 50);
        assert_eq!(scaler.scale(mark), mark);
    }
}
