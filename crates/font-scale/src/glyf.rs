//! Outline rewriting for the `glyf` table.

use anyhow::Result;
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor as ReadAnchor, CurvePoint, Glyph as ReadGlyph},
    types::GlyphId,
};
use write_fonts::tables::{
    glyf::{
        Anchor, Bbox, Component, CompositeGlyph, Contour, Glyf, GlyfLocaBuilder, Glyph,
        SimpleGlyph, Transform,
    },
    loca::{Loca, LocaFormat},
};

/// Placement applied to one glyph: `x' = round(x * scale) + dx`, `y' = round(y * scale)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement {
    pub scale: f64,
    pub dx: i32,
}

impl Placement {
    pub fn shift(dx: i32) -> Self {
        Self { scale: 1.0, dx }
    }

    pub fn scale(scale: f64) -> Self {
        Self { scale, dx: 0 }
    }

    fn x(&self, x: i16) -> i16 {
        clamp_i16((x as f64 * self.scale).round() as i32 + self.dx)
    }

    fn y(&self, y: i16) -> i16 {
        clamp_i16((y as f64 * self.scale).round() as i32)
    }

    fn bbox(&self, x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Bbox {
        Bbox {
            x_min: self.x(x_min),
            y_min: self.y(y_min),
            x_max: self.x(x_max),
            y_max: self.y(y_max),
        }
    }
}

pub(crate) fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Value of `head.indexToLocFormat` for a loca format.
pub(crate) fn loca_format_value(format: &LocaFormat) -> i16 {
    match format {
        LocaFormat::Short => 0,
        LocaFormat::Long => 1,
    }
}

/// Rebuild `glyf`/`loca`, placing every glyph with `placement(gid)`.
///
/// Offsets of composite components are compensated for the horizontal shift of
/// the component glyph, so a composite ends up moved by its own `dx` only.
/// Returns `None` when the font has no `glyf` table.
pub(crate) fn rebuild_glyf(
    font: &FontRef,
    placement: impl Fn(u32) -> Placement,
    keep_instructions: bool,
) -> Result<Option<(Glyf, Loca, LocaFormat)>> {
    let (Ok(glyf), Ok(loca)) = (font.glyf(), font.loca(None)) else {
        return Ok(None);
    };
    let num_glyphs = font.maxp()?.num_glyphs();
    let mut builder = GlyfLocaBuilder::new();

    for gid in 0..num_glyphs as u32 {
        let place = placement(gid);
        let glyph = match loca.get_glyf(GlyphId::new(gid), &glyf) {
            Ok(Some(ReadGlyph::Simple(simple))) => {
                let mut contours = Vec::new();
                let points: Vec<CurvePoint> = simple.points().collect();
                let mut start = 0usize;
                for end in simple.end_pts_of_contours() {
                    let end = (end.get() as usize + 1).min(points.len());
                    let contour: Vec<CurvePoint> = points[start.min(end)..end]
                        .iter()
                        .map(|p| CurvePoint::new(place.x(p.x), place.y(p.y), p.on_curve))
                        .collect();
                    contours.push(Contour::from(contour));
                    start = end;
                }
                let instructions =
                    if keep_instructions { simple.instructions().to_vec() } else { Vec::new() };
                Glyph::Simple(SimpleGlyph {
                    bbox: place.bbox(simple.x_min(), simple.y_min(), simple.x_max(), simple.y_max()),
                    contours,
                    instructions,
                })
            }
            Ok(Some(ReadGlyph::Composite(composite))) => {
                let bbox = place.bbox(
                    composite.x_min(),
                    composite.y_min(),
                    composite.x_max(),
                    composite.y_max(),
                );
                let mut components: Vec<Component> = composite
                    .components()
                    .map(|c| {
                        let component_dx = placement(c.glyph.to_u32()).dx;
                        let anchor = match c.anchor {
                            ReadAnchor::Offset { x, y } => {
                                let compensation =
                                    (c.transform.xx.to_f32() as f64 * component_dx as f64).round();
                                Anchor::Offset {
                                    x: clamp_i16(place.x(x) as i32 - compensation as i32),
                                    y: place.y(y),
                                }
                            }
                            ReadAnchor::Point { base, component } => {
                                Anchor::Point { base, component }
                            }
                        };
                        Component {
                            glyph: c.glyph,
                            anchor,
                            flags: c.flags.into(),
                            transform: Transform {
                                xx: c.transform.xx,
                                yx: c.transform.yx,
                                xy: c.transform.xy,
                                yy: c.transform.yy,
                            },
                        }
                    })
                    .collect();

                if components.is_empty() {
                    Glyph::Empty
                } else {
                    let first = components.remove(0);
                    let mut glyph = CompositeGlyph::new(first, bbox);
                    for component in components {
                        glyph.add_component(component, bbox);
                    }
                    Glyph::Composite(glyph)
                }
            }
            _ => Glyph::Empty,
        };
        builder.add_glyph(&glyph)?;
    }

    Ok(Some(builder.build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_shift() {
        let p = Placement::shift(25);
        assert_eq!(p.x(100), 125);
        assert_eq!(p.y(100), 100);
    }

    #[test]
    fn test_placement_scale() {
        let p = Placement::scale(2.048);
        assert_eq!(p.x(500), 1024);
        assert_eq!(p.y(-250), -512);
    }

    #[test]
    fn test_clamp_i16() {
        assert_eq!(clamp_i16(40_000), i16::MAX);
        assert_eq!(clamp_i16(-40_000), i16::MIN);
        assert_eq!(clamp_i16(12), 12);
    }
}
