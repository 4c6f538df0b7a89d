//! glyf table merging (TrueType outlines)
//!
//! Per-glyph hinting instructions are stripped from donor glyphs. They may
//! reference functions in `fpgm` or values in `cvt`, and those tables are only
//! kept from the base font.

use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor as ReadAnchor, CurvePoint, Glyph as ReadGlyph},
};
use write_fonts::tables::{
    glyf::{
        Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, Glyf, GlyfLocaBuilder,
        Glyph, SimpleGlyph, Transform,
    },
    loca::{Loca, LocaFormat},
};

use crate::{
    MergeError, Result,
    plan::MergePlan,
    types::{GlyphId, MergedGlyphId},
};

/// Build the merged glyf and loca tables.
///
/// Base glyphs are copied unchanged; donor glyphs follow in the order given by
/// the plan, with component references renumbered.
pub fn merge_glyf(
    base: &FontRef,
    donor: &FontRef,
    plan: &MergePlan,
) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut builder = GlyfLocaBuilder::new();

    let base_glyf = base.glyf().map_err(|_| MergeError::MissingTable("glyf"))?;
    let base_loca = base.loca(None).map_err(|_| MergeError::MissingTable("loca"))?;
    for gid in 0..plan.base_glyph_count() {
        let glyph = match base_loca.get_glyf(GlyphId::new(gid).into(), &base_glyf) {
            Ok(Some(glyph)) => convert_glyph(&glyph, Some, false),
            _ => Glyph::Empty,
        };
        builder.add_glyph(&glyph)?;
    }

    let donor_glyf = donor.glyf().map_err(|_| MergeError::MissingTable("glyf"))?;
    let donor_loca = donor.loca(None).map_err(|_| MergeError::MissingTable("loca"))?;
    for (gid, _) in plan.donor_glyphs() {
        let glyph = match donor_loca.get_glyf(gid.into(), &donor_glyf) {
            Ok(Some(glyph)) => convert_glyph(
                &glyph,
                |component| plan.merged_id(GlyphId::new(component)).map(MergedGlyphId::to_u16),
                true,
            ),
            _ => Glyph::Empty,
        };
        builder.add_glyph(&glyph)?;
    }

    Ok(builder.build())
}

/// Convert a read-fonts glyph to a write-fonts glyph.
///
/// `remap` gives the new id of a component glyph; components it cannot place
/// are dropped. If `strip_hinting` is true, per-glyph instructions are removed.
fn convert_glyph(
    glyph: &ReadGlyph,
    remap: impl Fn(u16) -> Option<u16>,
    strip_hinting: bool,
) -> Glyph {
    match glyph {
        ReadGlyph::Simple(simple) => {
            let points: Vec<CurvePoint> = simple.points().collect();
            let mut contours: Vec<Contour> = Vec::new();
            let mut start = 0usize;
            for end_pt in simple.end_pts_of_contours() {
                let end = (end_pt.get() as usize + 1).min(points.len());
                contours.push(points[start.min(end)..end].to_vec().into());
                start = end;
            }

            let bbox = Bbox {
                x_min: simple.x_min(),
                y_min: simple.y_min(),
                x_max: simple.x_max(),
                y_max: simple.y_max(),
            };
            let instructions = if strip_hinting { vec![] } else { simple.instructions().to_vec() };

            Glyph::Simple(SimpleGlyph { bbox, contours, instructions })
        }
        ReadGlyph::Composite(composite) => {
            let mut components: Vec<Component> = composite
                .components()
                .filter_map(|comp| {
                    let new_gid = remap(comp.glyph.to_u16())?;
                    let anchor = match comp.anchor {
                        ReadAnchor::Offset { x, y } => Anchor::Offset { x, y },
                        ReadAnchor::Point { base, component } => Anchor::Point { base, component },
                    };
                    let flags: ComponentFlags = comp.flags.into();
                    Some(Component {
                        glyph: font_types::GlyphId16::new(new_gid),
                        anchor,
                        flags,
                        transform: Transform {
                            xx: comp.transform.xx,
                            yx: comp.transform.yx,
                            xy: comp.transform.xy,
                            yy: comp.transform.yy,
                        },
                    })
                })
                .collect();

            if components.is_empty() {
                return Glyph::Empty;
            }

            let bbox = Bbox {
                x_min: composite.x_min(),
                y_min: composite.y_min(),
                x_max: composite.x_max(),
                y_max: composite.y_max(),
            };
            let first_component = components.remove(0);
            let mut composite_glyph = CompositeGlyph::new(first_component, bbox);
            for comp in components {
                composite_glyph.add_component(comp, bbox);
            }

            Glyph::Composite(composite_glyph)
        }
    }
}
