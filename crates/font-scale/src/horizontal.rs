//! Writing new advance widths and side bearings back into a font.

use anyhow::{Result, bail};
use log::warn;
use monospacifier_font_ops::rewrite_font_without;
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        os2::Os2,
    },
    types::{FWord, UfWord},
};

use crate::{
    glyf::{Placement, clamp_i16, loca_format_value, rebuild_glyf},
    metrics::{HorizontalMetrics, read_horizontal_metrics},
};

/// Device metric caches that go stale whenever an advance width changes.
pub const DEVICE_METRIC_TABLES: [Tag; 3] =
    [Tag::new(b"hdmx"), Tag::new(b"LTSH"), Tag::new(b"VDMX")];

/// Variation data whose deltas no longer fit rewritten metrics or outlines.
///
/// Removing them leaves the default instance as a static font.
pub const VARIATION_TABLES: [Tag; 6] = [
    Tag::new(b"fvar"),
    Tag::new(b"avar"),
    Tag::new(b"gvar"),
    Tag::new(b"cvar"),
    Tag::new(b"HVAR"),
    Tag::new(b"MVAR"),
];

/// Replace the horizontal metrics of every glyph.
///
/// `metrics` must hold one entry per glyph. A change in left side bearing moves
/// the outline horizontally by the same amount; `hmtx`, `hhea`, the `head`
/// bounding box and `OS/2.xAvgCharWidth` are recomputed. Fonts without a `glyf`
/// table only receive new advance widths. Device metric caches and variation
/// tables are removed.
pub fn apply_horizontal_metrics(data: &[u8], metrics: &[HorizontalMetrics]) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let current = read_horizontal_metrics(&font)?;
    if current.len() != metrics.len() {
        bail!("Expected metrics for {} glyphs, got {}", current.len(), metrics.len());
    }

    let has_glyf = font.glyf().is_ok();
    if !has_glyf {
        warn!("Font has no glyf table; only advance widths are updated");
    }

    let dropped: Vec<Tag> = DEVICE_METRIC_TABLES
        .iter()
        .chain(VARIATION_TABLES.iter())
        .copied()
        .filter(|tag| font.table_data(*tag).is_some())
        .collect();
    if dropped.iter().any(|tag| VARIATION_TABLES.contains(tag)) {
        warn!("Font is variable; only its default instance is kept");
    }

    let shifts: Vec<i32> = current
        .iter()
        .zip(metrics)
        .map(|(old, new)| if has_glyf { new.left_side_bearing - old.left_side_bearing } else { 0 })
        .collect();

    rewrite_font_without(data, &dropped, |font, builder| {
        let glyf_loca = rebuild_glyf(font, |gid| Placement::shift(shifts[gid as usize]), true)?;

        let hmtx = Hmtx::new(
            metrics
                .iter()
                .zip(&current)
                .map(|(m, old)| LongMetric {
                    advance: m.advance_width,
                    side_bearing: if has_glyf {
                        clamp_i16(m.left_side_bearing)
                    } else {
                        clamp_i16(old.left_side_bearing)
                    },
                })
                .collect(),
            Vec::new(),
        );
        builder.add_table(&hmtx)?;

        let inked: Vec<&HorizontalMetrics> =
            metrics.iter().filter(|m| has_glyf && m.ink_width() > 0).collect();

        if let Ok(hhea) = font.hhea() {
            let mut new_hhea: Hhea = hhea.to_owned_table();
            new_hhea.number_of_h_metrics = metrics.len() as u16;
            new_hhea.advance_width_max =
                UfWord::new(metrics.iter().map(|m| m.advance_width).max().unwrap_or(0));
            if !inked.is_empty() {
                let min_lsb = inked.iter().map(|m| m.left_side_bearing).min().unwrap_or(0);
                let min_rsb = inked.iter().map(|m| m.right_side_bearing).min().unwrap_or(0);
                let max_extent =
                    inked.iter().map(|m| m.left_side_bearing + m.ink_width()).max().unwrap_or(0);
                new_hhea.min_left_side_bearing = FWord::new(clamp_i16(min_lsb));
                new_hhea.min_right_side_bearing = FWord::new(clamp_i16(min_rsb));
                new_hhea.x_max_extent = FWord::new(clamp_i16(max_extent));
            }
            builder.add_table(&new_hhea)?;
        }

        if let Ok(head) = font.head() {
            let mut new_head: Head = head.to_owned_table();
            if !inked.is_empty() {
                new_head.x_min =
                    clamp_i16(inked.iter().map(|m| m.left_side_bearing).min().unwrap_or(0));
                new_head.x_max = clamp_i16(
                    inked.iter().map(|m| m.left_side_bearing + m.ink_width()).max().unwrap_or(0),
                );
            }
            if let Some((_, _, format)) = glyf_loca.as_ref() {
                new_head.index_to_loc_format = loca_format_value(format);
            }
            builder.add_table(&new_head)?;
        }

        if let Some((glyf, loca, _)) = glyf_loca {
            builder.add_table(&glyf)?;
            builder.add_table(&loca)?;
        }

        if let Ok(os2) = font.os2() {
            let mut new_os2: Os2 = os2.to_owned_table();
            new_os2.x_avg_char_width = average_advance(metrics);
            builder.add_table(&new_os2)?;
        }

        Ok(())
    })
}

/// Average of all non-zero advance widths, as `OS/2.xAvgCharWidth` defines it.
fn average_advance(metrics: &[HorizontalMetrics]) -> i16 {
    let (sum, count) = metrics
        .iter()
        .filter(|m| m.advance_width > 0)
        .fold((0u64, 0u64), |(sum, count), m| (sum + m.advance_width as u64, count + 1));
    if count == 0 { 0 } else { clamp_i16(((sum + count / 2) / count) as i32) }
}
