//! Em size conversion.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use monospacifier_font_ops::rewrite_font_without;
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        os2::Os2,
        post::Post,
    },
    types::{FWord, UfWord},
};

use crate::{
    glyf::{Placement, clamp_i16, loca_format_value, rebuild_glyf},
    horizontal::{DEVICE_METRIC_TABLES, VARIATION_TABLES},
    metrics::read_horizontal_metrics,
};

/// Tables holding design units or hinting state that are not converted.
pub const UNCONVERTED_TABLES: [Tag; 8] = [
    Tag::new(b"kern"),
    Tag::new(b"GPOS"),
    Tag::new(b"vhea"),
    Tag::new(b"vmtx"),
    Tag::new(b"VORG"),
    Tag::new(b"cvt "),
    Tag::new(b"fpgm"),
    Tag::new(b"prep"),
];

/// Whether the font carries TrueType (`glyf`) outlines.
pub fn has_glyf_outlines(font: &FontRef) -> bool {
    font.glyf().is_ok() && font.loca(None).is_ok()
}

/// Convert a font to a new em size.
///
/// Outlines, horizontal metrics and the vertical metrics in `head`, `hhea`,
/// `OS/2` and `post` are multiplied by `units_per_em / current_units_per_em`.
/// Per-glyph instructions, variation data and the tables in
/// [`UNCONVERTED_TABLES`] are removed.
/// Returns the input unchanged when the em size already matches.
pub fn rescale_units_per_em(data: &[u8], units_per_em: u16) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let current = font.head().context("Font has no head table")?.units_per_em();
    if current == units_per_em {
        return Ok(data.to_vec());
    }
    if units_per_em == 0 || current == 0 {
        bail!("Cannot convert em size from {current} to {units_per_em}");
    }
    if !has_glyf_outlines(&font) {
        bail!("Em size conversion requires glyf outlines");
    }

    let factor = units_per_em as f64 / current as f64;
    let scale = |v: i16| clamp_i16((v as f64 * factor).round() as i32);
    let scale_u = |v: u16| (v as f64 * factor).round().clamp(0.0, u16::MAX as f64) as u16;

    let dropped: Vec<Tag> = UNCONVERTED_TABLES
        .iter()
        .chain(DEVICE_METRIC_TABLES.iter())
        .chain(VARIATION_TABLES.iter())
        .copied()
        .filter(|tag| font.table_data(*tag).is_some())
        .collect();
    if !dropped.is_empty() {
        let names: Vec<String> = dropped.iter().map(|t| t.to_string()).collect();
        warn!("Dropping tables not converted to the new em size: {}", names.join(", "));
    }
    info!("Converting em size from {current} to {units_per_em}");

    let metrics = read_horizontal_metrics(&font)?;

    rewrite_font_without(data, &dropped, |font, builder| {
        let glyf_loca = rebuild_glyf(font, |_| Placement::scale(factor), false)?;

        let hmtx = Hmtx::new(
            metrics
                .iter()
                .map(|m| LongMetric {
                    advance: scale_u(m.advance_width),
                    side_bearing: scale(clamp_i16(m.left_side_bearing)),
                })
                .collect(),
            Vec::new(),
        );
        builder.add_table(&hmtx)?;

        let head = font.head()?;
        let mut new_head: Head = head.to_owned_table();
        new_head.units_per_em = units_per_em;
        new_head.x_min = scale(new_head.x_min);
        new_head.y_min = scale(new_head.y_min);
        new_head.x_max = scale(new_head.x_max);
        new_head.y_max = scale(new_head.y_max);
        if let Some((glyf, loca, format)) = glyf_loca {
            new_head.index_to_loc_format = loca_format_value(&format);
            builder.add_table(&glyf)?;
            builder.add_table(&loca)?;
        }
        builder.add_table(&new_head)?;

        if let Ok(hhea) = font.hhea() {
            let mut new_hhea: Hhea = hhea.to_owned_table();
            new_hhea.number_of_h_metrics = metrics.len() as u16;
            new_hhea.ascender = FWord::new(scale(new_hhea.ascender.to_i16()));
            new_hhea.descender = FWord::new(scale(new_hhea.descender.to_i16()));
            new_hhea.line_gap = FWord::new(scale(new_hhea.line_gap.to_i16()));
            new_hhea.advance_width_max = UfWord::new(scale_u(new_hhea.advance_width_max.to_u16()));
            new_hhea.min_left_side_bearing =
                FWord::new(scale(new_hhea.min_left_side_bearing.to_i16()));
            new_hhea.min_right_side_bearing =
                FWord::new(scale(new_hhea.min_right_side_bearing.to_i16()));
            new_hhea.x_max_extent = FWord::new(scale(new_hhea.x_max_extent.to_i16()));
            new_hhea.caret_offset = scale(new_hhea.caret_offset);
            builder.add_table(&new_hhea)?;
        }

        if let Ok(os2) = font.os2() {
            let mut new_os2: Os2 = os2.to_owned_table();
            new_os2.x_avg_char_width = scale(new_os2.x_avg_char_width);
            new_os2.y_subscript_x_size = scale(new_os2.y_subscript_x_size);
            new_os2.y_subscript_y_size = scale(new_os2.y_subscript_y_size);
            new_os2.y_subscript_x_offset = scale(new_os2.y_subscript_x_offset);
            new_os2.y_subscript_y_offset = scale(new_os2.y_subscript_y_offset);
            new_os2.y_superscript_x_size = scale(new_os2.y_superscript_x_size);
            new_os2.y_superscript_y_size = scale(new_os2.y_superscript_y_size);
            new_os2.y_superscript_x_offset = scale(new_os2.y_superscript_x_offset);
            new_os2.y_superscript_y_offset = scale(new_os2.y_superscript_y_offset);
            new_os2.y_strikeout_size = scale(new_os2.y_strikeout_size);
            new_os2.y_strikeout_position = scale(new_os2.y_strikeout_position);
            new_os2.s_typo_ascender = scale(new_os2.s_typo_ascender);
            new_os2.s_typo_descender = scale(new_os2.s_typo_descender);
            new_os2.s_typo_line_gap = scale(new_os2.s_typo_line_gap);
            new_os2.us_win_ascent = scale_u(new_os2.us_win_ascent);
            new_os2.us_win_descent = scale_u(new_os2.us_win_descent);
            new_os2.sx_height = new_os2.sx_height.map(scale);
            new_os2.s_cap_height = new_os2.s_cap_height.map(scale);
            builder.add_table(&new_os2)?;
        }

        if let Ok(post) = font.post() {
            let mut new_post: Post = post.to_owned_table();
            new_post.underline_position = FWord::new(scale(new_post.underline_position.to_i16()));
            new_post.underline_thickness =
                FWord::new(scale(new_post.underline_thickness.to_i16()));
            builder.add_table(&new_post)?;
        }

        Ok(())
    })
}
