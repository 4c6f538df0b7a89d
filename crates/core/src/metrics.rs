//! Vertical metrics copied from a reference font.

use std::fmt;

use anyhow::Result;
use log::debug;
use monospacifier_font_ops::rewrite_font;
use read_fonts::{FontRef, TableProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    tables::{hhea::Hhea, os2::Os2, post::Post},
    types::FWord,
};

/// A font-wide metric field that can be copied between fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    HheaAscender,
    HheaDescender,
    HheaLineGap,
    TypoAscender,
    TypoDescender,
    TypoLineGap,
    WinAscent,
    WinDescent,
    XHeight,
    CapHeight,
    UnderlinePosition,
    UnderlineThickness,
}

/// Every metric copied by [`copy_metrics`].
pub const METRICS: [Metric; 12] = [
    Metric::HheaAscender,
    Metric::HheaDescender,
    Metric::HheaLineGap,
    Metric::TypoAscender,
    Metric::TypoDescender,
    Metric::TypoLineGap,
    Metric::WinAscent,
    Metric::WinDescent,
    Metric::XHeight,
    Metric::CapHeight,
    Metric::UnderlinePosition,
    Metric::UnderlineThickness,
];

/// Owned copies of the tables metrics are written to.
#[derive(Default)]
struct MetricTables {
    hhea: Option<Hhea>,
    os2: Option<Os2>,
    post: Option<Post>,
}

impl Metric {
    /// The value in `font`, or `None` when the font does not define it.
    pub fn get(self, font: &FontRef) -> Option<i32> {
        match self {
            Self::HheaAscender => font.hhea().ok().map(|t| t.ascender().to_i16().into()),
            Self::HheaDescender => font.hhea().ok().map(|t| t.descender().to_i16().into()),
            Self::HheaLineGap => font.hhea().ok().map(|t| t.line_gap().to_i16().into()),
            Self::TypoAscender => font.os2().ok().map(|t| t.s_typo_ascender().into()),
            Self::TypoDescender => font.os2().ok().map(|t| t.s_typo_descender().into()),
            Self::TypoLineGap => font.os2().ok().map(|t| t.s_typo_line_gap().into()),
            Self::WinAscent => font.os2().ok().map(|t| t.us_win_ascent().into()),
            Self::WinDescent => font.os2().ok().map(|t| t.us_win_descent().into()),
            Self::XHeight => font.os2().ok()?.sx_height().map(i32::from),
            Self::CapHeight => font.os2().ok()?.s_cap_height().map(i32::from),
            Self::UnderlinePosition => {
                font.post().ok().map(|t| t.underline_position().to_i16().into())
            }
            Self::UnderlineThickness => {
                font.post().ok().map(|t| t.underline_thickness().to_i16().into())
            }
        }
    }

    /// Store `value`; returns false when the target has nowhere to put it.
    fn set(self, tables: &mut MetricTables, value: i32) -> bool {
        let signed = value.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
        let unsigned = value.clamp(0, u16::MAX as i32) as u16;
        match self {
            Self::HheaAscender | Self::HheaDescender | Self::HheaLineGap => {
                let Some(hhea) = tables.hhea.as_mut() else { return false };
                let field = match self {
                    Self::HheaAscender => &mut hhea.ascender,
                    Self::HheaDescender => &mut hhea.descender,
                    _ => &mut hhea.line_gap,
                };
                *field = FWord::new(signed);
            }
            Self::TypoAscender
            | Self::TypoDescender
            | Self::TypoLineGap
            | Self::WinAscent
            | Self::WinDescent => {
                let Some(os2) = tables.os2.as_mut() else { return false };
                match self {
                    Self::TypoAscender => os2.s_typo_ascender = signed,
                    Self::TypoDescender => os2.s_typo_descender = signed,
                    Self::TypoLineGap => os2.s_typo_line_gap = signed,
                    Self::WinAscent => os2.us_win_ascent = unsigned,
                    _ => os2.us_win_descent = unsigned,
                }
            }
            Self::XHeight | Self::CapHeight => {
                let Some(os2) = tables.os2.as_mut() else { return false };
                let field = match self {
                    Self::XHeight => &mut os2.sx_height,
                    _ => &mut os2.s_cap_height,
                };
                // Older OS/2 versions have no room for these fields.
                let Some(current) = field.as_mut() else { return false };
                *current = signed;
            }
            Self::UnderlinePosition | Self::UnderlineThickness => {
                let Some(post) = tables.post.as_mut() else { return false };
                let field = match self {
                    Self::UnderlinePosition => &mut post.underline_position,
                    _ => &mut post.underline_thickness,
                };
                *field = FWord::new(signed);
            }
        }
        true
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HheaAscender => "hhea.ascender",
            Self::HheaDescender => "hhea.descender",
            Self::HheaLineGap => "hhea.lineGap",
            Self::TypoAscender => "OS/2.sTypoAscender",
            Self::TypoDescender => "OS/2.sTypoDescender",
            Self::TypoLineGap => "OS/2.sTypoLineGap",
            Self::WinAscent => "OS/2.usWinAscent",
            Self::WinDescent => "OS/2.usWinDescent",
            Self::XHeight => "OS/2.sxHeight",
            Self::CapHeight => "OS/2.sCapHeight",
            Self::UnderlinePosition => "post.underlinePosition",
            Self::UnderlineThickness => "post.underlineThickness",
        })
    }
}

/// Copy every metric in [`METRICS`] that `reference` defines into `data`.
///
/// Metrics the reference lacks, and metrics the target has no table or field
/// for, are left as they are.
pub fn copy_metrics(data: &[u8], reference: &FontRef) -> Result<Vec<u8>> {
    let values: Vec<(Metric, i32)> =
        METRICS.iter().filter_map(|m| Some((*m, m.get(reference)?))).collect();

    rewrite_font(data, |font, builder| {
        let mut tables = MetricTables {
            hhea: font.hhea().ok().map(|t| t.to_owned_table()),
            os2: font.os2().ok().map(|t| t.to_owned_table()),
            post: font.post().ok().map(|t| t.to_owned_table()),
        };

        for (metric, value) in &values {
            if metric.set(&mut tables, *value) {
                debug!("Copied {metric} = {value}");
            } else {
                debug!("Skipped {metric}: target font has no field for it");
            }
        }

        if let Some(hhea) = &tables.hhea {
            builder.add_table(hhea)?;
        }
        if let Some(os2) = &tables.os2 {
            builder.add_table(os2)?;
        }
        if let Some(post) = &tables.post {
            builder.add_table(post)?;
        }
        Ok(())
    })
}
