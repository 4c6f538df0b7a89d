//! hmtx table merging

use read_fonts::{FontRef, TableProvider, tables::hmtx::Hmtx as ReadHmtx};
use write_fonts::tables::hmtx::{Hmtx, LongMetric};

use crate::{MergeError, Result, plan::MergePlan, types::GlyphId};

/// Build the merged hmtx table, with a long metric for every glyph.
pub fn merge_hmtx(base: &FontRef, donor: &FontRef, plan: &MergePlan) -> Result<Hmtx> {
    let base_hmtx = base.hmtx().map_err(|_| MergeError::MissingTable("hmtx"))?;
    let donor_hmtx = donor.hmtx().map_err(|_| MergeError::MissingTable("hmtx"))?;

    let h_metrics = (0..plan.base_glyph_count())
        .map(|gid| metric(&base_hmtx, GlyphId::new(gid)))
        .chain(plan.donor_glyphs().map(|(gid, _)| metric(&donor_hmtx, gid)))
        .collect();

    Ok(Hmtx { h_metrics, left_side_bearings: Vec::new() })
}

fn metric(hmtx: &ReadHmtx, gid: GlyphId) -> LongMetric {
    LongMetric {
        advance: hmtx.advance(gid.into()).unwrap_or(0),
        side_bearing: hmtx.side_bearing(gid.into()).unwrap_or(0),
    }
}
