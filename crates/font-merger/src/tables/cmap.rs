//! cmap reading and rebuilding

use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId},
    types::GlyphId as ReadGlyphId,
};
use write_fonts::tables::cmap::Cmap;

use crate::{
    MergeError, Result,
    types::{Codepoint, GlyphId, MergedGlyphId},
};

/// Codepoint to glyph mappings of the font's preferred Unicode subtable.
///
/// Mappings to `.notdef` are skipped. The result is sorted by codepoint.
pub fn read_cmap_mappings(font: &FontRef) -> Result<Vec<(Codepoint, GlyphId)>> {
    let cmap = font.cmap().map_err(|_| MergeError::MissingTable("cmap"))?;
    let mut mappings: Vec<(Codepoint, GlyphId)> = match find_best_subtable(&cmap) {
        Some(subtable) => subtable
            .iter()
            .filter(|(_, gid)| gid.to_u32() != 0 && gid.to_u32() <= u16::MAX as u32)
            .map(|(cp, gid)| (Codepoint::new(cp), GlyphId::new(gid.to_u32() as u16)))
            .collect(),
        None => Vec::new(),
    };
    mappings.sort();
    mappings.dedup_by_key(|(cp, _)| *cp);
    Ok(mappings)
}

/// Build a cmap table for the merged font.
pub fn build_cmap(mappings: &[(Codepoint, MergedGlyphId)]) -> Result<Cmap> {
    let chars = mappings
        .iter()
        .filter_map(|(cp, gid)| Some((cp.to_char()?, ReadGlyphId::new(gid.to_u32()))));
    Cmap::from_mappings(chars).map_err(|_| MergeError::CmapBuildError)
}

fn find_best_subtable<'a>(cmap: &'a ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    // Priority: Format 12 (full Unicode) > Format 4 (BMP) > others
    let records = cmap.encoding_records();

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 10))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format12(_))
        {
            return Some(subtable);
        }
    }

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 1))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format4(_))
        {
            return Some(subtable);
        }
    }

    records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok())
}
