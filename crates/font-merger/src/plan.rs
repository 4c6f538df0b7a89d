//! Selection of the donor glyphs a merge appends to the base font.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use log::debug;
use read_fonts::{FontRef, TableProvider, tables::glyf::Glyph as ReadGlyph};

use crate::{
    MergeError, Result,
    tables::cmap::read_cmap_mappings,
    types::{Codepoint, GlyphId, MergedGlyphId},
};

/// Which donor glyphs are added, and where they land in the merged font.
#[derive(Debug, Clone)]
pub struct MergePlan {
    base_glyph_count: u16,
    /// Donor glyph id -> merged glyph id, in merged glyph order.
    donor_glyphs: IndexMap<GlyphId, MergedGlyphId>,
    base_mappings: Vec<(Codepoint, GlyphId)>,
    /// Codepoints taken from the donor, with their donor glyph ids.
    added_mappings: Vec<(Codepoint, GlyphId)>,
}

impl MergePlan {
    /// Compute the plan for merging `donor` into `base`.
    ///
    /// A donor glyph is added when it is mapped from a codepoint the base does
    /// not map, or when an added composite glyph references it.
    pub fn new(base: &FontRef, donor: &FontRef) -> Result<Self> {
        let base_glyph_count = base.maxp()?.num_glyphs();
        let donor_glyph_count = donor.maxp()?.num_glyphs();

        let base_mappings = read_cmap_mappings(base)?;
        let covered: HashSet<Codepoint> = base_mappings.iter().map(|(cp, _)| *cp).collect();

        let added_mappings: Vec<(Codepoint, GlyphId)> = read_cmap_mappings(donor)?
            .into_iter()
            .filter(|(cp, gid)| !covered.contains(cp) && gid.to_u16() < donor_glyph_count)
            .collect();

        let mut needed: BTreeSet<GlyphId> = added_mappings.iter().map(|(_, gid)| *gid).collect();
        let mut pending: Vec<GlyphId> = needed.iter().copied().collect();

        let glyf = donor.glyf().map_err(|_| MergeError::MissingTable("glyf"))?;
        let loca = donor.loca(None).map_err(|_| MergeError::MissingTable("loca"))?;
        while let Some(gid) = pending.pop() {
            if let Ok(Some(ReadGlyph::Composite(composite))) = loca.get_glyf(gid.into(), &glyf) {
                for component in composite.components() {
                    let component_gid = GlyphId::new(component.glyph.to_u16());
                    if component_gid.to_u16() < donor_glyph_count && needed.insert(component_gid) {
                        pending.push(component_gid);
                    }
                }
            }
        }

        let total = base_glyph_count as usize + needed.len();
        if total > u16::MAX as usize {
            return Err(MergeError::TooManyGlyphs(total));
        }

        let donor_glyphs: IndexMap<GlyphId, MergedGlyphId> = needed
            .into_iter()
            .enumerate()
            .map(|(i, gid)| (gid, MergedGlyphId::new(base_glyph_count + i as u16)))
            .collect();

        debug!(
            "Donor contributes {} codepoints and {} glyphs",
            added_mappings.len(),
            donor_glyphs.len()
        );

        Ok(Self { base_glyph_count, donor_glyphs, base_mappings, added_mappings })
    }

    pub fn base_glyph_count(&self) -> u16 {
        self.base_glyph_count
    }

    /// Number of glyphs in the merged font.
    pub fn total_glyph_count(&self) -> u16 {
        self.base_glyph_count + self.donor_glyphs.len() as u16
    }

    /// Donor glyphs to append, in merged glyph order.
    pub fn donor_glyphs(&self) -> impl Iterator<Item = (GlyphId, MergedGlyphId)> + '_ {
        self.donor_glyphs.iter().map(|(gid, mgid)| (*gid, *mgid))
    }

    pub fn added_glyph_count(&self) -> usize {
        self.donor_glyphs.len()
    }

    /// Codepoints the merged font gains from the donor.
    pub fn added_codepoints(&self) -> impl Iterator<Item = Codepoint> + '_ {
        self.added_mappings.iter().map(|(cp, _)| *cp)
    }

    /// Position of a donor glyph in the merged font.
    pub fn merged_id(&self, donor_gid: GlyphId) -> Option<MergedGlyphId> {
        self.donor_glyphs.get(&donor_gid).copied()
    }

    /// Character map of the merged font.
    pub fn merged_mappings(&self) -> Vec<(Codepoint, MergedGlyphId)> {
        let base = self
            .base_mappings
            .iter()
            .map(|(cp, gid)| (*cp, MergedGlyphId::new(gid.to_u16())));
        let added = self
            .added_mappings
            .iter()
            .filter_map(|(cp, gid)| Some((*cp, self.merged_id(*gid)?)));
        base.chain(added).collect()
    }
}
