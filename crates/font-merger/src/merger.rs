//! Main Merger implementation

use log::{debug, info};
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::FontBuilder;

use crate::{
    MergeError, Result,
    plan::MergePlan,
    tables::{
        cmap::build_cmap, glyf::merge_glyf, head::merge_head, hhea::merge_hhea, hmtx::merge_hmtx,
        maxp::merge_maxp, post::merge_post,
    },
};

/// Tables rebuilt from both fonts.
const HANDLED_TABLES: &[[u8; 4]] =
    &[*b"head", *b"maxp", *b"cmap", *b"hmtx", *b"hhea", *b"post", *b"glyf", *b"loca"];

/// Per-glyph tables of the base font that no longer match the merged glyph set.
pub const DROPPED_TABLES: &[[u8; 4]] =
    &[*b"hdmx", *b"LTSH", *b"vhea", *b"vmtx", *b"gvar", *b"HVAR", *b"VVAR"];

/// Merges the glyphs a base font is missing from a donor font.
///
/// Every other table of the base font is copied verbatim.
pub struct Merger<'a> {
    base: FontRef<'a>,
    donor: FontRef<'a>,
    plan: MergePlan,
}

impl<'a> Merger<'a> {
    /// Check that the fonts can be merged and plan the merge.
    pub fn new(base: &'a [u8], donor: &'a [u8]) -> Result<Self> {
        let base = FontRef::new(base)?;
        let donor = FontRef::new(donor)?;

        let expected = base.head()?.units_per_em();
        let actual = donor.head()?.units_per_em();
        if expected != actual {
            return Err(MergeError::IncompatibleUnitsPerEm { expected, actual });
        }
        for font in [&base, &donor] {
            if font.glyf().is_err() || font.loca(None).is_err() {
                return Err(MergeError::MissingTable("glyf"));
            }
        }

        let plan = MergePlan::new(&base, &donor)?;
        Ok(Self { base, donor, plan })
    }

    pub fn plan(&self) -> &MergePlan {
        &self.plan
    }

    /// Build the merged font.
    pub fn merge(&self) -> Result<Vec<u8>> {
        let plan = &self.plan;
        info!(
            "Adding {} glyphs for {} codepoints to a font with {} glyphs",
            plan.added_glyph_count(),
            plan.added_codepoints().count(),
            plan.base_glyph_count()
        );

        let total_glyphs = plan.total_glyph_count();
        let (glyf, loca, loca_format) = merge_glyf(&self.base, &self.donor, plan)?;
        let head = merge_head(&self.base, &self.donor, loca_format)?;
        let maxp = merge_maxp(&self.base, &self.donor, total_glyphs)?;
        let hmtx = merge_hmtx(&self.base, &self.donor, plan)?;
        let hhea = merge_hhea(&self.base, &self.donor, total_glyphs)?;
        let cmap = build_cmap(&plan.merged_mappings())?;
        let post = merge_post(&self.base)?;

        let mut builder = FontBuilder::new();
        builder.add_table(&head)?;
        builder.add_table(&maxp)?;
        builder.add_table(&cmap)?;
        builder.add_table(&hmtx)?;
        builder.add_table(&hhea)?;
        builder.add_table(&post)?;
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;

        for record in self.base.table_directory.table_records() {
            let tag = record.tag();
            if HANDLED_TABLES.iter().any(|t| Tag::new(t) == tag) {
                continue;
            }
            if DROPPED_TABLES.iter().any(|t| Tag::new(t) == tag) {
                debug!("Dropping {tag}: it does not cover the merged glyphs");
                continue;
            }
            if let Some(data) = self.base.table_data(tag) {
                builder.add_raw(tag, data.as_bytes().to_vec());
            }
        }

        Ok(builder.build())
    }
}
