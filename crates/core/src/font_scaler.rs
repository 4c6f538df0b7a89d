//! Editing one font: widths, em size, metrics and names.

use std::path::{Path, PathBuf};

use log::{debug, info};
use monospacifier_font_merger::Merger;
use monospacifier_font_ops::{
    NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT, NAME_ID_SUBFAMILY, NAME_ID_UNIQUE_ID,
    NAME_ID_VERSION, name_string, replace_name_records, rewrite_font,
};
use monospacifier_font_scale::{
    apply_horizontal_metrics, has_glyf_outlines, read_horizontal_metrics, rescale_units_per_em,
};
use read_fonts::{FontRef, TableProvider};

use crate::{
    Error, Result,
    config::{DEFAULT_SUBFAMILY, HISTOGRAM_SIZE, KEEP_NAME_IDS},
    font::{Font, fname},
    io::FontFile,
    metrics,
    naming::OutputNames,
    scaler::GlyphScaler,
    stats::width_histogram,
};

/// An in-memory font being rewritten.
///
/// Every operation replaces the held font data; nothing touches the disk
/// until [`FontScaler::write`].
#[derive(Debug, Clone)]
pub struct FontScaler {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontScaler {
    /// Start from a copy of an opened font.
    pub fn from_font(font: &Font) -> Self {
        Self { path: font.path().to_path_buf(), data: font.data().to_vec() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::new(&self.data).map_err(|source| Error::Parse { path: self.path.clone(), source })
    }

    fn display_name(&self) -> String {
        fname(&self.path)
    }

    /// Apply `scaler` to every glyph.
    ///
    /// Outlines move with their new left side bearing.
    pub fn scale_glyphs(&mut self, scaler: &impl GlyphScaler) -> Result<()> {
        let metrics = read_horizontal_metrics(&self.font_ref()?)?;
        let scaled: Vec<_> = metrics.into_iter().map(|glyph| scaler.scale(glyph)).collect();
        self.data = apply_horizontal_metrics(&self.data, &scaled)?;

        let widths: Vec<u32> = scaled.iter().map(|m| m.advance_width as u32).collect();
        debug!(
            "{}: width distribution after scaling: {:?}",
            self.display_name(),
            width_histogram(&widths, HISTOGRAM_SIZE)
        );
        Ok(())
    }

    /// Convert the font to a new em size.
    pub fn set_units_per_em(&mut self, units_per_em: u16) -> Result<()> {
        let font = self.font_ref()?;
        let current = font
            .head()
            .map_err(|source| Error::Parse { path: self.path.clone(), source })?
            .units_per_em();
        if current == units_per_em {
            return Ok(());
        }
        if !has_glyf_outlines(&font) {
            return Err(Error::UnsupportedOutlines { font: self.display_name() });
        }
        self.data = rescale_units_per_em(&self.data, units_per_em)?;
        Ok(())
    }

    /// Copy the reference font's vertical metrics.
    pub fn copy_metrics(&mut self, reference: &Font) -> Result<()> {
        let reference = reference.font_ref()?;
        self.data = metrics::copy_metrics(&self.data, &reference)?;
        Ok(())
    }

    /// Replace the naming of the font.
    ///
    /// Only legal strings survive from the old name table; the version string
    /// and subfamily are carried over.
    pub fn rename(&mut self, names: &OutputNames) -> Result<()> {
        let font = self.font_ref()?;
        let subfamily = name_string(&font, NAME_ID_SUBFAMILY)
            .unwrap_or_else(|| DEFAULT_SUBFAMILY.to_string());
        let version = name_string(&font, NAME_ID_VERSION);
        let unique_id = match &version {
            Some(version) => format!("{};{}", names.postscript_name, version),
            None => names.postscript_name.clone(),
        };

        let mut records = vec![
            (NAME_ID_FAMILY, names.family_name.clone()),
            (NAME_ID_SUBFAMILY, subfamily),
            (NAME_ID_UNIQUE_ID, unique_id),
            (NAME_ID_FULL_NAME, names.full_name.clone()),
            (NAME_ID_POSTSCRIPT, names.postscript_name.clone()),
        ];
        if let Some(version) = version {
            records.push((NAME_ID_VERSION, version));
        }

        self.data = rewrite_font(&self.data, |font, builder| {
            let name = replace_name_records(font, &KEEP_NAME_IDS, &records)?;
            builder.add_table(&name)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Add the glyphs of `donor` for every codepoint this font lacks.
    pub fn merge_glyphs_from(&mut self, donor: &Font) -> Result<()> {
        let merger = Merger::new(&self.data, donor.data())?;
        info!(
            "Taking {} glyphs from {}",
            merger.plan().added_glyph_count(),
            donor.family_name()
        );
        let merged = merger.merge()?;
        self.data = merged;
        Ok(())
    }

    /// Save the font to `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        FontFile::new(path.as_ref()).write(&self.data)
    }
}
