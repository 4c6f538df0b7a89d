//! Opened fonts and the values the pipeline reads from them.

use std::path::{Path, PathBuf};

use log::debug;
use monospacifier_font_ops::{
    NAME_ID_FAMILY, NAME_ID_FULL_NAME, NAME_ID_POSTSCRIPT, NAME_ID_TYPOGRAPHIC_FAMILY, name_string,
};
use monospacifier_font_scale::advance_widths;
use read_fonts::{FontRef, TableProvider};

use crate::{Error, Result, io::FontFile, stats::WidthStatistic};

/// Display name derived from a path: the file name without its extension.
pub fn fname(path: &Path) -> String {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
}

/// A font loaded into memory.
#[derive(Debug, Clone)]
pub struct Font {
    path: PathBuf,
    data: Vec<u8>,
    family_name: String,
    full_name: String,
    postscript_name: String,
    units_per_em: u16,
}

impl Font {
    /// Read and parse the font at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = FontFile::new(path).read()?;
        Self::from_data(path, data)
    }

    /// Parse font data that was read from `path`.
    ///
    /// Missing names fall back to the file name.
    pub fn from_data(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let font =
            FontRef::new(&data).map_err(|source| Error::Parse { path: path.clone(), source })?;
        let units_per_em = font
            .head()
            .map_err(|source| Error::Parse { path: path.clone(), source })?
            .units_per_em();

        let stem = fname(&path);
        let family_name = name_string(&font, NAME_ID_TYPOGRAPHIC_FAMILY)
            .or_else(|| name_string(&font, NAME_ID_FAMILY))
            .unwrap_or_else(|| stem.clone());
        let full_name = name_string(&font, NAME_ID_FULL_NAME).unwrap_or_else(|| stem.clone());
        let postscript_name =
            name_string(&font, NAME_ID_POSTSCRIPT).unwrap_or_else(|| stem.replace(' ', ""));

        Ok(Self { path, data, family_name, full_name, postscript_name, units_per_em })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn font_ref(&self) -> Result<FontRef<'_>> {
        FontRef::new(&self.data).map_err(|source| Error::Parse { path: self.path.clone(), source })
    }

    /// Advance width of every glyph, in glyph id order.
    pub fn widths(&self) -> Result<Vec<u32>> {
        let font = self.font_ref()?;
        Ok(advance_widths(&font)?.into_iter().map(u32::from).collect())
    }

    /// Advance widths as they would be after converting to `units_per_em`.
    pub fn widths_at_units_per_em(&self, units_per_em: u16) -> Result<Vec<u32>> {
        let widths = self.widths()?;
        if units_per_em == self.units_per_em || self.units_per_em == 0 {
            return Ok(widths);
        }
        let factor = units_per_em as f64 / self.units_per_em as f64;
        Ok(widths.into_iter().map(|w| (w as f64 * factor).round() as u32).collect())
    }

    /// Reduce the widths (optionally converted to another em size) to one value.
    pub fn width(&self, statistic: WidthStatistic, units_per_em: Option<u16>) -> Result<u32> {
        let widths = match units_per_em {
            Some(upem) => self.widths_at_units_per_em(upem)?,
            None => self.widths()?,
        };
        let width = statistic
            .compute(&widths)
            .ok_or_else(|| Error::EmptyGlyphSet { font: self.family_name.clone() })?;
        debug!("{}: {statistic} width is {width}", self.family_name);
        Ok(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fname() {
        assert_eq!(fname(Path::new("/fonts/DejaVuSansMono.ttf")), "DejaVuSansMono");
        assert_eq!(fname(Path::new("Symbola.tar.ttf")), "Symbola.tar");
        assert_eq!(fname(Path::new("")), "");
    }

    #[test]
    fn test_from_data_rejects_garbage() {
        let result = Font::from_data("garbage.ttf", b"not a font".to_vec());
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
