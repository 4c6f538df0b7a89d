//! Generic font table manipulation utilities.

#[cfg(feature = "test-fonts")]
pub mod test_fonts;

use anyhow::Result;
use read_fonts::{FontRef, TableProvider, types::Tag};
use write_fonts::{
    FontBuilder,
    tables::name::{Name, NameRecord},
};

/// Name table IDs.
pub const NAME_ID_COPYRIGHT: u16 = 0;
pub const NAME_ID_FAMILY: u16 = 1;
pub const NAME_ID_SUBFAMILY: u16 = 2;
pub const NAME_ID_UNIQUE_ID: u16 = 3;
pub const NAME_ID_FULL_NAME: u16 = 4;
pub const NAME_ID_VERSION: u16 = 5;
pub const NAME_ID_POSTSCRIPT: u16 = 6;
pub const NAME_ID_LICENSE: u16 = 13;
pub const NAME_ID_LICENSE_URL: u16 = 14;
pub const NAME_ID_TYPOGRAPHIC_FAMILY: u16 = 16;

const PLATFORM_WINDOWS: u16 = 3;
const ENCODING_UNICODE_BMP: u16 = 1;
const LANGUAGE_EN_US: u16 = 0x409;

/// Rewrite font data by applying a transformation function.
///
/// Copies all tables from the source font, then calls `f` to modify or add tables.
/// The function receives a reference to the source font and a mutable builder
/// that already contains all original tables.
pub fn rewrite_font(
    data: &[u8],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    rewrite_font_without(data, &[], f)
}

/// Like [`rewrite_font`], but tables listed in `drop` are not copied over.
pub fn rewrite_font_without(
    data: &[u8],
    drop: &[Tag],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if drop.contains(&tag) {
            continue;
        }
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data.as_bytes().to_vec());
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}

/// Build a fresh name table.
///
/// Only records whose ID is listed in `keep` survive from the source font (on
/// every platform); everything else, including typographic family names, is
/// discarded. Each `(name_id, string)` in `names` is then written as a Windows
/// Unicode English record.
pub fn replace_name_records(
    font: &FontRef,
    keep: &[u16],
    names: &[(u16, String)],
) -> Result<Name> {
    let mut records = Vec::new();

    if let Ok(name) = font.name() {
        for record in name.name_record() {
            let name_id = record.name_id().to_u16();
            if !keep.contains(&name_id) || names.iter().any(|(id, _)| *id == name_id) {
                continue;
            }
            let Ok(current) = record.string(name.string_data()) else {
                continue;
            };
            records.push(NameRecord::new(
                record.platform_id(),
                record.encoding_id(),
                record.language_id(),
                record.name_id(),
                current.chars().collect::<String>().into(),
            ));
        }
    }

    for (name_id, string) in names {
        records.push(NameRecord::new(
            PLATFORM_WINDOWS,
            ENCODING_UNICODE_BMP,
            LANGUAGE_EN_US,
            read_fonts::types::NameId::new(*name_id),
            string.clone().into(),
        ));
    }

    records.sort_by_key(|r| (r.platform_id, r.encoding_id, r.language_id, r.name_id));
    Ok(Name::new(records))
}

/// Read a name string, preferring the Windows English record.
pub fn name_string(font: &FontRef, name_id: u16) -> Option<String> {
    let name = font.name().ok()?;
    let mut fallback = None;

    for record in name.name_record() {
        if record.name_id().to_u16() != name_id {
            continue;
        }
        let Ok(s) = record.string(name.string_data()) else {
            continue;
        };
        let s = s.chars().collect::<String>();
        if record.platform_id() == PLATFORM_WINDOWS && record.language_id() == LANGUAGE_EN_US {
            return Some(s);
        }
        fallback.get_or_insert(s);
    }

    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_name_records() {
        let data = font_test_data::NAMES_ONLY;
        let out = rewrite_font(data, |font, builder| {
            let name = replace_name_records(
                font,
                &[],
                &[(NAME_ID_FAMILY, "Foo".to_string()), (NAME_ID_POSTSCRIPT, "Foo-Bar".to_string())],
            )?;
            builder.add_table(&name)?;
            Ok(())
        })
        .unwrap();

        let font = FontRef::new(&out).unwrap();
        assert_eq!(name_string(&font, NAME_ID_FAMILY).as_deref(), Some("Foo"));
        assert_eq!(name_string(&font, NAME_ID_POSTSCRIPT).as_deref(), Some("Foo-Bar"));
        assert_eq!(name_string(&font, NAME_ID_TYPOGRAPHIC_FAMILY), None);
    }

    #[test]
    fn test_rewrite_font_without_drops_table() {
        let data = font_test_data::NAMES_ONLY;
        let out = rewrite_font_without(data, &[Tag::new(b"name")], |_, _| Ok(())).unwrap();
        let font = FontRef::new(&out).unwrap();
        assert!(font.table_data(Tag::new(b"name")).is_none());
    }

    #[test]
    fn test_name_string_missing() {
        let font = FontRef::new(font_test_data::NAMES_ONLY).unwrap();
        assert_eq!(name_string(&font, 9999), None);
    }
}
