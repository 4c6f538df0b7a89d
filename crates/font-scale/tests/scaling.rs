use monospacifier_font_ops::test_fonts::{TestFontBuilder, TestGlyph};
use monospacifier_font_scale::{
    HorizontalMetrics, advance_widths, apply_horizontal_metrics, read_horizontal_metrics,
    rescale_units_per_em,
};
use read_fonts::{
    FontRef, TableProvider,
    tables::glyf::{Anchor, Glyph},
    types::{GlyphId, Tag},
};

fn sample_font() -> Vec<u8> {
    TestFontBuilder::new("Sample")
        .glyphs([
            TestGlyph::rect('A', 600, 100, 500),
            TestGlyph::composite(Some('B'), 600, 1, 0, 0),
            TestGlyph::empty(Some(' '), 300),
        ])
        .build()
}

#[test]
fn test_read_horizontal_metrics() {
    let data = sample_font();
    let font = FontRef::new(&data).unwrap();
    let metrics = read_horizontal_metrics(&font).unwrap();

    assert_eq!(metrics.len(), 4);
    assert_eq!(metrics[1], HorizontalMetrics::new(600, 100, 100));
    assert_eq!(metrics[2], HorizontalMetrics::new(600, 100, 100));
    assert_eq!(metrics[3].advance_width, 300);
    assert_eq!(metrics[3].ink_width(), 0);
    assert_eq!(advance_widths(&font).unwrap(), vec![500, 600, 600, 300]);
}

#[test]
fn test_apply_horizontal_metrics_moves_outlines() {
    let data = sample_font();
    let font = FontRef::new(&data).unwrap();
    let mut metrics = read_horizontal_metrics(&font).unwrap();
    metrics[1] = HorizontalMetrics::new(800, 200, 200);
    metrics[2] = HorizontalMetrics::new(800, 200, 200);

    let out = apply_horizontal_metrics(&data, &metrics).unwrap();
    let font = FontRef::new(&out).unwrap();

    let hmtx = font.hmtx().unwrap();
    assert_eq!(hmtx.advance(GlyphId::new(1)), Some(800));
    assert_eq!(hmtx.side_bearing(GlyphId::new(1)), Some(200));
    assert_eq!(font.hhea().unwrap().advance_width_max().to_u16(), 800);

    let glyf = font.glyf().unwrap();
    let loca = font.loca(None).unwrap();
    match loca.get_glyf(GlyphId::new(1), &glyf).unwrap() {
        Some(Glyph::Simple(simple)) => {
            assert_eq!(simple.x_min(), 200);
            assert_eq!(simple.x_max(), 600);
            assert_eq!(simple.y_max(), 700);
        }
        _ => panic!("expected a simple glyph"),
    }

    // The component glyph already moved, so the offset must not add the shift again.
    match loca.get_glyf(GlyphId::new(2), &glyf).unwrap() {
        Some(Glyph::Composite(composite)) => {
            assert_eq!(composite.x_min(), 200);
            let component = composite.components().next().unwrap();
            assert!(matches!(component.anchor, Anchor::Offset { x: 0, y: 0 }));
        }
        _ => panic!("expected a composite glyph"),
    }

    assert_eq!(read_horizontal_metrics(&font).unwrap(), metrics);
}

#[test]
fn test_apply_horizontal_metrics_rejects_wrong_length() {
    let data = sample_font();
    let metrics = vec![HorizontalMetrics::new(500, 0, 500)];
    assert!(apply_horizontal_metrics(&data, &metrics).is_err());
}

#[test]
fn test_apply_horizontal_metrics_drops_device_metrics() {
    let data = TestFontBuilder::new("Sample")
        .glyph(TestGlyph::rect('A', 600, 100, 500))
        .raw_table(b"hdmx", &[0, 0, 0, 0, 0, 0, 0, 0])
        .raw_table(b"kern", &[0, 0, 0, 0])
        .build();
    let font = FontRef::new(&data).unwrap();
    let metrics = read_horizontal_metrics(&font).unwrap();

    let out = apply_horizontal_metrics(&data, &metrics).unwrap();
    let font = FontRef::new(&out).unwrap();
    assert!(font.table_data(Tag::new(b"hdmx")).is_none());
    assert!(font.table_data(Tag::new(b"kern")).is_some());
}

#[test]
fn test_rescale_units_per_em() {
    let data = sample_font();
    let out = rescale_units_per_em(&data, 2048).unwrap();
    let font = FontRef::new(&out).unwrap();

    assert_eq!(font.head().unwrap().units_per_em(), 2048);
    assert_eq!(font.hhea().unwrap().ascender().to_i16(), 1638);
    assert_eq!(font.hhea().unwrap().descender().to_i16(), -410);
    assert_eq!(font.os2().unwrap().s_typo_ascender(), 1638);
    assert_eq!(font.post().unwrap().underline_thickness().to_i16(), 102);

    let widths = advance_widths(&font).unwrap();
    assert_eq!(widths, vec![1024, 1229, 1229, 614]);

    let metrics = read_horizontal_metrics(&font).unwrap();
    assert_eq!(metrics[1].left_side_bearing, 205);
    assert_eq!(metrics[1].ink_width(), 819);
}

#[test]
fn test_rescale_units_per_em_drops_unconverted_tables() {
    let data = TestFontBuilder::new("Sample")
        .glyph(TestGlyph::rect('A', 600, 100, 500))
        .raw_table(b"kern", &[0, 0, 0, 0])
        .raw_table(b"prep", &[0xB0, 0x00])
        .build();

    let out = rescale_units_per_em(&data, 2000).unwrap();
    let font = FontRef::new(&out).unwrap();
    assert!(font.table_data(Tag::new(b"kern")).is_none());
    assert!(font.table_data(Tag::new(b"prep")).is_none());
    assert_eq!(advance_widths(&font).unwrap(), vec![1000, 1200]);
}

#[test]
fn test_rescale_units_per_em_same_size_is_identity() {
    let data = sample_font();
    let out = rescale_units_per_em(&data, 1000).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_rescale_units_per_em_rejects_zero() {
    let data = sample_font();
    assert!(rescale_units_per_em(&data, 0).is_err());
}

#[test]
fn test_apply_horizontal_metrics_drops_variation_tables() {
    let data = TestFontBuilder::new("Sample")
        .glyph(TestGlyph::rect('A', 600, 100, 500))
        .raw_table(b"HVAR", &[0, 1, 0, 0])
        .raw_table(b"gvar", &[0, 1, 0, 0])
        .raw_table(b"STAT", &[0, 1, 0, 2])
        .build();
    let font = FontRef::new(&data).unwrap();
    let metrics = read_horizontal_metrics(&font).unwrap();

    let out = apply_horizontal_metrics(&data, &metrics).unwrap();
    let font = FontRef::new(&out).unwrap();
    assert!(font.table_data(Tag::new(b"HVAR")).is_none());
    assert!(font.table_data(Tag::new(b"gvar")).is_none());
    assert!(font.table_data(Tag::new(b"STAT")).is_some());
}

#[test]
fn test_rescale_variable_font_keeps_default_instance() {
    let data = font_test_data::VAZIRMATN_VAR;
    let font = FontRef::new(data).unwrap();
    assert!(font.table_data(Tag::new(b"fvar")).is_some());
    assert!(font.table_data(Tag::new(b"HVAR")).is_some());
    let current = font.head().unwrap().units_per_em();
    let glyph_count = font.maxp().unwrap().num_glyphs();
    let target = if current == 1000 { 2000 } else { 1000 };

    let out = rescale_units_per_em(data, target).unwrap();
    let font = FontRef::new(&out).unwrap();
    assert_eq!(font.head().unwrap().units_per_em(), target);
    assert_eq!(font.maxp().unwrap().num_glyphs(), glyph_count);
    for tag in monospacifier_font_scale::VARIATION_TABLES {
        assert!(font.table_data(tag).is_none(), "{tag} was kept");
    }
    assert_eq!(advance_widths(&font).unwrap().len(), glyph_count as usize);
}
