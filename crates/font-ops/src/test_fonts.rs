//! Minimal in-memory TrueType fonts for tests.

use read_fonts::{tables::glyf::CurvePoint, types::GlyphId};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{
            Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, GlyfLocaBuilder,
            Glyph, SimpleGlyph, Transform,
        },
        head::{Flags, Head, MacStyle},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        loca::LocaFormat,
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::{Os2, SelectionFlags},
        post::Post,
    },
    types::{
        F2Dot14, FWord, Fixed, GlyphId16, LongDateTime, NameId, Tag, UfWord, Version16Dot16,
    },
};

/// Outline of a test glyph.
#[derive(Debug, Clone, Copy)]
pub enum TestOutline {
    /// No contours (space-like glyph).
    Empty,
    /// A rectangle `(x_min, y_min, x_max, y_max)`.
    Rect(i16, i16, i16, i16),
    /// A single component referencing another glyph id, placed at an offset.
    Composite { base: u16, dx: i16, dy: i16 },
}

#[derive(Debug, Clone)]
pub struct TestGlyph {
    pub codepoint: Option<char>,
    pub advance: u16,
    pub outline: TestOutline,
}

impl TestGlyph {
    pub fn rect(codepoint: char, advance: u16, x_min: i16, x_max: i16) -> Self {
        Self {
            codepoint: Some(codepoint),
            advance,
            outline: TestOutline::Rect(x_min, 0, x_max, 700),
        }
    }

    pub fn empty(codepoint: Option<char>, advance: u16) -> Self {
        Self { codepoint, advance, outline: TestOutline::Empty }
    }

    pub fn composite(codepoint: Option<char>, advance: u16, base: u16, dx: i16, dy: i16) -> Self {
        Self { codepoint, advance, outline: TestOutline::Composite { base, dx, dy } }
    }
}

/// Builder for a small but complete TrueType font.
#[derive(Debug, Clone)]
pub struct TestFontBuilder {
    family: String,
    full_name: String,
    postscript_name: String,
    typographic_family: Option<String>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    with_os2: bool,
    extra_tables: Vec<(Tag, Vec<u8>)>,
    glyphs: Vec<TestGlyph>,
}

impl TestFontBuilder {
    pub fn new(family: &str) -> Self {
        Self {
            family: family.to_string(),
            full_name: format!("{family} Regular"),
            postscript_name: format!("{}-Regular", family.replace(' ', "")),
            typographic_family: None,
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
            with_os2: true,
            extra_tables: Vec::new(),
            glyphs: vec![TestGlyph {
                codepoint: None,
                advance: 500,
                outline: TestOutline::Rect(50, 0, 450, 700),
            }],
        }
    }

    pub fn full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }

    pub fn postscript_name(mut self, postscript_name: &str) -> Self {
        self.postscript_name = postscript_name.to_string();
        self
    }

    pub fn typographic_family(mut self, family: &str) -> Self {
        self.typographic_family = Some(family.to_string());
        self
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn vertical_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.line_gap = line_gap;
        self
    }

    pub fn without_os2(mut self) -> Self {
        self.with_os2 = false;
        self
    }

    pub fn raw_table(mut self, tag: &[u8; 4], data: &[u8]) -> Self {
        self.extra_tables.push((Tag::new(tag), data.to_vec()));
        self
    }

    /// Append a glyph; the `.notdef` glyph always has id 0.
    pub fn glyph(mut self, glyph: TestGlyph) -> Self {
        self.glyphs.push(glyph);
        self
    }

    pub fn glyphs(self, glyphs: impl IntoIterator<Item = TestGlyph>) -> Self {
        glyphs.into_iter().fold(self, Self::glyph)
    }

    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;

        let mut glyf_builder = GlyfLocaBuilder::new();
        let mut bounds: Option<(i16, i16, i16, i16)> = None;
        for glyph in &self.glyphs {
            let rect = match glyph.outline {
                TestOutline::Rect(x0, y0, x1, y1) => Some((x0, y0, x1, y1)),
                TestOutline::Composite { base, dx, dy } => match self.glyphs[base as usize].outline
                {
                    TestOutline::Rect(x0, y0, x1, y1) => Some((x0 + dx, y0 + dy, x1 + dx, y1 + dy)),
                    _ => None,
                },
                TestOutline::Empty => None,
            };
            if let Some((x0, y0, x1, y1)) = rect {
                bounds = Some(match bounds {
                    None => (x0, y0, x1, y1),
                    Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
                });
            }
            let written = match (glyph.outline, rect) {
                (TestOutline::Rect(..), Some((x_min, y_min, x_max, y_max))) => {
                    Glyph::Simple(SimpleGlyph {
                        bbox: Bbox { x_min, y_min, x_max, y_max },
                        contours: vec![Contour::from(vec![
                            CurvePoint::on_curve(x_min, y_min),
                            CurvePoint::on_curve(x_max, y_min),
                            CurvePoint::on_curve(x_max, y_max),
                            CurvePoint::on_curve(x_min, y_max),
                        ])],
                        instructions: vec![],
                    })
                }
                (TestOutline::Composite { base, dx, dy }, Some((x_min, y_min, x_max, y_max))) => {
                    let component = Component {
                        glyph: GlyphId16::new(base),
                        anchor: Anchor::Offset { x: dx, y: dy },
                        flags: ComponentFlags {
                            round_xy_to_grid: true,
                            use_my_metrics: false,
                            scaled_component_offset: false,
                            unscaled_component_offset: false,
                            overlap_compound: false,
                        },
                        transform: Transform {
                            xx: F2Dot14::from_f32(1.0),
                            yx: F2Dot14::from_f32(0.0),
                            xy: F2Dot14::from_f32(0.0),
                            yy: F2Dot14::from_f32(1.0),
                        },
                    };
                    Glyph::Composite(CompositeGlyph::new(
                        component,
                        Bbox { x_min, y_min, x_max, y_max },
                    ))
                }
                _ => Glyph::Empty,
            };
            glyf_builder.add_glyph(&written).expect("glyph");
        }
        let (glyf, loca, loca_format) = glyf_builder.build();
        let (x_min, y_min, x_max, y_max) = bounds.unwrap_or_default();

        let mappings: Vec<(char, GlyphId)> = self
            .glyphs
            .iter()
            .enumerate()
            .filter_map(|(gid, g)| g.codepoint.map(|c| (c, GlyphId::new(gid as u32))))
            .collect();
        let cmap = Cmap::from_mappings(mappings).expect("cmap");

        let head = Head {
            font_revision: Fixed::from_f64(1.0),
            checksum_adjustment: 0,
            magic_number: 0x5F0F3CF5,
            flags: Flags::empty(),
            units_per_em: self.units_per_em,
            created: LongDateTime::new(0),
            modified: LongDateTime::new(0),
            x_min,
            y_min,
            x_max,
            y_max,
            mac_style: MacStyle::empty(),
            lowest_rec_ppem: 8,
            font_direction_hint: 2,
            index_to_loc_format: match loca_format {
                LocaFormat::Short => 0,
                LocaFormat::Long => 1,
            },
        };

        let hhea = Hhea {
            ascender: FWord::new(self.ascender),
            descender: FWord::new(self.descender),
            line_gap: FWord::new(self.line_gap),
            advance_width_max: UfWord::new(
                self.glyphs.iter().map(|g| g.advance).max().unwrap_or(0),
            ),
            min_left_side_bearing: FWord::new(x_min),
            min_right_side_bearing: FWord::new(0),
            x_max_extent: FWord::new(x_max),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: num_glyphs,
        };

        let hmtx = Hmtx {
            h_metrics: self
                .glyphs
                .iter()
                .map(|g| LongMetric {
                    advance: g.advance,
                    side_bearing: match g.outline {
                        TestOutline::Rect(x0, ..) => x0,
                        TestOutline::Composite { base, dx, .. } => {
                            match self.glyphs[base as usize].outline {
                                TestOutline::Rect(x0, ..) => x0 + dx,
                                _ => 0,
                            }
                        }
                        TestOutline::Empty => 0,
                    },
                })
                .collect(),
            left_side_bearings: vec![],
        };

        let maxp = Maxp {
            num_glyphs,
            max_points: Some(4),
            max_contours: Some(1),
            max_composite_points: Some(4),
            max_composite_contours: Some(1),
            max_zones: Some(1),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(1),
            max_component_depth: Some(1),
        };

        let post = Post {
            version: Version16Dot16::VERSION_3_0,
            italic_angle: Fixed::from_f64(0.0),
            underline_position: FWord::new(-100),
            underline_thickness: FWord::new(50),
            is_fixed_pitch: 0,
            min_mem_type42: 0,
            max_mem_type42: 0,
            min_mem_type1: 0,
            max_mem_type1: 0,
            num_glyphs: Some(num_glyphs),
            glyph_name_index: None,
            string_data: None,
        };

        let mut names = vec![
            (1u16, self.family.clone()),
            (2, "Regular".to_string()),
            (4, self.full_name.clone()),
            (6, self.postscript_name.clone()),
        ];
        if let Some(family) = &self.typographic_family {
            names.push((16, family.clone()));
        }
        let name = Name::new(
            names
                .into_iter()
                .map(|(id, s)| NameRecord::new(3, 1, 0x409, NameId::new(id), s.into()))
                .collect(),
        );

        let mut builder = FontBuilder::new();
        builder.add_table(&head).expect("head");
        builder.add_table(&hhea).expect("hhea");
        builder.add_table(&hmtx).expect("hmtx");
        builder.add_table(&maxp).expect("maxp");
        builder.add_table(&cmap).expect("cmap");
        builder.add_table(&post).expect("post");
        builder.add_table(&glyf).expect("glyf");
        builder.add_table(&loca).expect("loca");
        builder.add_table(&name).expect("name");
        if self.with_os2 {
            builder.add_table(&self.os2()).expect("OS/2");
        }
        for (tag, data) in &self.extra_tables {
            builder.add_raw(*tag, data.clone());
        }
        builder.build()
    }

    fn os2(&self) -> Os2 {
        Os2 {
            x_avg_char_width: 500,
            us_weight_class: 400,
            us_width_class: 5,
            fs_type: 0,
            y_subscript_x_size: 650,
            y_subscript_y_size: 600,
            y_subscript_x_offset: 0,
            y_subscript_y_offset: 75,
            y_superscript_x_size: 650,
            y_superscript_y_size: 600,
            y_superscript_x_offset: 0,
            y_superscript_y_offset: 350,
            y_strikeout_size: 50,
            y_strikeout_position: 300,
            s_family_class: 0,
            panose_10: [0; 10],
            ul_unicode_range_1: 0,
            ul_unicode_range_2: 0,
            ul_unicode_range_3: 0,
            ul_unicode_range_4: 0,
            ach_vend_id: Tag::new(b"NONE"),
            fs_selection: SelectionFlags::REGULAR,
            us_first_char_index: 0x20,
            us_last_char_index: 0x7E,
            s_typo_ascender: self.ascender,
            s_typo_descender: self.descender,
            s_typo_line_gap: self.line_gap,
            us_win_ascent: self.ascender.max(0) as u16,
            us_win_descent: self.descender.unsigned_abs(),
            ul_code_page_range_1: Some(0),
            ul_code_page_range_2: Some(0),
            sx_height: Some(500),
            s_cap_height: Some(700),
            us_default_char: Some(0),
            us_break_char: Some(0x20),
            us_max_context: Some(0),
            us_lower_optical_point_size: None,
            us_upper_optical_point_size: None,
        }
    }
}
