//! Text shaping using rustybuzz.
//!
//! A [`Shaper`] borrows the faces of a [`FontRegistry`] for the duration of
//! one build. It is the measuring backend for layout and the glyph source
//! for the PDF writer, so both stages see identical advances.

use super::measure::TextMeasure;
use super::registry::{FontId, FontRegistry};
use crate::error::{Error, Result};
use crate::model::FontWeight;
use rustybuzz::ttf_parser::GlyphId;

/// A positioned glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph index in the font
    pub glyph_id: u16,
    /// Advance in font units, including kerning
    pub x_advance: i32,
    /// Byte offset of the source cluster in the shaped text
    pub cluster: u32,
}

/// Result of shaping one run of text.
#[derive(Debug, Clone)]
pub struct ShapedText {
    /// Font the glyph ids refer to
    pub font: FontId,
    /// Glyphs in visual order
    pub glyphs: Vec<ShapedGlyph>,
    /// Font units per em
    pub units_per_em: u16,
}

impl ShapedText {
    /// Total advance in points at the given size.
    pub fn width(&self, size: f32) -> f32 {
        let units: i64 = self.glyphs.iter().map(|g| g.x_advance as i64).sum();
        units as f32 * size / self.units_per_em as f32
    }

    /// Source text covered by the glyph at `index`.
    ///
    /// Glyphs after the first one of a multi-glyph cluster map to an empty
    /// string.
    pub fn cluster_text<'t>(&self, text: &'t str, index: usize) -> &'t str {
        let glyph = &self.glyphs[index];
        if index > 0 && self.glyphs[index - 1].cluster == glyph.cluster {
            return "";
        }

        let start = glyph.cluster as usize;
        let end = self
            .glyphs
            .iter()
            .map(|g| g.cluster as usize)
            .filter(|&c| c > start)
            .min()
            .unwrap_or(text.len());
        text.get(start..end).unwrap_or("")
    }
}

struct WeightFace<'a> {
    id: FontId,
    face: rustybuzz::Face<'a>,
    units_per_em: u16,
    descender: i16,
}

/// Shaping context over a registry's faces.
pub struct Shaper<'a> {
    registry: &'a FontRegistry,
    regular: WeightFace<'a>,
    bold: WeightFace<'a>,
}

impl<'a> Shaper<'a> {
    /// Parse the faces for every weight. Fails if a weight is missing.
    pub fn new(registry: &'a FontRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            regular: Self::weight_face(registry, FontWeight::Regular)?,
            bold: Self::weight_face(registry, FontWeight::Bold)?,
        })
    }

    fn weight_face(registry: &'a FontRegistry, weight: FontWeight) -> Result<WeightFace<'a>> {
        let font = registry.font_for(weight)?;
        let face = rustybuzz::Face::from_slice(font.data.as_slice(), font.face_index)
            .ok_or_else(|| {
                Error::FontDecode(format!("{} cannot be shaped", font.postscript_name))
            })?;

        Ok(WeightFace {
            id: font.id,
            face,
            units_per_em: font.metrics.units_per_em,
            descender: font.metrics.descender,
        })
    }

    fn face(&self, weight: FontWeight) -> &WeightFace<'a> {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// The registry the faces were borrowed from.
    pub fn registry(&self) -> &'a FontRegistry {
        self.registry
    }

    /// Font id used for a weight.
    pub fn font_id(&self, weight: FontWeight) -> FontId {
        self.face(weight).id
    }

    /// Shape a single line of text.
    pub fn shape(&self, weight: FontWeight, text: &str) -> ShapedText {
        let face = self.face(weight);

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let output = rustybuzz::shape(&face.face, &[], buffer);
        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                x_advance: pos.x_advance,
                cluster: info.cluster,
            })
            .collect();

        ShapedText {
            font: face.id,
            glyphs,
            units_per_em: face.units_per_em,
        }
    }

    /// Advance width from `hmtx`, in font units.
    pub fn nominal_advance(&self, font: FontId, glyph_id: u16) -> u16 {
        let face = if self.regular.id == font {
            &self.regular
        } else {
            &self.bold
        };
        face.face.glyph_hor_advance(GlyphId(glyph_id)).unwrap_or(0)
    }
}

impl TextMeasure for Shaper<'_> {
    fn text_width(&self, weight: FontWeight, size: f32, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.shape(weight, text).width(size)
    }

    fn descent(&self, weight: FontWeight, size: f32) -> f32 {
        let face = self.face(weight);
        (face.descender as f32).abs() * size / face.units_per_em as f32
    }
}
