//! Page content streams.

use crate::font::{FontId, Shaper};
use crate::layout::{DrawOp, LaidOutPage};
use crate::model::{Color, FontWeight};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Stroke width of synthetic bold, relative to the font size.
const SYNTHETIC_BOLD_STROKE: f32 = 0.025;

/// A glyph drawn somewhere in the document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GlyphUse {
    /// Advance from `hmtx`, in font units
    pub advance: u16,
    /// Source text the glyph stands for
    pub text: String,
}

/// Glyphs used per font, collected while writing content streams.
#[derive(Debug, Default)]
pub(crate) struct FontUsage {
    fonts: BTreeMap<FontId, BTreeMap<u16, GlyphUse>>,
}

impl FontUsage {
    fn record(&mut self, font: FontId, glyph_id: u16, advance: u16, text: &str) {
        let glyphs = self.fonts.entry(font).or_default();
        let entry = glyphs.entry(glyph_id).or_insert_with(|| GlyphUse {
            advance,
            text: String::new(),
        });
        if entry.text.is_empty() {
            entry.text = text.to_string();
        }
    }

    pub fn fonts(&self) -> impl Iterator<Item = (FontId, &BTreeMap<u16, GlyphUse>)> {
        self.fonts.iter().map(|(id, glyphs)| (*id, glyphs))
    }
}

/// Format a number the way content streams expect: no exponent, at most
/// three decimals, no trailing zeros.
pub(crate) fn num(value: f32) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn color_op(out: &mut String, color: Color, operator: &str) {
    let [r, g, b] = color.to_unit();
    let _ = writeln!(out, "{} {} {} {}", num(r), num(g), num(b), operator);
}

/// Writes the content stream of one page.
pub(crate) struct ContentWriter<'s, 'f> {
    shaper: &'s Shaper<'f>,
    page_height: f32,
    synthetic_bold: bool,
}

impl<'s, 'f> ContentWriter<'s, 'f> {
    pub fn new(shaper: &'s Shaper<'f>, page_height: f32, synthetic_bold: bool) -> Self {
        Self {
            shaper,
            page_height,
            synthetic_bold,
        }
    }

    /// Page coordinates are top-down; PDF user space is bottom-up.
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    /// Content stream of `page`, painted as backgrounds, then rules, then
    /// text so later fills never cover earlier lines.
    pub fn write_page(&self, page: &LaidOutPage, usage: &mut FontUsage) -> Vec<u8> {
        let mut out = String::new();

        for op in &page.ops {
            if let DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } = op
            {
                out.push_str("q\n");
                color_op(&mut out, *color, "rg");
                let _ = writeln!(
                    out,
                    "{} {} {} {} re f",
                    num(*x),
                    num(self.flip(y + height)),
                    num(*width),
                    num(*height)
                );
                out.push_str("Q\n");
            }
        }

        for op in &page.ops {
            if let DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } = op
            {
                out.push_str("q\n");
                let _ = writeln!(out, "{} w", num(*width));
                color_op(&mut out, *color, "RG");
                let _ = writeln!(
                    out,
                    "{} {} m {} {} l S",
                    num(*x1),
                    num(self.flip(*y1)),
                    num(*x2),
                    num(self.flip(*y2))
                );
                out.push_str("Q\n");
            }
        }

        for op in &page.ops {
            if let DrawOp::Text {
                x,
                baseline,
                weight,
                size,
                color,
                text,
            } = op
            {
                self.write_text(&mut out, usage, *x, *baseline, *weight, *size, *color, text);
            }
        }

        out.into_bytes()
    }

    #[allow(clippy::too_many_arguments)]
    fn write_text(
        &self,
        out: &mut String,
        usage: &mut FontUsage,
        x: f32,
        baseline: f32,
        weight: FontWeight,
        size: f32,
        color: Color,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }

        let shaped = self.shaper.shape(weight, text);
        let scale = 1000.0 / shaped.units_per_em as f32;

        out.push_str("q\n");
        color_op(out, color, "rg");
        if weight == FontWeight::Bold && self.synthetic_bold {
            color_op(out, color, "RG");
            let _ = writeln!(out, "{} w 2 Tr", num(size * SYNTHETIC_BOLD_STROKE));
        }
        out.push_str("BT\n");
        let _ = writeln!(out, "/F{} {} Tf", shaped.font.0, num(size));
        let _ = writeln!(out, "1 0 0 1 {} {} Tm", num(x), num(self.flip(baseline)));

        out.push_str("[<");
        for (i, glyph) in shaped.glyphs.iter().enumerate() {
            let nominal = self.shaper.nominal_advance(shaped.font, glyph.glyph_id);
            usage.record(
                shaped.font,
                glyph.glyph_id,
                nominal,
                shaped.cluster_text(text, i),
            );

            let _ = write!(out, "{:04X}", glyph.glyph_id);
            let adjust = (nominal as i32 - glyph.x_advance) as f32 * scale;
            if adjust.abs() > 0.001 && i + 1 < shaped.glyphs.len() {
                let _ = write!(out, "> {} <", num(adjust));
            }
        }
        out.push_str(">] TJ\nET\nQ\n");
    }
}
