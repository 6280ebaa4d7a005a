//! Greedy line wrapping on UAX #14 break opportunities.

use crate::font::TextMeasure;
use crate::model::FontWeight;
use unicode_linebreak::linebreaks;

const WIDTH_EPSILON: f32 = 0.001;

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Newlines are hard breaks. A run without break opportunities that is wider
/// than the line is broken between characters, so nothing is ever truncated.
/// Empty text yields no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    weight: FontWeight,
    size: f32,
    text: &str,
    max_width: f32,
) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut wrapper = LineWrapper {
        measure,
        weight,
        size,
        max_width,
        lines: Vec::new(),
        line: String::new(),
        line_width: 0.0,
    };

    for paragraph in text.split('\n') {
        wrapper.wrap_paragraph(paragraph);
        wrapper.finish_line();
    }

    wrapper.lines
}

struct LineWrapper<'m, M: ?Sized> {
    measure: &'m M,
    weight: FontWeight,
    size: f32,
    max_width: f32,
    lines: Vec<String>,
    line: String,
    line_width: f32,
}

impl<M: TextMeasure + ?Sized> LineWrapper<'_, M> {
    fn width(&self, text: &str) -> f32 {
        self.measure.text_width(self.weight, self.size, text)
    }

    fn fits(&self, extra: f32) -> bool {
        self.line_width + extra <= self.max_width + WIDTH_EPSILON
    }

    fn wrap_paragraph(&mut self, paragraph: &str) {
        let mut start = 0;
        for (offset, _) in linebreaks(paragraph) {
            if offset <= start {
                continue;
            }
            self.push_segment(&paragraph[start..offset]);
            start = offset;
        }
    }

    fn push_segment(&mut self, segment: &str) {
        // Trailing spaces may hang past the edge.
        let visible = self.width(segment.trim_end());

        if !self.line.is_empty() && !self.fits(visible) {
            self.finish_line();
        }

        if self.line.is_empty() && visible > self.max_width + WIDTH_EPSILON {
            self.push_chars(segment);
            return;
        }

        self.line.push_str(segment);
        self.line_width += self.width(segment);
    }

    fn push_chars(&mut self, segment: &str) {
        for ch in segment.chars() {
            let mut buf = [0u8; 4];
            let advance = self.width(ch.encode_utf8(&mut buf));
            if !self.line.is_empty() && !ch.is_whitespace() && !self.fits(advance) {
                self.finish_line();
            }
            self.line.push(ch);
            self.line_width += advance;
        }
    }

    fn finish_line(&mut self) {
        self.lines.push(self.line.trim_end().to_string());
        self.line.clear();
        self.line_width = 0.0;
    }
}
