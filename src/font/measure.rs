//! Text measurement seam between layout and fonts.

use crate::model::FontWeight;

/// Measures text for line breaking and baseline placement.
pub trait TextMeasure {
    /// Advance width of `text` in points.
    fn text_width(&self, weight: FontWeight, size: f32, text: &str) -> f32;

    /// Distance from the baseline down to the descender line, in points.
    fn descent(&self, weight: FontWeight, size: f32) -> f32;
}

/// Metric-free approximation: ASCII is `narrow` em wide, everything else
/// `wide` em.
///
/// Used for layout previews when no font file is at hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure {
    /// Advance of ASCII characters, in em
    pub narrow: f32,
    /// Advance of other characters, in em
    pub wide: f32,
    /// Descender depth, in em
    pub descent: f32,
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self {
            narrow: 0.5,
            wide: 1.0,
            descent: 0.2,
        }
    }
}

impl FixedMeasure {
    fn advance(&self, ch: char) -> f32 {
        match ch {
            '\u{300}'..='\u{36F}' | '\u{200B}'..='\u{200D}' => 0.0,
            c if c.is_ascii() => self.narrow,
            _ => self.wide,
        }
    }
}

impl TextMeasure for FixedMeasure {
    fn text_width(&self, _weight: FontWeight, size: f32, text: &str) -> f32 {
        text.chars().map(|c| self.advance(c)).sum::<f32>() * size
    }

    fn descent(&self, _weight: FontWeight, size: f32) -> f32 {
        self.descent * size
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, weight: FontWeight, size: f32, text: &str) -> f32 {
        (**self).text_width(weight, size, text)
    }

    fn descent(&self, weight: FontWeight, size: f32) -> f32 {
        (**self).descent(weight, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_measure_widths() {
        let m = FixedMeasure::default();
        assert_eq!(m.text_width(FontWeight::Regular, 10.0, "ab"), 10.0);
        assert_eq!(m.text_width(FontWeight::Regular, 10.0, "身份"), 20.0);
        assert_eq!(m.text_width(FontWeight::Bold, 10.0, "A身"), 15.0);
        assert_eq!(m.text_width(FontWeight::Regular, 10.0, ""), 0.0);
    }

    #[test]
    fn test_fixed_measure_zero_width() {
        let m = FixedMeasure::default();
        assert_eq!(m.text_width(FontWeight::Regular, 10.0, "e\u{301}"), 5.0);
    }

    #[test]
    fn test_fixed_measure_descent() {
        let m = FixedMeasure::default();
        assert_eq!(m.descent(FontWeight::Regular, 10.0), 2.0);
    }
}
