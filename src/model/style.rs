//! Colors, font weights and per-role text styles.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) literal.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Channels scaled to `0.0..=1.0`, as PDF color operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Brand palette.
pub mod palette {
    use super::Color;

    /// Body text and title color.
    pub const BRAND_DARK: Color = Color::rgb(0x1a, 0x1a, 0x1a);
    /// Accent line under the table header.
    pub const BRAND_YELLOW: Color = Color::rgb(0xF6, 0xB1, 0x00);
    /// Header row background.
    pub const HEADER_BG: Color = Color::rgb(0x26, 0x26, 0x26);
    /// Background of even body rows.
    pub const ROW_ALT: Color = Color::rgb(0xF8, 0xF8, 0xF8);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Grid lines.
    pub const BORDER: Color = Color::rgb(0xCC, 0xCC, 0xCC);
    pub const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
    pub const STATUS_GREEN: Color = Color::rgb(0x16, 0xa3, 0x4a);
    pub const FOOTER_GREY: Color = Color::rgb(0x99, 0x99, 0x99);
}

/// Font weight a style asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    Regular,
    /// Bold weight
    Bold,
}

impl FontWeight {
    /// All weights a report uses.
    pub const ALL: [FontWeight; 2] = [FontWeight::Regular, FontWeight::Bold];
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Regular => write!(f, "regular"),
            FontWeight::Bold => write!(f, "bold"),
        }
    }
}

/// The role a piece of text plays in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRole {
    Title,
    Subtitle,
    /// Header row cells
    Header,
    /// Body cells with plain weight
    Cell,
    /// Body cells with bold weight (code and name)
    CellBold,
    /// Status column
    Status,
    Footer,
}

/// Text-rendering attributes applied to one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    /// Style name
    pub name: String,

    /// Font weight
    pub weight: FontWeight,

    /// Font size in points
    pub size: f32,

    /// Line height in points
    pub leading: f32,

    /// Text color
    pub color: Color,

    /// Vertical space after a paragraph in points
    pub space_after: f32,
}

impl StyleSpec {
    /// Create a style with no trailing space.
    pub fn new(
        name: impl Into<String>,
        weight: FontWeight,
        size: f32,
        leading: f32,
        color: Color,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            size,
            leading,
            color,
            space_after: 0.0,
        }
    }

    /// Set the space after and return self.
    pub fn space_after(mut self, points: f32) -> Self {
        self.space_after = points;
        self
    }
}

/// One style per role, defined once per document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub title: StyleSpec,
    pub subtitle: StyleSpec,
    pub header: StyleSpec,
    pub cell: StyleSpec,
    pub cell_bold: StyleSpec,
    pub status: StyleSpec,
    pub footer: StyleSpec,
}

impl Stylesheet {
    /// The branded stylesheet of the module feature report.
    pub fn brand() -> Self {
        use palette::*;

        Self {
            title: StyleSpec::new("Title", FontWeight::Bold, 20.0, 26.0, BRAND_DARK)
                .space_after(4.0),
            subtitle: StyleSpec::new("Subtitle", FontWeight::Regular, 10.0, 14.0, MUTED)
                .space_after(16.0),
            header: StyleSpec::new("Header", FontWeight::Bold, 8.0, 11.0, WHITE),
            cell: StyleSpec::new("Cell", FontWeight::Regular, 7.5, 10.5, BRAND_DARK),
            cell_bold: StyleSpec::new("CellBold", FontWeight::Bold, 7.5, 10.5, BRAND_DARK),
            status: StyleSpec::new("Status", FontWeight::Regular, 7.5, 10.5, STATUS_GREEN),
            footer: StyleSpec::new("Footer", FontWeight::Regular, 7.0, 9.0, FOOTER_GREY),
        }
    }

    /// Look up the style of a role.
    pub fn get(&self, role: StyleRole) -> &StyleSpec {
        match role {
            StyleRole::Title => &self.title,
            StyleRole::Subtitle => &self.subtitle,
            StyleRole::Header => &self.header,
            StyleRole::Cell => &self.cell,
            StyleRole::CellBold => &self.cell_bold,
            StyleRole::Status => &self.status,
            StyleRole::Footer => &self.footer,
        }
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::brand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#F6B100").unwrap(), palette::BRAND_YELLOW);
        assert_eq!(Color::from_hex("16a34a").unwrap(), palette::STATUS_GREEN);
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_color_display_round_trip() {
        let color = palette::HEADER_BG;
        assert_eq!(color.to_string(), "#262626");
        assert_eq!(Color::from_hex(&color.to_string()).unwrap(), color);
    }

    #[test]
    fn test_color_to_unit() {
        assert_eq!(palette::WHITE.to_unit(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0, 0, 0).to_unit(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_brand_stylesheet() {
        let styles = Stylesheet::brand();

        assert_eq!(styles.get(StyleRole::Header).weight, FontWeight::Bold);
        assert_eq!(styles.get(StyleRole::Header).color, palette::WHITE);
        assert_eq!(styles.get(StyleRole::Subtitle).space_after, 16.0);
        assert_eq!(styles.get(StyleRole::Status).color, palette::STATUS_GREEN);
        assert!(styles.get(StyleRole::Subtitle).size < styles.get(StyleRole::Title).size);
    }
}
