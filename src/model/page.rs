//! Page geometry.

use serde::{Deserialize, Serialize};

/// Points per millimetre (1 pt = 1/72 inch).
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_MM
}

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    /// A4 (210mm x 297mm)
    A4,
    /// US Letter (8.5" x 11")
    Letter,
    /// Custom size in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Get the portrait width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (mm(210.0), mm(297.0)),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// The same margin on every side.
    pub fn uniform(points: f32) -> Self {
        Self {
            top: points,
            right: points,
            bottom: points,
            left: points,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: mm(20.0),
            right: mm(18.0),
            bottom: mm(18.0),
            left: mm(18.0),
        }
    }
}

/// Page size plus margins.
///
/// This is the single source of truth for the frame every flow element is
/// placed in; table column widths are derived from [`PageSetup::usable_width`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page size
    pub size: PageSize,

    /// Page margins
    pub margins: Margins,
}

impl PageSetup {
    /// Create a page setup.
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.size.dimensions().0
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.size.dimensions().1
    }

    /// Width between the left and right margins.
    pub fn usable_width(&self) -> f32 {
        self.width() - self.margins.left - self.margins.right
    }

    /// Height between the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.height() - self.margins.top - self.margins.bottom
    }

    /// Y coordinate (from the page top) where the frame ends.
    pub fn frame_bottom(&self) -> f32 {
        self.height() - self.margins.bottom
    }
}
