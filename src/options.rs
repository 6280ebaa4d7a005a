//! Report configuration.

use crate::layout::TableStyle;
use crate::model::{mm, PageSetup, Stylesheet, COLUMN_COUNT, FIXED_COLUMN_WIDTHS};
use crate::render::RenderOptions;

/// Options controlling page geometry, styling and output.
///
/// `Default` gives the branded module report: A4 portrait, the house
/// stylesheet and palette, and the original column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Page size and margins
    pub page_setup: PageSetup,

    /// Text style per role
    pub stylesheet: Stylesheet,

    /// Widths of the code, name and status columns in points; the feature
    /// column takes the rest
    pub fixed_columns: [f32; COLUMN_COUNT - 1],

    /// Table colors, rules and padding
    pub table_style: TableStyle,

    /// Gap between the subtitle and the table, in points
    pub space_before_table: f32,

    /// Gap between the table and the footer, in points
    pub space_after_table: f32,

    /// PDF writer options
    pub render: RenderOptions,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page setup.
    pub fn with_page_setup(mut self, setup: PageSetup) -> Self {
        self.page_setup = setup;
        self
    }

    /// Set the stylesheet.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the fixed column widths.
    pub fn with_fixed_columns(mut self, widths: [f32; COLUMN_COUNT - 1]) -> Self {
        self.fixed_columns = widths;
        self
    }

    /// Set the table style.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_style = style;
        self
    }

    /// Set the gaps before and after the table.
    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before_table = before;
        self.space_after_table = after;
        self
    }

    /// Set the PDF writer options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            page_setup: PageSetup::default(),
            stylesheet: Stylesheet::brand(),
            fixed_columns: FIXED_COLUMN_WIDTHS,
            table_style: TableStyle::brand(),
            space_before_table: mm(4.0),
            space_after_table: mm(6.0),
            render: RenderOptions::default(),
        }
    }
}
