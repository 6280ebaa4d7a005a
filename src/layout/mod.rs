//! Flow layout: wrapping, pagination and the display list.
//!
//! Layout turns a sequence of [`Block`]s into positioned [`DrawOp`]s, one
//! list per page. Coordinates are in points measured from the top-left page
//! corner; the PDF writer flips them. The result also records where every
//! table row fragment landed so callers can inspect pagination without
//! parsing the PDF.

mod paginator;
mod table;
mod wrap;

pub use paginator::Paginator;
pub use table::{is_shaded, CellSpec, Rule, TableSpec, TableStyle};
pub use wrap::wrap_text;

use crate::model::{Color, FontWeight, PageSetup, StyleRole, COLUMN_COUNT};
use serde::Serialize;

/// A flow element.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Wrapped text set in one style
    Paragraph { text: String, role: StyleRole },
    /// Fixed vertical gap in points
    Spacer(f32),
    /// Table with a header repeated on every page it spans
    Table(TableSpec),
}

impl Block {
    pub fn paragraph(text: impl Into<String>, role: StyleRole) -> Self {
        Block::Paragraph {
            text: text.into(),
            role,
        }
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Filled rectangle; `y` is the top edge
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Stroked straight line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// A single line of text starting at `x` on `baseline`
    Text {
        x: f32,
        baseline: f32,
        weight: FontWeight,
        size: f32,
        color: Color,
        text: String,
    },
}

/// Where a table row, or a fragment of one, was placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRow {
    /// 0 for the header row, 1-based for body rows
    pub index: usize,

    /// Top edge, from the page top
    pub top: f32,

    pub height: f32,

    /// Painted with the alternate background
    pub shaded: bool,

    /// The row started on an earlier page
    pub continued: bool,

    /// The row goes on on the next page
    pub continues: bool,

    /// Lines shown in each cell
    pub cells: [Vec<String>; COLUMN_COUNT],
}

impl PlacedRow {
    pub fn is_header(&self) -> bool {
        self.index == 0
    }

    /// Text shown in a cell, lines joined with `\n`.
    pub fn cell_text(&self, column: usize) -> String {
        self.cells[column].join("\n")
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutPage {
    /// 1-based page number
    pub number: usize,

    /// Drawing operations in paint order
    pub ops: Vec<DrawOp>,

    /// Table rows placed on this page, top to bottom
    pub rows: Vec<PlacedRow>,
}

impl LaidOutPage {
    pub(crate) fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Body rows (header excluded).
    pub fn body_rows(&self) -> impl Iterator<Item = &PlacedRow> {
        self.rows.iter().filter(|r| !r.is_header())
    }

    /// Text ops in paint order.
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// The complete paginated document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutDocument {
    pub page_setup: PageSetup,
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Distinct body row indices in reading order.
    pub fn row_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = Vec::new();
        for row in self.pages.iter().flat_map(|p| p.body_rows()) {
            if order.last() != Some(&row.index) {
                order.push(row.index);
            }
        }
        order
    }

    /// Number of rows that were split across a page boundary.
    pub fn split_rows(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.body_rows())
            .filter(|r| r.continues)
            .count()
    }
}
