//! Table description, cell measurement and in-row splitting.

use super::wrap::wrap_text;
use crate::error::{Error, Result};
use crate::font::TextMeasure;
use crate::model::{palette, Color, ColumnLayout, StyleRole, StyleSpec, Stylesheet, COLUMN_COUNT};
use serde::Serialize;

/// A stroked line style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rule {
    pub width: f32,
    pub color: Color,
}

impl Rule {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Visual treatment of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStyle {
    /// Header row background
    pub header_background: Color,

    /// Background of shaded body rows
    pub alternate_background: Color,

    /// Cell grid
    pub grid: Rule,

    /// Accent line under the header row
    pub header_rule: Rule,

    /// Inner padding on all four sides of every cell
    pub padding: f32,
}

impl TableStyle {
    /// House style of the module report.
    pub fn brand() -> Self {
        Self {
            header_background: palette::HEADER_BG,
            alternate_background: palette::ROW_ALT,
            grid: Rule::new(0.5, palette::BORDER),
            header_rule: Rule::new(1.2, palette::BRAND_YELLOW),
            padding: 5.0,
        }
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self::brand()
    }
}

/// Body rows are shaded when their 1-based index is even; the header is
/// index 0 and never shaded.
pub fn is_shaded(row_index: usize) -> bool {
    row_index >= 2 && row_index % 2 == 0
}

/// Text of one cell and the style it is set in.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub text: String,
    pub role: StyleRole,
}

impl CellSpec {
    pub fn new(text: impl Into<String>, role: StyleRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

/// A four-column table with a repeating header.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: ColumnLayout,
    pub header: [CellSpec; COLUMN_COUNT],
    pub rows: Vec<[CellSpec; COLUMN_COUNT]>,
    pub style: TableStyle,
}

#[derive(Debug, Clone)]
pub(crate) struct MeasuredCell {
    pub lines: Vec<String>,
    pub style: StyleSpec,
}

/// A row with every cell already wrapped to its column.
#[derive(Debug, Clone)]
pub(crate) struct MeasuredRow {
    /// 0 for the header, 1-based for body rows
    pub index: usize,
    pub cells: [MeasuredCell; COLUMN_COUNT],
}

/// Number of lines consumed per cell.
pub(crate) type LineOffsets = [usize; COLUMN_COUNT];

impl MeasuredRow {
    fn measure<M: TextMeasure + ?Sized>(
        index: usize,
        cells: &[CellSpec; COLUMN_COUNT],
        columns: &ColumnLayout,
        padding: f32,
        styles: &Stylesheet,
        measure: &M,
    ) -> Result<Self> {
        let mut measured = Vec::with_capacity(COLUMN_COUNT);
        for (col, cell) in cells.iter().enumerate() {
            let inner = columns.width(col) - 2.0 * padding;
            if inner <= 0.0 {
                return Err(Error::InvalidLayout(format!(
                    "column {} is narrower than its padding",
                    col + 1
                )));
            }
            let style = styles.get(cell.role).clone();
            let lines = wrap_text(measure, style.weight, style.size, &cell.text, inner);
            measured.push(MeasuredCell { lines, style });
        }

        let cells: [MeasuredCell; COLUMN_COUNT] = measured
            .try_into()
            .map_err(|_| Error::InvalidLayout("cell count mismatch".to_string()))?;
        Ok(Self { index, cells })
    }

    /// Height of the part of the row not yet placed.
    pub fn remaining_height(&self, offsets: &LineOffsets, padding: f32) -> f32 {
        let content = self
            .cells
            .iter()
            .zip(offsets)
            .map(|(cell, &done)| cell.lines.len().saturating_sub(done) as f32 * cell.style.leading)
            .fold(0.0, f32::max);
        content + 2.0 * padding
    }

    /// Smallest fragment that still shows a line from some cell.
    pub fn min_fragment_height(&self, offsets: &LineOffsets, padding: f32) -> f32 {
        let first_line = self
            .cells
            .iter()
            .zip(offsets)
            .filter(|(cell, done)| cell.lines.len() > **done)
            .map(|(cell, _)| cell.style.leading)
            .fold(f32::INFINITY, f32::min);
        if first_line.is_finite() {
            first_line + 2.0 * padding
        } else {
            2.0 * padding
        }
    }

    /// Lines each cell can show in `content_height` points.
    pub fn lines_that_fit(&self, offsets: &LineOffsets, content_height: f32) -> LineOffsets {
        let mut take = [0; COLUMN_COUNT];
        if content_height <= 0.0 {
            return take;
        }
        for (col, cell) in self.cells.iter().enumerate() {
            let left = cell.lines.len().saturating_sub(offsets[col]);
            let fit = ((content_height + 1e-3) / cell.style.leading).floor() as usize;
            take[col] = left.min(fit);
        }
        take
    }

    /// Lines of each cell in `offsets..offsets + take`.
    pub fn slice(&self, offsets: &LineOffsets, take: &LineOffsets) -> [Vec<String>; COLUMN_COUNT] {
        std::array::from_fn(|col| {
            let lines = &self.cells[col].lines;
            let start = offsets[col].min(lines.len());
            let end = (offsets[col] + take[col]).min(lines.len());
            lines[start..end].to_vec()
        })
    }

    /// Lines each cell has left after `offsets`.
    pub fn remaining(&self, offsets: &LineOffsets) -> LineOffsets {
        std::array::from_fn(|col| self.cells[col].lines.len().saturating_sub(offsets[col]))
    }
}

/// Header and body rows, wrapped.
#[derive(Debug, Clone)]
pub(crate) struct MeasuredTable {
    pub header: MeasuredRow,
    pub rows: Vec<MeasuredRow>,
}

impl MeasuredTable {
    pub fn measure<M: TextMeasure + ?Sized>(
        table: &TableSpec,
        styles: &Stylesheet,
        measure: &M,
    ) -> Result<Self> {
        let padding = table.style.padding;
        let columns = &table.columns;
        let header = MeasuredRow::measure(0, &table.header, columns, padding, styles, measure)?;
        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, cells)| MeasuredRow::measure(i + 1, cells, columns, padding, styles, measure))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Measured table: {} rows, {} wrapped lines",
            rows.len(),
            rows.iter()
                .flat_map(|r| r.cells.iter())
                .map(|c| c.lines.len())
                .sum::<usize>()
        );

        Ok(Self { header, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMeasure;
    use crate::model::FIXED_COLUMN_WIDTHS;

    fn row(texts: [&str; 4]) -> MeasuredRow {
        let columns = ColumnLayout::fill_remaining(400.0, FIXED_COLUMN_WIDTHS).unwrap();
        let cells = texts.map(|t| CellSpec::new(t, StyleRole::Cell));
        MeasuredRow::measure(1, &cells, &columns, 5.0, &Stylesheet::brand(), &FixedMeasure::default())
            .unwrap()
    }

    #[test]
    fn test_shading_parity() {
        assert!(!is_shaded(0));
        assert!(!is_shaded(1));
        assert!(is_shaded(2));
        assert!(!is_shaded(3));
        assert!(is_shaded(22));
    }

    #[test]
    fn test_row_height_follows_tallest_cell() {
        let r = row(["M01", "身份", "v1", &"认证".repeat(40)]);
        let features = r.cells[3].lines.len();
        assert!(features > 1);

        let expected = features as f32 * 10.5 + 10.0;
        assert!((r.remaining_height(&[0; 4], 5.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_split_keeps_alignment() {
        let r = row(["M01", "身份", "v1", &"认证".repeat(40)]);
        let take = r.lines_that_fit(&[0; 4], 21.0);
        assert_eq!(take, [1, 1, 1, 2]);

        let slice = r.slice(&[0; 4], &take);
        assert_eq!(slice[0], vec!["M01"]);
        assert_eq!(slice[3].len(), 2);

        let rest = r.remaining(&take);
        assert_eq!(rest[..3], [0, 0, 0]);
        assert_eq!(rest[3], r.cells[3].lines.len() - 2);
    }

    #[test]
    fn test_min_fragment() {
        let r = row(["M01", "身份", "v1", "认证"]);
        assert!((r.min_fragment_height(&[0; 4], 5.0) - 20.5).abs() < 1e-3);
        assert!((r.min_fragment_height(&[1; 4], 5.0) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_column_rejected() {
        let columns = ColumnLayout::fill_remaining(400.0, [8.0, 72.0, 38.0]).unwrap();
        let cells = ["a", "b", "c", "d"].map(|t| CellSpec::new(t, StyleRole::Cell));
        let err = MeasuredRow::measure(1, &cells, &columns, 5.0, &Stylesheet::brand(), &FixedMeasure::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLayout(_)));
    }
}
