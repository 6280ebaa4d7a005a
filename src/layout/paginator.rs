//! Places blocks on pages.

use super::table::{is_shaded, LineOffsets, MeasuredRow, MeasuredTable, TableSpec, TableStyle};
use super::wrap::wrap_text;
use super::{Block, DrawOp, LaidOutDocument, LaidOutPage, PlacedRow};
use crate::error::{Error, Result};
use crate::font::TextMeasure;
use crate::model::{Color, ColumnLayout, PageSetup, StyleSpec, Stylesheet, COLUMN_COUNT};

const EPSILON: f32 = 1e-3;

/// Flows blocks top to bottom inside the page frame, breaking pages as
/// needed.
///
/// Table headers are repeated at the top of every page a table spans, and a
/// row taller than the space left on a page is split between lines with
/// each fragment keeping the row's column alignment and background.
pub struct Paginator<'a, M: ?Sized> {
    setup: PageSetup,
    styles: &'a Stylesheet,
    measure: &'a M,
}

struct Cursor {
    pages: Vec<LaidOutPage>,
    current: LaidOutPage,
    y: f32,
    top: f32,
}

impl Cursor {
    fn new(top: f32) -> Self {
        Self {
            pages: Vec::new(),
            current: LaidOutPage::new(1),
            y: top,
            top,
        }
    }

    fn is_fresh(&self) -> bool {
        self.current.ops.is_empty()
    }

    fn new_page(&mut self) {
        let next = LaidOutPage::new(self.current.number + 1);
        let done = std::mem::replace(&mut self.current, next);
        log::debug!("Page {} closed with {} ops", done.number, done.ops.len());
        self.pages.push(done);
        self.y = self.top;
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

impl<'a, M: TextMeasure + ?Sized> Paginator<'a, M> {
    pub fn new(setup: PageSetup, styles: &'a Stylesheet, measure: &'a M) -> Self {
        Self {
            setup,
            styles,
            measure,
        }
    }

    fn left(&self) -> f32 {
        self.setup.margins.left
    }

    fn bottom(&self) -> f32 {
        self.setup.frame_bottom()
    }

    /// Lay out `blocks` in order.
    pub fn paginate(&self, blocks: &[Block]) -> Result<LaidOutDocument> {
        if self.setup.usable_width() <= 0.0 || self.setup.usable_height() <= 0.0 {
            return Err(Error::InvalidLayout(
                "page margins leave no room for content".to_string(),
            ));
        }

        let mut cursor = Cursor::new(self.setup.margins.top);
        for block in blocks {
            match block {
                Block::Paragraph { text, role } => {
                    self.place_paragraph(&mut cursor, text, self.styles.get(*role))?
                }
                Block::Spacer(height) => self.place_spacer(&mut cursor, *height),
                Block::Table(table) => self.place_table(&mut cursor, table)?,
            }
        }

        let pages = cursor.finish();
        log::debug!("Laid out {} pages", pages.len());
        Ok(LaidOutDocument {
            page_setup: self.setup,
            pages,
        })
    }

    fn baseline(&self, line_top: f32, style: &StyleSpec) -> f32 {
        let descent = self.measure.descent(style.weight, style.size);
        line_top + (style.leading + style.size) / 2.0 - descent
    }

    fn text_op(&self, x: f32, line_top: f32, style: &StyleSpec, text: &str) -> DrawOp {
        DrawOp::Text {
            x,
            baseline: self.baseline(line_top, style),
            weight: style.weight,
            size: style.size,
            color: style.color,
            text: text.to_string(),
        }
    }

    fn place_paragraph(&self, cursor: &mut Cursor, text: &str, style: &StyleSpec) -> Result<()> {
        if style.leading > self.setup.usable_height() {
            return Err(Error::InvalidLayout(format!(
                "{} leading {}pt exceeds the page frame",
                style.name, style.leading
            )));
        }

        let lines = wrap_text(
            self.measure,
            style.weight,
            style.size,
            text,
            self.setup.usable_width(),
        );
        for line in &lines {
            if cursor.y + style.leading > self.bottom() + EPSILON && !cursor.is_fresh() {
                cursor.new_page();
            }
            let op = self.text_op(self.left(), cursor.y, style, line);
            cursor.current.ops.push(op);
            cursor.y += style.leading;
        }
        cursor.y += style.space_after;
        Ok(())
    }

    fn place_spacer(&self, cursor: &mut Cursor, height: f32) {
        if cursor.y + height > self.bottom() + EPSILON {
            // A gap that does not fit ends the page and is dropped.
            if !cursor.is_fresh() {
                cursor.new_page();
            }
        } else {
            cursor.y += height;
        }
    }

    fn place_table(&self, cursor: &mut Cursor, table: &TableSpec) -> Result<()> {
        let measured = MeasuredTable::measure(table, self.styles, self.measure)?;
        let padding = table.style.padding;
        let header_height = measured.header.remaining_height(&[0; COLUMN_COUNT], padding);

        let mut segment = TableSegment::closed();
        for row in &measured.rows {
            let mut offsets: LineOffsets = [0; COLUMN_COUNT];
            let mut continued = false;

            loop {
                if !segment.open {
                    let needed = header_height + row.min_fragment_height(&offsets, padding);
                    if cursor.y + needed > self.bottom() + EPSILON && !cursor.is_fresh() {
                        cursor.new_page();
                    }
                    segment = TableSegment::open();
                    let start = [0; COLUMN_COUNT];
                    let full = measured.header.remaining(&start);
                    self.place_row(
                        cursor,
                        table,
                        &measured.header,
                        &start,
                        &full,
                        &mut segment,
                        false,
                        false,
                    );
                }

                let remaining = row.remaining_height(&offsets, padding);
                let available = self.bottom() - cursor.y;
                if remaining <= available + EPSILON {
                    let rest = row.remaining(&offsets);
                    self.place_row(
                        cursor,
                        table,
                        row,
                        &offsets,
                        &rest,
                        &mut segment,
                        continued,
                        false,
                    );
                    break;
                }

                let take = row.lines_that_fit(&offsets, available - 2.0 * padding);
                if take.iter().any(|&n| n > 0) {
                    self.place_row(
                        cursor,
                        table,
                        row,
                        &offsets,
                        &take,
                        &mut segment,
                        continued,
                        true,
                    );
                    for (offset, taken) in offsets.iter_mut().zip(take) {
                        *offset += taken;
                    }
                    continued = true;
                    log::debug!("Row {} split at page {}", row.index, cursor.current.number);
                } else if segment.body_rows == 0 {
                    return Err(Error::InvalidLayout(format!(
                        "table row {} cannot fit a single line on an empty page",
                        row.index
                    )));
                }

                cursor.new_page();
                segment = TableSegment::closed();
            }
        }

        Ok(())
    }

    /// Emit one row fragment showing `take` lines per cell from `offsets`.
    #[allow(clippy::too_many_arguments)]
    fn place_row(
        &self,
        cursor: &mut Cursor,
        table: &TableSpec,
        row: &MeasuredRow,
        offsets: &LineOffsets,
        take: &LineOffsets,
        segment: &mut TableSegment,
        continued: bool,
        continues: bool,
    ) {
        let style = &table.style;
        let columns = &table.columns;
        let padding = style.padding;
        let x0 = self.left();
        let top = cursor.y;

        let content = row
            .cells
            .iter()
            .zip(take)
            .map(|(cell, &n)| n as f32 * cell.style.leading)
            .fold(0.0, f32::max);
        let height = if continues {
            // A fragment that breaks the page runs to the frame bottom.
            (self.bottom() - top).max(content + 2.0 * padding)
        } else {
            content + 2.0 * padding
        };

        let placed = PlacedRow {
            index: row.index,
            top,
            height,
            shaded: is_shaded(row.index),
            continued,
            continues,
            cells: row.slice(offsets, take),
        };

        let ops = &mut cursor.current.ops;
        if placed.is_header() {
            ops.push(fill(x0, top, columns.total(), height, style.header_background));
        } else if placed.shaded {
            ops.push(fill(x0, top, columns.total(), height, style.alternate_background));
        }

        let xs = columns.offsets();
        for (col, cell) in row.cells.iter().enumerate() {
            for (n, line) in placed.cells[col].iter().enumerate() {
                let line_top = top + padding + n as f32 * cell.style.leading;
                ops.push(self.text_op(x0 + xs[col] + padding, line_top, &cell.style, line));
            }
        }

        grid(ops, x0, top, height, columns, style, !segment.has_rows());
        if placed.is_header() {
            let rule = style.header_rule;
            ops.push(DrawOp::Line {
                x1: x0,
                y1: top + height,
                x2: x0 + columns.total(),
                y2: top + height,
                width: rule.width,
                color: rule.color,
            });
        } else {
            segment.body_rows += 1;
        }
        segment.rows += 1;

        cursor.y = top + height;
        cursor.current.rows.push(placed);
    }
}

struct TableSegment {
    open: bool,
    rows: usize,
    body_rows: usize,
}

impl TableSegment {
    fn open() -> Self {
        Self {
            open: true,
            rows: 0,
            body_rows: 0,
        }
    }

    fn closed() -> Self {
        Self {
            open: false,
            rows: 0,
            body_rows: 0,
        }
    }

    fn has_rows(&self) -> bool {
        self.rows > 0
    }
}

fn fill(x: f32, y: f32, width: f32, height: f32, color: Color) -> DrawOp {
    DrawOp::FillRect {
        x,
        y,
        width,
        height,
        color,
    }
}

/// Grid lines around one row: top edge only for the first row of a page,
/// then the bottom edge and every column boundary.
fn grid(
    ops: &mut Vec<DrawOp>,
    x0: f32,
    top: f32,
    height: f32,
    columns: &ColumnLayout,
    style: &TableStyle,
    first: bool,
) {
    let rule = style.grid;
    let right = x0 + columns.total();
    let line = |x1, y1, x2, y2| DrawOp::Line {
        x1,
        y1,
        x2,
        y2,
        width: rule.width,
        color: rule.color,
    };

    if first {
        ops.push(line(x0, top, right, top));
    }
    ops.push(line(x0, top + height, right, top + height));
    for x in columns.offsets().iter().map(|o| x0 + o).chain([right]) {
        ops.push(line(x, top, x, top + height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FixedMeasure;
    use crate::layout::CellSpec;
    use crate::model::{mm, Margins, PageSize, StyleRole, FIXED_COLUMN_WIDTHS};

    fn table(rows: usize, features: &str) -> TableSpec {
        let setup = PageSetup::default();
        TableSpec {
            columns: ColumnLayout::fill_remaining(setup.usable_width(), FIXED_COLUMN_WIDTHS).unwrap(),
            header: ["编号", "模块", "状态", "功能清单"].map(|t| CellSpec::new(t, StyleRole::Header)),
            rows: (1..=rows)
                .map(|i| {
                    [
                        CellSpec::new(format!("M{:02}", i), StyleRole::CellBold),
                        CellSpec::new("模块", StyleRole::CellBold),
                        CellSpec::new("v1 完成", StyleRole::Status),
                        CellSpec::new(features, StyleRole::Cell),
                    ]
                })
                .collect(),
            style: TableStyle::brand(),
        }
    }

    fn paginate(blocks: &[Block]) -> Result<LaidOutDocument> {
        let styles = Stylesheet::brand();
        let measure = FixedMeasure::default();
        Paginator::new(PageSetup::default(), &styles, &measure).paginate(blocks)
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let doc = paginate(&[]).unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_title_starts_at_top_margin() {
        let doc = paginate(&[Block::paragraph("核心业务模块功能清单", StyleRole::Title)]).unwrap();
        match &doc.pages[0].ops[0] {
            DrawOp::Text { x, baseline, size, .. } => {
                assert!((x - mm(18.0)).abs() < 1e-3);
                assert!(*baseline > mm(20.0) && *baseline < mm(20.0) + 26.0);
                assert_eq!(*size, 20.0);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_header_repeats_on_every_page() {
        let doc = paginate(&[Block::Table(table(60, "功能"))]).unwrap();
        assert!(doc.page_count() > 1);

        for page in &doc.pages {
            let first = &page.rows[0];
            assert!(first.is_header(), "page {} lacks header", page.number);
            assert!((first.top - mm(20.0)).abs() < 1e-3);
            assert_eq!(first.cell_text(3), "功能清单");
            assert_eq!(page.rows.iter().filter(|r| r.is_header()).count(), 1);
        }
        assert_eq!(doc.row_order(), (1..=60).collect::<Vec<_>>());
    }

    #[test]
    fn test_rows_stay_inside_frame() {
        let doc = paginate(&[Block::Table(table(60, "功能"))]).unwrap();
        let bottom = PageSetup::default().frame_bottom();
        for page in &doc.pages {
            for pair in page.rows.windows(2) {
                assert!((pair[0].bottom() - pair[1].top).abs() < 1e-3);
            }
            for row in &page.rows {
                assert!(row.bottom() <= bottom + 1e-3);
            }
        }
    }

    #[test]
    fn test_tall_row_split_in_row() {
        let features = "认证、".repeat(2000);
        let doc = paginate(&[Block::Table(table(2, &features))]).unwrap();
        assert!(doc.page_count() > 1);
        assert!(doc.split_rows() >= 1);

        let first = doc.pages[0].body_rows().next().unwrap();
        assert_eq!(first.index, 1);
        assert!(first.continues);
        assert_eq!(first.cell_text(0), "M01");

        let next = doc.pages[1].body_rows().next().unwrap();
        assert_eq!(next.index, 1);
        assert!(next.continued);
        assert!(next.cells[0].is_empty());
        assert!(doc.pages[1].rows[0].is_header());

        let total: String = doc
            .pages
            .iter()
            .flat_map(|p| p.body_rows())
            .filter(|r| r.index == 1)
            .map(|r| r.cells[3].concat())
            .collect();
        assert_eq!(total, features.trim_end());
    }

    #[test]
    fn test_split_fragments_keep_shading() {
        let features = "认证、".repeat(2000);
        let doc = paginate(&[Block::Table(table(2, &features))]).unwrap();
        for row in doc.pages.iter().flat_map(|p| p.body_rows()) {
            assert_eq!(row.shaded, row.index == 2);
        }
    }

    #[test]
    fn test_header_never_orphaned() {
        // Title takes 26 + 4 points; leave 30 points below the spacer,
        // enough for the 21 point header but not for a first body row.
        let setup = PageSetup::default();
        let gap = setup.frame_bottom() - setup.margins.top - 30.0 - 30.0;
        let blocks = [
            Block::paragraph("Title", StyleRole::Title),
            Block::Spacer(gap),
            Block::Table(table(3, "功能")),
        ];

        let doc = paginate(&blocks).unwrap();
        assert!(doc.pages[0].rows.is_empty());
        assert!(doc.pages[1].rows[0].is_header());
        assert_eq!(doc.pages[1].rows[1].index, 1);
        for page in &doc.pages {
            if let Some(last) = page.rows.last() {
                assert!(!last.is_header(), "header orphaned on page {}", page.number);
            }
        }
    }

    #[test]
    fn test_page_too_small_fails() {
        let setup = PageSetup::new(
            PageSize::Custom {
                width: 400.0,
                height: 60.0,
            },
            Margins::uniform(10.0),
        );
        let styles = Stylesheet::brand();
        let measure = FixedMeasure::default();
        let result = Paginator::new(setup, &styles, &measure).paginate(&[Block::Table(TableSpec {
            columns: ColumnLayout::fill_remaining(setup.usable_width(), FIXED_COLUMN_WIDTHS).unwrap(),
            ..table(1, "功能")
        })]);
        assert!(matches!(result, Err(Error::InvalidLayout(_))));
    }

    #[test]
    fn test_header_styling() {
        use crate::model::{palette, FontWeight};

        let doc = paginate(&[Block::Table(table(3, "功能"))]).unwrap();
        let page = &doc.pages[0];
        let header = &page.rows[0];

        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::FillRect { y, color, .. } if *y == header.top && *color == palette::HEADER_BG
        )));
        assert!(page.ops.iter().any(|op| matches!(
            op,
            DrawOp::Line { y1, width, color, .. }
                if *y1 == header.bottom() && *width == 1.2 && *color == palette::BRAND_YELLOW
        )));

        let header_text: Vec<_> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    baseline,
                    weight,
                    color,
                    ..
                } if *baseline < header.bottom() => Some((*weight, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(header_text.len(), 4);
        assert!(header_text
            .iter()
            .all(|(weight, color)| *weight == FontWeight::Bold && *color == palette::WHITE));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let blocks = [Block::Table(table(30, "登录/注册、角色权限矩阵"))];
        assert_eq!(paginate(&blocks).unwrap(), paginate(&blocks).unwrap());
    }
}
