//! Pagination properties of the catalog report, measured with fixed
//! advances so no font file is needed.

use posreport::catalog::{catalog_date, default_meta, module_rows, STATUS_LABEL};
use posreport::font::FixedMeasure;
use posreport::layout::{is_shaded, DrawOp};
use posreport::model::{mm, ColumnLayout, Margins, PageSetup, PageSize, FIXED_COLUMN_WIDTHS};
use posreport::{layout_report, LaidOutDocument, ModuleRow, ReportOptions};

fn catalog_layout(options: &ReportOptions) -> LaidOutDocument {
    let rows = module_rows();
    let meta = default_meta(rows.len(), catalog_date());
    layout_report(options, &rows, &meta, &FixedMeasure::default()).unwrap()
}

#[test]
fn test_catalog_footer_opens_second_page() {
    let doc = catalog_layout(&ReportOptions::default());
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.row_order(), (1..=22).collect::<Vec<_>>());

    // the table fits on page 1, the gap before the footer does not
    assert_eq!(doc.pages[0].body_rows().count(), 22);
    assert_eq!(doc.split_rows(), 0);
    assert!(doc.pages[1].rows.is_empty());
    let footer: String = doc.pages[1].text_lines().collect();
    assert!(footer.starts_with("技术架构"));
}

#[test]
fn test_first_and_last_rows() {
    let doc = catalog_layout(&ReportOptions::default());
    let rows = module_rows();

    let first = doc.pages[0].body_rows().next().unwrap();
    assert_eq!(first.index, 1);
    assert_eq!(first.cell_text(0), "M01");
    assert_eq!(first.cell_text(1), "身份与权限");
    assert_eq!(first.cell_text(2), STATUS_LABEL);

    let features: String = doc
        .pages
        .iter()
        .flat_map(|p| p.body_rows())
        .filter(|r| r.index == 1)
        .flat_map(|r| r.cells[3].clone())
        .collect();
    let expected: String = rows[0].features.split_whitespace().collect();
    let actual: String = features.split_whitespace().collect();
    assert_eq!(actual, expected);

    let last = doc.pages.iter().flat_map(|p| p.body_rows()).last().unwrap();
    assert_eq!(last.index, 22);
    let code = doc
        .pages
        .iter()
        .flat_map(|p| p.body_rows())
        .find(|r| r.index == 22)
        .map(|r| r.cell_text(0))
        .unwrap();
    assert_eq!(code, "M22");
}

/// The catalog twice over, so the table itself needs several pages.
fn long_catalog() -> LaidOutDocument {
    let mut rows = module_rows();
    let extra: Vec<ModuleRow> = module_rows()
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            row.code = format!("M{:02}", i + 23);
            row
        })
        .collect();
    rows.extend(extra);
    let meta = default_meta(rows.len(), catalog_date());
    layout_report(&ReportOptions::default(), &rows, &meta, &FixedMeasure::default()).unwrap()
}

#[test]
fn test_header_on_every_page() {
    let doc = long_catalog();
    let table_pages: Vec<_> = doc.pages.iter().filter(|p| !p.rows.is_empty()).collect();
    assert!(table_pages.len() > 1);

    let reference = &table_pages[0].rows[0];
    for page in &table_pages {
        let header = &page.rows[0];
        assert!(header.is_header(), "page {} does not start with the header", page.number);
        assert_eq!(header.cells, reference.cells);
        assert!((header.height - reference.height).abs() < 1e-3);
    }

    // every page after the first starts its table at the top margin
    for page in &table_pages[1..] {
        assert!((page.rows[0].top - mm(20.0)).abs() < 1e-3);
    }
}

#[test]
fn test_zebra_shading() {
    let doc = long_catalog();
    for row in doc.pages.iter().flat_map(|p| p.rows.iter()) {
        assert_eq!(row.shaded, is_shaded(row.index));
        assert_eq!(row.shaded, row.index >= 2 && row.index % 2 == 0);
    }
}

#[test]
fn test_rows_do_not_overlap() {
    let doc = long_catalog();
    let bottom = doc.page_setup.frame_bottom();

    for page in &doc.pages {
        for pair in page.rows.windows(2) {
            assert!(pair[0].bottom() <= pair[1].top + 1e-3);
        }
        for row in &page.rows {
            assert!(row.bottom() <= bottom + 1e-3);
            assert!(row.top >= doc.page_setup.margins.top - 1e-3);
        }
    }
}

#[test]
fn test_text_stays_inside_cells() {
    let doc = catalog_layout(&ReportOptions::default());
    let measure = FixedMeasure::default();
    let setup = doc.page_setup;

    for page in &doc.pages {
        for op in &page.ops {
            if let DrawOp::Text {
                x,
                baseline,
                size,
                text,
                weight,
                ..
            } = op
            {
                use posreport::font::TextMeasure;
                let width = measure.text_width(*weight, *size, text);
                assert!(x + width <= setup.width() - setup.margins.right + 1e-2, "{text} overflows");
                assert!(*baseline <= setup.frame_bottom());
            }
        }
    }
}

#[test]
fn test_long_features_wrap_and_grow_row() {
    let mut rows = module_rows();
    rows[2].features = "订单创建/编辑/结算、".repeat(30);
    let meta = default_meta(rows.len(), catalog_date());
    let doc = layout_report(&ReportOptions::default(), &rows, &meta, &FixedMeasure::default()).unwrap();

    let fragments: Vec<_> = doc
        .pages
        .iter()
        .flat_map(|p| p.body_rows())
        .filter(|r| r.index == 3)
        .collect();
    let lines: usize = fragments.iter().map(|r| r.cells[3].len()).sum();
    assert!(lines > 3);

    let total_height: f32 = fragments.iter().map(|r| r.height).sum();
    assert!(total_height >= lines as f32 * 10.5);

    let joined: String = fragments.iter().flat_map(|r| r.cells[3].clone()).collect();
    assert_eq!(joined, rows[2].features.trim_end());
}

#[test]
fn test_split_row_keeps_alignment() {
    let mut rows = module_rows();
    rows[0].features = "角色权限矩阵、".repeat(800);
    let meta = default_meta(rows.len(), catalog_date());
    let doc = layout_report(&ReportOptions::default(), &rows, &meta, &FixedMeasure::default()).unwrap();

    assert!(doc.split_rows() >= 1);
    let fragments: Vec<_> = doc
        .pages
        .iter()
        .flat_map(|p| p.body_rows())
        .filter(|r| r.index == 1)
        .collect();
    assert!(fragments.len() > 1);

    assert_eq!(fragments[0].cell_text(0), "M01");
    for fragment in &fragments[1..] {
        assert!(fragment.continued);
        assert!(fragment.cells[0].is_empty());
        assert!(!fragment.cells[3].is_empty());
    }
    assert!(!fragments.last().unwrap().continues);
}

#[test]
fn test_columns_fill_usable_width_for_any_page() {
    let setups = [
        PageSetup::default(),
        PageSetup::new(PageSize::Letter, Margins::uniform(mm(25.0))),
        PageSetup::new(
            PageSize::Custom {
                width: 420.0,
                height: 595.0,
            },
            Margins::default(),
        ),
    ];
    for setup in setups {
        let columns = ColumnLayout::fill_remaining(setup.usable_width(), FIXED_COLUMN_WIDTHS).unwrap();
        assert!((columns.total() - setup.usable_width()).abs() < 1e-3);

        let doc = catalog_layout(&ReportOptions::new().with_page_setup(setup));
        assert_eq!(doc.row_order(), (1..=22).collect::<Vec<_>>());
    }
}

#[test]
fn test_layout_is_deterministic() {
    let options = ReportOptions::default();
    assert_eq!(catalog_layout(&options), catalog_layout(&options));
}

#[test]
fn test_fixture_rows_substitute_for_catalog() {
    let rows = vec![
        ModuleRow::new("X1", "Alpha", "done", "first"),
        ModuleRow::new("X2", "Beta", "done", "second"),
    ];
    let meta = default_meta(rows.len(), catalog_date());
    let doc = layout_report(&ReportOptions::default(), &rows, &meta, &FixedMeasure::default()).unwrap();

    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.row_order(), vec![1, 2]);
    assert!(doc.pages[0].text_lines().any(|t| t == "first"));
    assert!(doc.pages[0].text_lines().any(|t| t.contains("共 2 个模块")));
}
