//! The report builder: rows and texts in, PDF file out.

use crate::error::Result;
use crate::font::{FontRegistry, Shaper, TextMeasure};
use crate::layout::{Block, CellSpec, LaidOutDocument, Paginator, TableSpec};
use crate::model::{prepare_rows, ColumnLayout, DocumentMeta, ModuleRow, StyleRole};
use crate::options::ReportOptions;
use crate::render::PdfRenderer;
use std::fs;
use std::path::{Path, PathBuf};

/// Cell roles of a body row, left to right.
const BODY_ROLES: [StyleRole; 4] = [
    StyleRole::CellBold,
    StyleRole::CellBold,
    StyleRole::Status,
    StyleRole::Cell,
];

/// Builds module reports against a loaded font registry.
///
/// The registry is only borrowed; each call creates its own shaping faces,
/// layout state and PDF object graph.
pub struct ReportBuilder<'r> {
    registry: &'r FontRegistry,
    options: ReportOptions,
}

impl<'r> ReportBuilder<'r> {
    /// Create a builder with the branded defaults.
    pub fn new(registry: &'r FontRegistry) -> Self {
        Self {
            registry,
            options: ReportOptions::default(),
        }
    }

    /// Set report options.
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Write the report to `output_path` and return the path.
    ///
    /// The document is fully rendered in memory first, so nothing is
    /// written when rows, fonts or layout are rejected. The parent
    /// directory is created if needed and an existing file is replaced.
    pub fn build(
        &self,
        output_path: impl AsRef<Path>,
        rows: &[ModuleRow],
        meta: &DocumentMeta,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        let bytes = self.render_bytes(rows, meta)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, &bytes)?;

        log::info!("Wrote {} ({} bytes)", output_path.display(), bytes.len());
        Ok(output_path.to_path_buf())
    }

    /// Render the report to PDF bytes without touching the filesystem.
    pub fn render_bytes(&self, rows: &[ModuleRow], meta: &DocumentMeta) -> Result<Vec<u8>> {
        let shaper = Shaper::new(self.registry)?;
        let document = layout_report(&self.options, rows, meta, &shaper)?;
        PdfRenderer::new(&shaper)
            .with_options(self.options.render.clone())
            .render(&document, meta)
    }

    /// Lay out the report with the registry's real font metrics.
    pub fn layout(&self, rows: &[ModuleRow], meta: &DocumentMeta) -> Result<LaidOutDocument> {
        let shaper = Shaper::new(self.registry)?;
        layout_report(&self.options, rows, meta, &shaper)
    }
}

/// The flow of a report: title, subtitle, gap, table, gap, footer.
///
/// Rows are expected to be normalized already.
pub fn compose_blocks(
    options: &ReportOptions,
    rows: &[ModuleRow],
    meta: &DocumentMeta,
) -> Result<Vec<Block>> {
    let columns =
        ColumnLayout::fill_remaining(options.page_setup.usable_width(), options.fixed_columns)?;
    let header =
        std::array::from_fn(|col| CellSpec::new(meta.headers[col].clone(), StyleRole::Header));
    let body = rows
        .iter()
        .map(|row| {
            let cells = row.cells();
            std::array::from_fn(|col| CellSpec::new(cells[col], BODY_ROLES[col]))
        })
        .collect();

    Ok(vec![
        Block::paragraph(meta.title.clone(), StyleRole::Title),
        Block::paragraph(meta.subtitle.clone(), StyleRole::Subtitle),
        Block::Spacer(options.space_before_table),
        Block::Table(TableSpec {
            columns,
            header,
            rows: body,
            style: options.table_style.clone(),
        }),
        Block::Spacer(options.space_after_table),
        Block::paragraph(meta.footer.clone(), StyleRole::Footer),
    ])
}

/// Normalize and validate `rows`, then paginate the report with `measure`.
///
/// Works with any [`TextMeasure`], so a layout can be previewed without a
/// font file.
pub fn layout_report<M: TextMeasure + ?Sized>(
    options: &ReportOptions,
    rows: &[ModuleRow],
    meta: &DocumentMeta,
    measure: &M,
) -> Result<LaidOutDocument> {
    let rows = prepare_rows(rows)?;
    let blocks = compose_blocks(options, &rows, meta)?;
    let document =
        Paginator::new(options.page_setup, &options.stylesheet, measure).paginate(&blocks)?;

    log::info!(
        "Laid out {} rows on {} pages ({} split)",
        rows.len(),
        document.page_count(),
        document.split_rows()
    );
    for page in &document.pages {
        log::debug!("Page {}: {} table rows", page.number, page.body_rows().count());
    }
    Ok(document)
}
