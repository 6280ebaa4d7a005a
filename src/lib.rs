//! # posreport
//!
//! Branded PDF report of the POS system's feature modules.
//!
//! The report is a title, a muted subtitle, one four-column table (code,
//! name, status, features) whose header repeats on every page and whose
//! body rows are zebra-striped, and a footer note. Text is shaped with the
//! registered TrueType font, so CJK and Latin mix freely.
//!
//! ## Quick Start
//!
//! ```no_run
//! use posreport::font::{FontConfig, FontRegistry};
//! use posreport::{catalog, ReportBuilder};
//!
//! fn main() -> posreport::Result<()> {
//!     let registry = FontRegistry::load(&FontConfig::default())?;
//!
//!     let rows = catalog::module_rows();
//!     let meta = catalog::default_meta(rows.len(), catalog::catalog_date());
//!     let path = ReportBuilder::new(&registry).build("docs/report.pdf", &rows, &meta)?;
//!     println!("PDF generated: {}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`model`]: rows, document texts, styles and page geometry
//! - [`font`]: font registry, shaping and measurement
//! - [`layout`]: wrapping and pagination into a per-page display list
//! - [`render`]: PDF serialization

pub mod catalog;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use font::{FontConfig, FontRegistry};
pub use layout::{LaidOutDocument, LaidOutPage, PlacedRow};
pub use model::{DocumentMeta, ModuleRow, PageSetup, Stylesheet};
pub use options::ReportOptions;
pub use render::RenderOptions;
pub use report::{compose_blocks, layout_report, ReportBuilder};

use std::path::{Path, PathBuf};

/// Build a report with the default options.
///
/// # Arguments
///
/// * `registry` - Fonts for the regular and bold weights
/// * `output_path` - File to write; its directory is created if missing
/// * `rows` - Table rows in display order
/// * `meta` - Title, subtitle, footer and PDF info
///
/// # Returns
///
/// The path that was written.
pub fn build(
    registry: &FontRegistry,
    output_path: impl AsRef<Path>,
    rows: &[ModuleRow],
    meta: &DocumentMeta,
) -> Result<PathBuf> {
    ReportBuilder::new(registry).build(output_path, rows, meta)
}

/// Where the catalog report goes under `base`: `<base>/docs/<file name>`.
pub fn default_output_path(base: impl AsRef<Path>) -> PathBuf {
    base.as_ref()
        .join("docs")
        .join(catalog::output_file_name(catalog::catalog_date()))
}
