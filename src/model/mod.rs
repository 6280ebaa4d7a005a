//! Data model of a report.
//!
//! Rows, document texts, styles and page geometry are plain immutable values
//! constructed once and handed to the layout stage.

mod document;
mod page;
mod row;
mod style;
mod table;

pub use document::DocumentMeta;
pub use page::{mm, Margins, PageSetup, PageSize, POINTS_PER_MM};
pub use row::{prepare_rows, ModuleRow, MAX_CODE_LEN};
pub use style::{palette, Color, FontWeight, StyleRole, StyleSpec, Stylesheet};
pub use table::{ColumnLayout, COLUMN_COUNT, FIXED_COLUMN_WIDTHS};
