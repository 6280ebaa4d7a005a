//! Table column layout.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Number of columns in the module table (code, name, status, features).
pub const COLUMN_COUNT: usize = 4;

/// Fixed widths of the code, name and status columns in points.
pub const FIXED_COLUMN_WIDTHS: [f32; COLUMN_COUNT - 1] = [28.0, 72.0, 38.0];

/// Ordered column widths in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    widths: [f32; COLUMN_COUNT],
}

impl ColumnLayout {
    /// Give the last column whatever the fixed columns leave of `usable_width`.
    ///
    /// Fails when the fixed columns already fill the width.
    pub fn fill_remaining(usable_width: f32, fixed: [f32; COLUMN_COUNT - 1]) -> Result<Self> {
        if let Some(bad) = fixed.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(Error::InvalidLayout(format!(
                "column width must be positive, got {}",
                bad
            )));
        }

        let fixed_total: f32 = fixed.iter().sum();
        let remaining = usable_width - fixed_total;
        if remaining <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "fixed columns ({:.2}pt) leave no room within {:.2}pt",
                fixed_total, usable_width
            )));
        }

        Ok(Self {
            widths: [fixed[0], fixed[1], fixed[2], remaining],
        })
    }

    /// Column widths, left to right.
    pub fn widths(&self) -> &[f32; COLUMN_COUNT] {
        &self.widths
    }

    /// Width of one column.
    pub fn width(&self, column: usize) -> f32 {
        self.widths[column]
    }

    /// Sum of all column widths.
    pub fn total(&self) -> f32 {
        self.widths.iter().sum()
    }

    /// X offset of each column's left edge relative to the table's left edge.
    pub fn offsets(&self) -> [f32; COLUMN_COUNT] {
        let mut offsets = [0.0; COLUMN_COUNT];
        let mut x = 0.0;
        for (offset, width) in offsets.iter_mut().zip(self.widths.iter()) {
            *offset = x;
            x += width;
        }
        offsets
    }
}
