//! Module rows: the records the report table lists.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Longest accepted module code, in characters.
pub const MAX_CODE_LEN: usize = 16;

/// One feature module of the POS system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRow {
    /// Short identifier, e.g. `M01`
    pub code: String,

    /// Display name
    pub name: String,

    /// Delivery status label
    pub status: String,

    /// Free-text feature description; may be arbitrarily long
    pub features: String,
}

impl ModuleRow {
    /// Create a row.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        features: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            status: status.into(),
            features: features.into(),
        }
    }

    /// The four cell texts in column order.
    pub fn cells(&self) -> [&str; 4] {
        [&self.code, &self.name, &self.status, &self.features]
    }

    /// Normalize whitespace and Unicode composition.
    ///
    /// Labels collapse to a single line; `features` keeps explicit newlines
    /// as hard breaks.
    pub fn normalized(&self) -> Self {
        Self {
            code: normalize_label(&self.code),
            name: normalize_label(&self.name),
            status: normalize_label(&self.status),
            features: normalize_text(&self.features),
        }
    }

    /// Check the row is fit for layout. `index` is only used in the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let reject = |reason: &str| Error::InvalidRow {
            index,
            reason: reason.to_string(),
        };

        if self.code.trim().is_empty() {
            return Err(reject("code is empty"));
        }
        if self.code.chars().count() > MAX_CODE_LEN {
            return Err(reject("code is too long"));
        }
        if self.code.chars().any(char::is_whitespace) {
            return Err(reject("code contains whitespace"));
        }
        if self.name.trim().is_empty() {
            return Err(reject("name is empty"));
        }
        if self.status.trim().is_empty() {
            return Err(reject("status is empty"));
        }

        Ok(())
    }
}

/// Normalize then validate every row, keeping order.
pub fn prepare_rows(rows: &[ModuleRow]) -> Result<Vec<ModuleRow>> {
    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row = row.normalized();
            row.validate(index)?;
            Ok(row)
        })
        .collect()
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\u{3000}]+").expect("whitespace pattern is valid"))
}

fn inline_whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\S\n]+").expect("inline whitespace pattern is valid"))
}

fn normalize_label(text: &str) -> String {
    let text: String = text.nfc().collect();
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

fn normalize_text(text: &str) -> String {
    let text: String = text.replace("\r\n", "\n").nfc().collect();
    text.lines()
        .map(|line| inline_whitespace_run().replace_all(line.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
