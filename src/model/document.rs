//! Document-level text and metadata.

use serde::{Deserialize, Serialize};

/// Literal texts of a report plus the metadata embedded in the PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Visible title paragraph
    pub title: String,

    /// Visible subtitle line
    pub subtitle: String,

    /// Footer note below the table
    pub footer: String,

    /// Column header labels, left to right
    pub headers: [String; 4],

    /// PDF info: document title
    pub pdf_title: String,

    /// PDF info: author
    pub author: String,

    /// PDF info: subject (optional)
    pub subject: Option<String>,
}

impl DocumentMeta {
    /// Create metadata with the given visible texts and default headers.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            pdf_title: title.clone(),
            title,
            subtitle: subtitle.into(),
            footer: footer.into(),
            headers: default_headers(),
            author: String::new(),
            subject: None,
        }
    }

    /// Set the PDF info title and author.
    pub fn with_info(mut self, pdf_title: impl Into<String>, author: impl Into<String>) -> Self {
        self.pdf_title = pdf_title.into();
        self.author = author.into();
        self
    }

    /// Set the PDF info subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Replace the column header labels.
    pub fn with_headers(mut self, headers: [&str; 4]) -> Self {
        self.headers = headers.map(str::to_string);
        self
    }
}

fn default_headers() -> [String; 4] {
    ["编号", "模块", "状态", "功能清单"].map(str::to_string)
}
