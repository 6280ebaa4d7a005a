//! Error types for posreport.

use crate::model::FontWeight;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for posreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when creating the output directory or writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The font file could not be read.
    #[error("Failed to load font {}: {source}", path.display())]
    FontLoad {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The font data is not a usable TrueType/OpenType face.
    #[error("Font decoding error: {0}")]
    FontDecode(String),

    /// A font role was registered twice.
    #[error("Font for {0} weight is already registered")]
    FontAlreadyRegistered(FontWeight),

    /// A font role was used without being registered.
    #[error("No font registered for {0} weight")]
    FontNotRegistered(FontWeight),

    /// A row failed validation.
    #[error("Invalid row {index}: {reason}")]
    InvalidRow {
        /// Zero-based position in the input sequence
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The table has no body rows.
    #[error("Report table has no rows")]
    EmptyTable,

    /// Page geometry or table content that cannot be laid out.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// A color literal could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Error while serializing the PDF.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Render(err.to_string()),
        }
    }
}
