//! Font registration, shaping and text measurement.
//!
//! Fonts are loaded once into a [`FontRegistry`] before any layout work
//! starts. A registry is read-only afterwards; every build borrows it and
//! creates its own [`Shaper`], so concurrent builds share nothing mutable.
//!
//! ```no_run
//! use posreport::font::{FontConfig, FontRegistry};
//!
//! let registry = FontRegistry::load(&FontConfig::new("/Library/Fonts/Arial Unicode.ttf"))?;
//! assert!(registry.synthetic_bold());
//! # Ok::<(), posreport::Error>(())
//! ```

mod measure;
mod registry;
mod shaper;

pub use measure::{FixedMeasure, TextMeasure};
pub use registry::{
    global, init_global, FontConfig, FontId, FontMetrics, FontRegistry, LoadedFont, OutlineFormat,
    DEFAULT_FONT_PATH,
};
pub use shaper::{ShapedGlyph, ShapedText, Shaper};
