//! PDF writer options.

/// Options for serializing a laid-out document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Flate-compress content streams and font files
    pub compress: bool,

    /// Embed only the outlines of glyphs that are drawn
    pub subset_fonts: bool,

    /// Fake bold with a fill-and-stroke text mode when bold shares the
    /// regular font file
    pub synthetic_bold: bool,

    /// Value of the `Creator` info entry
    pub creator: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enable or disable font subsetting.
    pub fn with_subsetting(mut self, subset: bool) -> Self {
        self.subset_fonts = subset;
        self
    }

    /// Enable or disable synthetic bold.
    pub fn with_synthetic_bold(mut self, enabled: bool) -> Self {
        self.synthetic_bold = enabled;
        self
    }

    /// Set the creator string.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compress: true,
            subset_fonts: true,
            synthetic_bold: true,
            creator: "posreport".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(options.compress);
        assert!(options.subset_fonts);
        assert!(options.synthetic_bold);
    }

    #[test]
    fn test_builder_pattern() {
        let options = RenderOptions::new()
            .with_compression(false)
            .with_subsetting(false)
            .with_synthetic_bold(false)
            .with_creator("test");

        assert!(!options.compress);
        assert!(!options.subset_fonts);
        assert!(!options.synthetic_bold);
        assert_eq!(options.creator, "test");
    }
}
