//! Font loading and the process-wide registry.

use crate::error::{Error, Result};
use crate::model::FontWeight;
use rustybuzz::ttf_parser::{self, name_id, Tag};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Font the report is designed around; covers Latin and CJK.
pub const DEFAULT_FONT_PATH: &str = "/Library/Fonts/Arial Unicode.ttf";

/// Where to load fonts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontConfig {
    /// Regular weight font file
    pub regular: PathBuf,

    /// Bold weight font file; the regular file is reused when absent
    pub bold: Option<PathBuf>,

    /// Face index inside a font collection
    pub face_index: u32,
}

impl FontConfig {
    /// Use one font file for both weights.
    pub fn new(regular: impl Into<PathBuf>) -> Self {
        Self {
            regular: regular.into(),
            bold: None,
            face_index: 0,
        }
    }

    /// Use a distinct bold font file.
    pub fn with_bold(mut self, bold: impl Into<PathBuf>) -> Self {
        self.bold = Some(bold.into());
        self
    }

    /// Select a face inside a collection.
    pub fn with_face_index(mut self, index: u32) -> Self {
        self.face_index = index;
        self
    }

    /// Path used for the bold weight.
    pub fn bold_path(&self) -> &Path {
        self.bold.as_deref().unwrap_or(&self.regular)
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_PATH)
    }
}

/// Index of a loaded font inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

/// Outline flavour, which decides how the font is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineFormat {
    /// `glyf` outlines
    TrueType,
    /// `CFF ` outlines
    Cff,
}

/// Metrics in font units, read once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    /// x_min, y_min, x_max, y_max
    pub bbox: [i16; 4],
}

impl FontMetrics {
    /// Scale a value in font units to thousandths of an em (PDF glyph space).
    pub fn to_glyph_space(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em as f32
    }
}

/// A font file held in memory.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    /// Registry index
    pub id: FontId,

    /// PostScript name, sanitized for use as a PDF name
    pub postscript_name: String,

    /// File the data came from, if any
    pub path: Option<PathBuf>,

    /// Raw font data
    pub data: Arc<Vec<u8>>,

    /// Face index inside a collection
    pub face_index: u32,

    /// Metrics read at load time
    pub metrics: FontMetrics,

    /// Outline flavour
    pub outlines: OutlineFormat,
}

/// Fonts available to the layout and render stages, keyed by weight.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: Vec<LoadedFont>,
    weights: BTreeMap<FontWeight, FontId>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both weights described by `config`.
    pub fn load(config: &FontConfig) -> Result<Self> {
        let mut registry = Self::new();
        registry.register_file(FontWeight::Regular, &config.regular, config.face_index)?;
        registry.register_file(FontWeight::Bold, config.bold_path(), config.face_index)?;
        Ok(registry)
    }

    /// Register a font file for a weight.
    ///
    /// A file already loaded for another weight is shared instead of being
    /// read again. Registering the same weight twice is an error.
    pub fn register_file(
        &mut self,
        weight: FontWeight,
        path: impl AsRef<Path>,
        face_index: u32,
    ) -> Result<FontId> {
        let path = path.as_ref();
        self.ensure_unregistered(weight)?;

        if let Some(existing) = self
            .fonts
            .iter()
            .find(|f| f.path.as_deref() == Some(path) && f.face_index == face_index)
        {
            let id = existing.id;
            log::debug!("Reusing {} for {} weight", path.display(), weight);
            self.weights.insert(weight, id);
            return Ok(id);
        }

        let data = fs::read(path).map_err(|source| Error::FontLoad {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Registering {} for {} weight ({} bytes)",
            path.display(),
            weight,
            data.len()
        );

        let id = self.push(data, face_index, Some(path.to_path_buf()))?;
        self.weights.insert(weight, id);
        Ok(id)
    }

    /// Register in-memory font data for a weight.
    pub fn register_bytes(
        &mut self,
        weight: FontWeight,
        data: Vec<u8>,
        face_index: u32,
    ) -> Result<FontId> {
        self.ensure_unregistered(weight)?;
        let id = self.push(data, face_index, None)?;
        self.weights.insert(weight, id);
        Ok(id)
    }

    /// Font id registered for a weight.
    pub fn font_id(&self, weight: FontWeight) -> Result<FontId> {
        self.weights
            .get(&weight)
            .copied()
            .ok_or(Error::FontNotRegistered(weight))
    }

    /// Font registered for a weight.
    pub fn font_for(&self, weight: FontWeight) -> Result<&LoadedFont> {
        let id = self.font_id(weight)?;
        Ok(&self.fonts[id.0 as usize])
    }

    /// Look up a font by id.
    pub fn font(&self, id: FontId) -> Option<&LoadedFont> {
        self.fonts.get(id.0 as usize)
    }

    /// All loaded fonts, in registration order.
    pub fn fonts(&self) -> &[LoadedFont] {
        &self.fonts
    }

    /// Check whether a weight has a font.
    pub fn is_registered(&self, weight: FontWeight) -> bool {
        self.weights.contains_key(&weight)
    }

    /// True when bold text has to be emboldened because it shares the
    /// regular font's outlines.
    pub fn synthetic_bold(&self) -> bool {
        match (
            self.weights.get(&FontWeight::Regular),
            self.weights.get(&FontWeight::Bold),
        ) {
            (Some(regular), Some(bold)) => regular == bold,
            _ => false,
        }
    }

    fn ensure_unregistered(&self, weight: FontWeight) -> Result<()> {
        if self.is_registered(weight) {
            return Err(Error::FontAlreadyRegistered(weight));
        }
        Ok(())
    }

    fn push(&mut self, data: Vec<u8>, face_index: u32, path: Option<PathBuf>) -> Result<FontId> {
        let id = FontId(self.fonts.len() as u32);
        let label = path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("font #{}", id.0));

        let face = ttf_parser::Face::parse(&data, face_index)
            .map_err(|e| Error::FontDecode(format!("{}: {}", label, e)))?;

        let units_per_em = face.units_per_em();
        let bbox = face.global_bounding_box();
        let metrics = FontMetrics {
            units_per_em,
            ascender: face.ascender(),
            descender: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
        };
        let outlines = if face.raw_face().table(Tag::from_bytes(b"CFF ")).is_some() {
            OutlineFormat::Cff
        } else {
            OutlineFormat::TrueType
        };
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| sanitize_font_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("EmbeddedFont{}", id.0));

        log::debug!(
            "Loaded {} as {} (upem {}, {:?})",
            label,
            postscript_name,
            units_per_em,
            outlines
        );

        self.fonts.push(LoadedFont {
            id,
            postscript_name,
            path,
            data: Arc::new(data),
            face_index,
            metrics,
            outlines,
        });
        Ok(id)
    }
}

fn sanitize_font_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect()
}

static GLOBAL: OnceLock<FontRegistry> = OnceLock::new();

/// Load the process-wide registry once.
///
/// Later calls return the registry from the first successful call without
/// touching the filesystem again.
pub fn init_global(config: &FontConfig) -> Result<&'static FontRegistry> {
    if let Some(existing) = GLOBAL.get() {
        let same_source = existing
            .font_for(FontWeight::Regular)
            .map(|f| f.path.as_deref() == Some(config.regular.as_path()))
            .unwrap_or(false);
        if !same_source {
            log::warn!(
                "Font registry already initialized; ignoring {}",
                config.regular.display()
            );
        }
        return Ok(existing);
    }

    let registry = FontRegistry::load(config)?;
    Ok(GLOBAL.get_or_init(|| registry))
}

/// The process-wide registry, if [`init_global`] has succeeded.
pub fn global() -> Option<&'static FontRegistry> {
    GLOBAL.get()
}
