//! PDF serialization of a laid-out document.
//!
//! Fonts are embedded as Type0/Identity-H composite fonts so any glyph the
//! shaper produces can be addressed, with a ToUnicode map that keeps text
//! extractable. Output carries no timestamps or random ids, so identical
//! input always serializes to identical bytes.

mod cmap;
mod content;
mod fonts;
mod json;
mod options;
mod subset;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;

use crate::error::{Error, Result};
use crate::font::Shaper;
use crate::layout::LaidOutDocument;
use crate::model::DocumentMeta;
use content::{ContentWriter, FontUsage};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat};

/// A PDF text string: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Writes a [`LaidOutDocument`] as PDF 1.7.
pub struct PdfRenderer<'s, 'f> {
    shaper: &'s Shaper<'f>,
    options: RenderOptions,
}

impl<'s, 'f> PdfRenderer<'s, 'f> {
    /// Create a renderer drawing glyphs from `shaper`.
    pub fn new(shaper: &'s Shaper<'f>) -> Self {
        Self {
            shaper,
            options: RenderOptions::default(),
        }
    }

    /// Set render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Serialize `document` to PDF bytes.
    pub fn render(&self, document: &LaidOutDocument, meta: &DocumentMeta) -> Result<Vec<u8>> {
        if document.pages.is_empty() {
            return Err(Error::Render("document has no pages".to_string()));
        }

        let registry = self.shaper.registry();
        let synthetic_bold = self.options.synthetic_bold && registry.synthetic_bold();
        let page_width = document.page_setup.width();
        let page_height = document.page_setup.height();

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let writer = ContentWriter::new(self.shaper, page_height, synthetic_bold);
        let mut usage = FontUsage::default();
        let mut contents = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let stream = writer.write_page(page, &mut usage);
            contents.push(fonts::flate_stream(
                Dictionary::new(),
                &stream,
                self.options.compress,
            )?);
        }

        let mut font_dict = Dictionary::new();
        for (font_id, glyphs) in usage.fonts() {
            let font = registry
                .font(font_id)
                .ok_or_else(|| Error::Render(format!("unknown font id {}", font_id.0)))?;
            let object_id = fonts::embed_font(
                &mut doc,
                font,
                glyphs,
                self.options.subset_fonts,
                self.options.compress,
            )?;
            font_dict.set(format!("F{}", font_id.0), object_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width),
            Object::Real(page_height),
        ];
        let mut kids = Vec::with_capacity(contents.len());
        for stream in contents {
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });

        let mut info = dictionary! {
            "Title" => text_string(&meta.pdf_title),
            "Creator" => text_string(&self.options.creator),
            "Producer" => text_string(concat!("posreport ", env!("CARGO_PKG_VERSION"))),
        };
        if !meta.author.is_empty() {
            info.set("Author", text_string(&meta.author));
        }
        if let Some(subject) = &meta.subject {
            info.set("Subject", text_string(subject));
        }
        let info_id = doc.add_object(info);

        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        log::info!(
            "Rendered {} pages ({} bytes)",
            document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}
