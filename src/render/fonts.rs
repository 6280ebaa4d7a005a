//! Type0 font embedding.

use super::cmap::to_unicode_cmap;
use super::content::GlyphUse;
use super::subset::subset_truetype;
use super::text_string;
use crate::error::Result;
use crate::font::{LoadedFont, OutlineFormat};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, BTreeSet};

/// Flate-compress a stream body and mark the dictionary accordingly.
pub(crate) fn flate_stream(mut dict: Dictionary, data: &[u8], compress: bool) -> Result<Stream> {
    if !compress {
        return Ok(Stream::new(dict, data.to_vec()).with_compression(false));
    }

    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    dict.set("Filter", "FlateDecode");
    Ok(Stream::new(dict, compressed).with_compression(false))
}

/// `W` array entries, grouping consecutive glyph ids into runs.
fn width_array(font: &LoadedFont, glyphs: &BTreeMap<u16, GlyphUse>) -> Vec<Object> {
    let mut array = Vec::new();
    let mut run: Vec<Object> = Vec::new();
    let mut run_start: Option<u16> = None;
    let mut previous: Option<u16> = None;

    for (&gid, glyph) in glyphs {
        let width = Object::Real(font.metrics.to_glyph_space(glyph.advance as f32).round());
        if previous.map_or(false, |p| p.checked_add(1) == Some(gid)) {
            run.push(width);
        } else {
            if let Some(start) = run_start {
                array.push(Object::Integer(start as i64));
                array.push(Object::Array(std::mem::take(&mut run)));
            }
            run_start = Some(gid);
            run.push(width);
        }
        previous = Some(gid);
    }
    if let Some(start) = run_start {
        array.push(Object::Integer(start as i64));
        array.push(Object::Array(run));
    }
    array
}

/// Six uppercase letters derived from the glyph set, as PDF requires for
/// subset font names.
fn subset_tag(glyphs: &BTreeSet<u16>) -> String {
    // FNV-1a
    let mut hash: u32 = 0x811c_9dc5;
    for gid in glyphs {
        for byte in gid.to_be_bytes() {
            hash ^= byte as u32;
            hash = hash.wrapping_mul(0x0100_0193);
        }
    }
    (0..6)
        .map(|_| {
            let letter = (b'A' + (hash % 26) as u8) as char;
            hash /= 26;
            letter
        })
        .collect()
}

/// Embed `font` with the glyphs in `glyphs` and return the Type0 font
/// object id.
pub(crate) fn embed_font(
    doc: &mut Document,
    font: &LoadedFont,
    glyphs: &BTreeMap<u16, GlyphUse>,
    subset: bool,
    compress: bool,
) -> Result<ObjectId> {
    let used: BTreeSet<u16> = glyphs.keys().copied().collect();

    let subset_data = match font.outlines {
        OutlineFormat::TrueType => {
            let data = subset_truetype(&font.data, font.face_index, subset.then_some(&used));
            if data.is_none() {
                log::warn!(
                    "Could not read the glyph tables of {}; embedding the font file as is",
                    font.postscript_name
                );
            }
            data
        }
        OutlineFormat::Cff => None,
    };

    let base_font = if subset && subset_data.is_some() {
        format!("{}+{}", subset_tag(&used), font.postscript_name)
    } else {
        font.postscript_name.clone()
    };
    let font_bytes: &[u8] = subset_data.as_deref().unwrap_or(&font.data);

    let (file_key, file_stream) = match font.outlines {
        OutlineFormat::TrueType => {
            let dict = dictionary! { "Length1" => Object::Integer(font_bytes.len() as i64) };
            ("FontFile2", flate_stream(dict, font_bytes, compress)?)
        }
        OutlineFormat::Cff => {
            let dict = dictionary! { "Subtype" => "OpenType" };
            ("FontFile3", flate_stream(dict, font_bytes, compress)?)
        }
    };
    let file_id = doc.add_object(file_stream);

    let metrics = &font.metrics;
    let scaled = |units: i16| Object::Real(metrics.to_glyph_space(units as f32).round());
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(base_font.clone().into_bytes()),
        "Flags" => Object::Integer(4),
        "FontBBox" => Object::Array(metrics.bbox.iter().map(|v| scaled(*v)).collect()),
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => scaled(metrics.ascender),
        "Descent" => scaled(metrics.descender),
        "CapHeight" => scaled(metrics.cap_height),
        "StemV" => Object::Integer(80),
        file_key => file_id,
    });

    let mut cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => match font.outlines {
            OutlineFormat::TrueType => "CIDFontType2",
            OutlineFormat::Cff => "CIDFontType0",
        },
        "BaseFont" => Object::Name(base_font.clone().into_bytes()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => text_string("Adobe"),
            "Ordering" => text_string("Identity"),
            "Supplement" => Object::Integer(0),
        },
        "FontDescriptor" => descriptor_id,
        "DW" => Object::Integer(1000),
        "W" => Object::Array(width_array(font, glyphs)),
    };
    if font.outlines == OutlineFormat::TrueType {
        cid_font.set("CIDToGIDMap", "Identity");
    }
    let cid_font_id = doc.add_object(cid_font);

    let texts: BTreeMap<u16, String> = glyphs
        .iter()
        .map(|(gid, glyph)| (*gid, glyph.text.clone()))
        .collect();
    let cmap = flate_stream(Dictionary::new(), &to_unicode_cmap(&texts), compress)?;
    let cmap_id = doc.add_object(cmap);

    log::debug!(
        "Embedded {} ({} glyphs, {} bytes)",
        base_font,
        glyphs.len(),
        font_bytes.len()
    );

    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(base_font.into_bytes()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => cmap_id,
    }))
}
