//! ToUnicode CMaps so text stays searchable and copyable.

use std::collections::BTreeMap;
use std::fmt::Write;

const BFCHAR_CHUNK: usize = 100;

/// Build a ToUnicode CMap mapping 2-byte glyph codes to UTF-16BE text.
///
/// Glyphs without source text are left unmapped.
pub(crate) fn to_unicode_cmap(glyphs: &BTreeMap<u16, String>) -> Vec<u8> {
    let entries: Vec<(u16, &str)> = glyphs
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(gid, text)| (*gid, text.as_str()))
        .collect();

    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n");
    out.push_str("12 dict begin\n");
    out.push_str("begincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n");
    out.push_str("/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    for chunk in entries.chunks(BFCHAR_CHUNK) {
        let _ = writeln!(out, "{} beginbfchar", chunk.len());
        for (gid, text) in chunk {
            let _ = write!(out, "<{:04X}> <", gid);
            for unit in text.encode_utf16() {
                let _ = write!(out, "{:04X}", unit);
            }
            out.push_str(">\n");
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\n");
    out.push_str("CMapName currentdict /CMap defineresource pop\n");
    out.push_str("end\nend\n");
    out.into_bytes()
}
