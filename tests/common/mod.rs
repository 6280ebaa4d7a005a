//! A generated TrueType font for the end-to-end tests.
//!
//! Three glyphs: `.notdef`, a half-em box mapped to printable ASCII and a
//! full-em box mapped to the rest of the BMP, so every catalog string
//! (CJK included) shapes and embeds without a system font.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const POSTSCRIPT_NAME: &str = "PosreportBoxes-Regular";

const UNITS_PER_EM: u16 = 1000;
const ASCENDER: i16 = 880;
const DESCENDER: i16 = -120;

/// (advance, lsb, rectangle x0, y0, x1, y1); `.notdef` has no outline.
const GLYPHS: [(u16, i16, [i16; 4]); 3] = [
    (500, 0, [0, 0, 0, 0]),
    (500, 50, [50, 0, 450, 700]),
    (1000, 50, [50, -100, 950, 800]),
];

/// (first char, last char, glyph) groups of the format 13 cmap.
const CMAP_GROUPS: [(u32, u32, u32); 2] = [(0x20, 0x7E, 1), (0xA0, 0xFFFF, 2)];

/// The font as a `.ttf` file.
pub fn font_data() -> Vec<u8> {
    sfnt(&tables(), 0)
}

/// The same font wrapped as the only face of a `.ttc` collection.
pub fn collection_data() -> Vec<u8> {
    let header_len = 16u32;
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&1u32.to_be_bytes());
    out.extend_from_slice(&header_len.to_be_bytes());
    out.extend_from_slice(&sfnt(&tables(), header_len));
    out
}

/// Writes the font into `dir` and returns its path.
pub fn write_font(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let data = if name.ends_with(".ttc") {
        collection_data()
    } else {
        font_data()
    };
    std::fs::write(&path, data).unwrap();
    path
}

fn tables() -> Vec<([u8; 4], Vec<u8>)> {
    let mut glyf = Vec::new();
    let mut loca = Vec::new();
    for (_, _, rect) in GLYPHS {
        loca.extend_from_slice(&((glyf.len() / 2) as u16).to_be_bytes());
        if rect != [0; 4] {
            glyf.extend_from_slice(&box_glyph(rect));
        }
    }
    loca.extend_from_slice(&((glyf.len() / 2) as u16).to_be_bytes());

    let mut hmtx = Vec::new();
    for (advance, lsb, _) in GLYPHS {
        hmtx.extend_from_slice(&advance.to_be_bytes());
        hmtx.extend_from_slice(&lsb.to_be_bytes());
    }

    vec![
        (*b"cmap", cmap()),
        (*b"glyf", glyf),
        (*b"head", head()),
        (*b"hhea", hhea()),
        (*b"hmtx", hmtx),
        (*b"loca", loca),
        (*b"maxp", maxp()),
        (*b"name", name()),
    ]
}

/// One closed contour through the four corners, all points on-curve.
fn box_glyph([x0, y0, x1, y1]: [i16; 4]) -> Vec<u8> {
    let mut g = Vec::new();
    for v in [1i16, x0, y0, x1, y1] {
        g.extend_from_slice(&v.to_be_bytes());
    }
    g.extend_from_slice(&3u16.to_be_bytes()); // last point of the contour
    g.extend_from_slice(&0u16.to_be_bytes()); // no instructions
    g.extend_from_slice(&[0x01; 4]);
    for dx in [x0, 0, x1 - x0, 0] {
        g.extend_from_slice(&dx.to_be_bytes());
    }
    for dy in [y0, y1 - y0, 0, y0 - y1] {
        g.extend_from_slice(&dy.to_be_bytes());
    }
    g
}

fn head() -> Vec<u8> {
    let mut t = Vec::with_capacity(54);
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // revision
    t.extend_from_slice(&0u32.to_be_bytes()); // checksum adjustment
    t.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    t.extend_from_slice(&0x0003u16.to_be_bytes()); // flags
    t.extend_from_slice(&UNITS_PER_EM.to_be_bytes());
    t.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -100, 950, 800] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&0u16.to_be_bytes()); // mac style
    t.extend_from_slice(&8u16.to_be_bytes()); // lowest ppem
    t.extend_from_slice(&2i16.to_be_bytes()); // direction hint
    t.extend_from_slice(&0i16.to_be_bytes()); // short loca
    t.extend_from_slice(&0i16.to_be_bytes()); // glyph data format
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::with_capacity(36);
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for v in [ASCENDER, DESCENDER, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&1000u16.to_be_bytes()); // advance width max
    for v in [0i16, 50, 950, 1, 0, 0, 0, 0, 0, 0, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&(GLYPHS.len() as u16).to_be_bytes());
    t
}

fn maxp() -> Vec<u8> {
    let mut t = Vec::with_capacity(32);
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    t.extend_from_slice(&(GLYPHS.len() as u16).to_be_bytes());
    for v in [4u16, 1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t
}

fn cmap() -> Vec<u8> {
    let mut sub = Vec::new();
    sub.extend_from_slice(&13u16.to_be_bytes());
    sub.extend_from_slice(&0u16.to_be_bytes());
    sub.extend_from_slice(&((16 + 12 * CMAP_GROUPS.len()) as u32).to_be_bytes());
    sub.extend_from_slice(&0u32.to_be_bytes()); // language
    sub.extend_from_slice(&(CMAP_GROUPS.len() as u32).to_be_bytes());
    for (first, last, glyph) in CMAP_GROUPS {
        for v in [first, last, glyph] {
            sub.extend_from_slice(&v.to_be_bytes());
        }
    }

    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes());
    t.extend_from_slice(&1u16.to_be_bytes());
    t.extend_from_slice(&3u16.to_be_bytes()); // windows
    t.extend_from_slice(&10u16.to_be_bytes()); // full unicode repertoire
    t.extend_from_slice(&12u32.to_be_bytes());
    t.extend_from_slice(&sub);
    t
}

fn name() -> Vec<u8> {
    let text: Vec<u8> = POSTSCRIPT_NAME
        .encode_utf16()
        .flat_map(|unit| unit.to_be_bytes())
        .collect();

    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes()); // format
    t.extend_from_slice(&1u16.to_be_bytes()); // count
    t.extend_from_slice(&18u16.to_be_bytes()); // string storage offset
    for v in [3u16, 1, 0x0409, 6, text.len() as u16, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&text);
    t
}

/// Serializes `tables` (sorted by tag) as an sfnt whose table offsets
/// start counting at `base`.
fn sfnt(tables: &[([u8; 4], Vec<u8>)], base: u32) -> Vec<u8> {
    let count = tables.len() as u16;
    let entry_selector = 15 - count.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for v in [count, search_range, entry_selector, count * 16 - search_range] {
        out.extend_from_slice(&v.to_be_bytes());
    }

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in tables {
        out.extend_from_slice(tag);
        out.extend_from_slice(&checksum(data).to_be_bytes());
        out.extend_from_slice(&(base + offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    out.extend_from_slice(&body);
    out
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}
