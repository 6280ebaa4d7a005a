//! Glyph-dropping subsetter for TrueType fonts.
//!
//! Outlines of glyphs the document never draws are removed from `glyf`;
//! glyph ids stay unchanged so content streams can keep using the
//! original ids with an identity CID mapping. Every other table is copied
//! through untouched. A face inside a collection comes out as a standalone
//! font file.

use std::collections::BTreeSet;

const COMPOSITE_ARG_WORDS: u16 = 0x0001;
const COMPOSITE_SCALE: u16 = 0x0008;
const COMPOSITE_MORE: u16 = 0x0020;
const COMPOSITE_XY_SCALE: u16 = 0x0040;
const COMPOSITE_TWO_BY_TWO: u16 = 0x0080;

struct TableRecord {
    tag: [u8; 4],
    offset: usize,
    length: usize,
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

fn read_u32(data: &[u8], at: usize) -> Option<u32> {
    data.get(at..at + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn read_i16(data: &[u8], at: usize) -> Option<i16> {
    read_u16(data, at).map(|v| v as i16)
}

struct Sfnt<'a> {
    data: &'a [u8],
    version: u32,
    tables: Vec<TableRecord>,
}

impl<'a> Sfnt<'a> {
    fn parse(data: &'a [u8], face_index: u32) -> Option<Self> {
        let mut start = 0;
        if data.get(0..4)? == b"ttcf" {
            let faces = read_u32(data, 8)?;
            if face_index >= faces {
                return None;
            }
            start = read_u32(data, 12 + face_index as usize * 4)? as usize;
        }

        let version = read_u32(data, start)?;
        // 1.0 or 'true'; CFF flavoured fonts are not subset
        if version != 0x0001_0000 && version != 0x7472_7565 {
            return None;
        }

        let count = read_u16(data, start + 4)? as usize;
        let mut tables = Vec::with_capacity(count);
        for i in 0..count {
            let record = start + 12 + i * 16;
            let tag = data.get(record..record + 4)?;
            let offset = read_u32(data, record + 8)? as usize;
            let length = read_u32(data, record + 12)? as usize;
            if offset.checked_add(length)? > data.len() {
                return None;
            }
            tables.push(TableRecord {
                tag: [tag[0], tag[1], tag[2], tag[3]],
                offset,
                length,
            });
        }
        Some(Self {
            data,
            version,
            tables,
        })
    }

    fn table(&self, tag: &[u8; 4]) -> Option<&'a [u8]> {
        self.tables
            .iter()
            .find(|t| &t.tag == tag)
            .map(|t| &self.data[t.offset..t.offset + t.length])
    }
}

struct GlyphTable<'a> {
    glyf: &'a [u8],
    offsets: Vec<usize>,
}

impl<'a> GlyphTable<'a> {
    fn parse(font: &Sfnt<'a>) -> Option<Self> {
        let head = font.table(b"head")?;
        let maxp = font.table(b"maxp")?;
        let loca = font.table(b"loca")?;
        let glyf = font.table(b"glyf")?;

        let long_offsets = read_i16(head, 50)? == 1;
        let glyph_count = read_u16(maxp, 4)? as usize;

        let offsets = (0..=glyph_count)
            .map(|i| {
                if long_offsets {
                    read_u32(loca, i * 4).map(|v| v as usize)
                } else {
                    read_u16(loca, i * 2).map(|v| v as usize * 2)
                }
            })
            .collect::<Option<Vec<_>>>()?;

        if offsets.windows(2).any(|w| w[0] > w[1]) || offsets.last().copied()? > glyf.len() {
            return None;
        }
        Some(Self { glyf, offsets })
    }

    fn glyph_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn glyph(&self, id: usize) -> &'a [u8] {
        &self.glyf[self.offsets[id]..self.offsets[id + 1]]
    }

    /// Component glyph ids of a composite glyph.
    fn components(&self, id: usize) -> Vec<u16> {
        let data = self.glyph(id);
        let mut out = Vec::new();
        if read_i16(data, 0).map_or(true, |contours| contours >= 0) {
            return out;
        }

        let mut at = 10;
        while let (Some(flags), Some(component)) = (read_u16(data, at), read_u16(data, at + 2)) {
            out.push(component);
            at += 4;
            at += if flags & COMPOSITE_ARG_WORDS != 0 { 4 } else { 2 };
            if flags & COMPOSITE_SCALE != 0 {
                at += 2;
            } else if flags & COMPOSITE_XY_SCALE != 0 {
                at += 4;
            } else if flags & COMPOSITE_TWO_BY_TWO != 0 {
                at += 8;
            }
            if flags & COMPOSITE_MORE == 0 {
                break;
            }
        }
        out
    }

    /// `used` plus `.notdef` plus every component reachable from them.
    fn closure(&self, used: &BTreeSet<u16>) -> BTreeSet<u16> {
        let mut keep: BTreeSet<u16> = BTreeSet::new();
        let mut stack: Vec<u16> = used.iter().copied().chain([0]).collect();
        while let Some(id) = stack.pop() {
            if (id as usize) >= self.glyph_count() || !keep.insert(id) {
                continue;
            }
            stack.extend(self.components(id as usize));
        }
        keep
    }
}

fn checksum(table: &[u8]) -> u32 {
    table.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// Drop the outlines of every glyph not in `used`; with `None` every
/// glyph is kept and only the face is extracted.
///
/// Returns `None` when the data is not a TrueType font or its tables are
/// inconsistent.
pub(crate) fn subset_truetype(
    data: &[u8],
    face_index: u32,
    used: Option<&BTreeSet<u16>>,
) -> Option<Vec<u8>> {
    let font = Sfnt::parse(data, face_index)?;
    let glyphs = GlyphTable::parse(&font)?;
    let keep = match used {
        Some(used) => glyphs.closure(used),
        None => (0..glyphs.glyph_count())
            .filter_map(|id| u16::try_from(id).ok())
            .collect(),
    };

    let mut glyf = Vec::new();
    let mut loca = Vec::with_capacity((glyphs.glyph_count() + 1) * 4);
    for id in 0..glyphs.glyph_count() {
        loca.extend_from_slice(&(glyf.len() as u32).to_be_bytes());
        if keep.contains(&(id as u16)) {
            glyf.extend_from_slice(glyphs.glyph(id));
            while glyf.len() % 4 != 0 {
                glyf.push(0);
            }
        }
    }
    loca.extend_from_slice(&(glyf.len() as u32).to_be_bytes());

    let mut head = font.table(b"head")?.to_vec();
    head.get_mut(8..12)?.copy_from_slice(&[0; 4]);
    head.get_mut(50..52)?.copy_from_slice(&1i16.to_be_bytes());

    let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::with_capacity(font.tables.len());
    for record in &font.tables {
        let body = match &record.tag {
            b"DSIG" => continue,
            b"glyf" => std::mem::take(&mut glyf),
            b"loca" => std::mem::take(&mut loca),
            b"head" => std::mem::take(&mut head),
            _ => data[record.offset..record.offset + record.length].to_vec(),
        };
        tables.push((record.tag, body));
    }
    tables.sort_by(|a, b| a.0.cmp(&b.0));

    let out = write_sfnt(font.version, &tables)?;
    log::debug!(
        "Subset font: kept {} of {} glyphs, {} -> {} bytes",
        keep.len(),
        glyphs.glyph_count(),
        data.len(),
        out.len()
    );
    Some(out)
}

fn write_sfnt(version: u32, tables: &[([u8; 4], Vec<u8>)]) -> Option<Vec<u8>> {
    let count = u16::try_from(tables.len()).ok()?;
    let entry_selector = 15 - count.max(1).leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = count * 16 - search_range;

    let mut out = Vec::new();
    out.extend_from_slice(&version.to_be_bytes());
    for field in [count, search_range, entry_selector, range_shift] {
        out.extend_from_slice(&field.to_be_bytes());
    }

    let mut offset = 12 + tables.len() * 16;
    let mut head_offset = None;
    for (tag, body) in tables {
        if tag == b"head" {
            head_offset = Some(offset);
        }
        out.extend_from_slice(tag);
        out.extend_from_slice(&checksum(body).to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        offset += (body.len() + 3) & !3;
    }

    for (_, body) in tables {
        out.extend_from_slice(body);
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }

    let adjustment = 0xB1B0_AFBAu32.wrapping_sub(checksum(&out));
    let at = head_offset? + 8;
    out.get_mut(at..at + 4)?.copy_from_slice(&adjustment.to_be_bytes());
    Some(out)
}
