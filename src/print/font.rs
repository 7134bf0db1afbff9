//! Devanagari font discovery and shaping for the bilingual PDF labels.
//!
//! The base-14 PDF fonts stop at Latin-1, so Hindi captions need an embedded
//! TrueType font. Text is shaped with `rustybuzz` so conjuncts and vowel
//! signs come out as the font's own glyphs.

use rustybuzz::{Face, UnicodeBuffer};
use std::fs;
use std::path::Path;

/// Families tried first, in order. Any other family whose name mentions
/// Devanagari is used after these.
const PREFERRED_FAMILIES: [&str; 8] = [
    "Noto Sans Devanagari",
    "Noto Serif Devanagari",
    "Lohit Devanagari",
    "Nirmala UI",
    "Mangal",
    "Kohinoor Devanagari",
    "Gargi",
    "FreeSans",
];

/// Characters a font must cover to be used for the form labels.
const REQUIRED_CHARS: [char; 4] = ['क', 'द', 'र', 'ा'];

/// A TrueType font with Devanagari coverage, kept as raw bytes for embedding.
pub struct HindiFont {
    data: Vec<u8>,
    name: String,
}

/// One shaped glyph, positioned relative to the start of its run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub id: u16,
    pub x: f32,
    pub y: f32,
    /// Advance in 1/1000 em, as written to the PDF width table.
    pub width: f32,
    /// Source text of the cluster this glyph starts; empty for the
    /// following glyphs of the same cluster.
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShapedRun {
    pub glyphs: Vec<PlacedGlyph>,
    pub width: f32,
}

/// Descriptor values in 1/1000 em.
pub struct FontMetrics {
    pub bbox: [f32; 4],
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
}

fn is_truetype(data: &[u8]) -> bool {
    matches!(data.get(..4), Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true"))
}

fn pdf_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "Devanagari".to_string()
    } else {
        cleaned
    }
}

fn is_devanagari_family(name: &str) -> bool {
    PREFERRED_FAMILIES.iter().any(|f| f.eq_ignore_ascii_case(name))
        || name.to_ascii_lowercase().contains("devanagari")
}

fn family_rank(families: &[(String, fontdb::Language)]) -> usize {
    families
        .iter()
        .filter_map(|(name, _)| {
            PREFERRED_FAMILIES
                .iter()
                .position(|f| f.eq_ignore_ascii_case(name))
        })
        .min()
        .unwrap_or(PREFERRED_FAMILIES.len())
}

impl HindiFont {
    /// Accept `data` when it is a single TrueType font covering Devanagari.
    /// Collections and CFF-flavoured OpenType fonts are rejected since they
    /// cannot be embedded as FontFile2.
    pub fn from_data(data: Vec<u8>, name: &str) -> Option<Self> {
        if !is_truetype(&data) {
            return None;
        }
        let face = Face::from_slice(&data, 0)?;
        if REQUIRED_CHARS.iter().any(|c| face.glyph_index(*c).is_none()) {
            return None;
        }
        Some(Self {
            data,
            name: pdf_name(name),
        })
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let data = fs::read(path).ok()?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_data(data, stem)
    }

    /// Search the installed system fonts, regular weight first.
    pub fn find_system() -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let mut candidates: Vec<&fontdb::FaceInfo> = db
            .faces()
            .filter(|f| f.index == 0)
            .filter(|f| f.families.iter().any(|(name, _)| is_devanagari_family(name)))
            .collect();
        candidates.sort_by_key(|f| {
            (
                family_rank(&f.families),
                f.weight != fontdb::Weight::NORMAL,
                f.style != fontdb::Style::Normal,
            )
        });

        candidates.into_iter().find_map(|face| {
            db.with_face_data(face.id, |data, _| {
                Self::from_data(data.to_vec(), &face.post_script_name)
            })
            .flatten()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::from_slice(&self.data, 0)
    }

    pub fn metrics(&self) -> FontMetrics {
        let Some(face) = self.face() else {
            return FontMetrics {
                bbox: [0.0, -250.0, 1000.0, 1000.0],
                ascent: 1000.0,
                descent: -250.0,
                cap_height: 700.0,
            };
        };
        let k = 1000.0 / face.units_per_em() as f32;
        let b = face.global_bounding_box();
        FontMetrics {
            bbox: [
                b.x_min as f32 * k,
                b.y_min as f32 * k,
                b.x_max as f32 * k,
                b.y_max as f32 * k,
            ],
            ascent: face.ascender() as f32 * k,
            descent: face.descender() as f32 * k,
            cap_height: face.capital_height().unwrap_or(face.ascender()) as f32 * k,
        }
    }

    /// Shape `text` at `size` points.
    pub fn shape(&self, text: &str, size: f32) -> ShapedRun {
        let Some(face) = self.face() else {
            return ShapedRun::default();
        };
        let upem = face.units_per_em() as f32;
        let scale = size / upem;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&face, &[], buffer);

        let infos = shaped.glyph_infos();
        let positions = shaped.glyph_positions();

        let mut starts: Vec<usize> = infos.iter().map(|i| i.cluster as usize).collect();
        starts.sort_unstable();
        starts.dedup();

        let mut run = ShapedRun::default();
        let mut last_cluster = None;
        for (info, pos) in infos.iter().zip(positions) {
            let start = info.cluster as usize;
            let cluster_text = if last_cluster == Some(start) {
                String::new()
            } else {
                let end = starts
                    .iter()
                    .copied()
                    .find(|s| *s > start)
                    .unwrap_or(text.len());
                text.get(start..end).unwrap_or("").to_string()
            };
            last_cluster = Some(start);

            let id = info.glyph_id as u16;
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(id))
                .unwrap_or(0) as f32;

            run.glyphs.push(PlacedGlyph {
                id,
                x: run.width + pos.x_offset as f32 * scale,
                y: pos.y_offset as f32 * scale,
                width: advance * 1000.0 / upem,
                text: cluster_text,
            });
            run.width += pos.x_advance as f32 * scale;
        }
        run
    }
}

/// True when `text` has characters the Latin-1 base fonts cannot show.
pub fn needs_embedded_font(text: &str) -> bool {
    text.chars().any(|c| c as u32 > 0xFF)
}
