//! Landscape A4 drawing of a planned journal with `pdf-writer`.
//!
//! English text uses the base-14 Helvetica fonts. When a Devanagari
//! TrueType font is available it is embedded as a Type0 font and the Hindi
//! captions are printed above the English ones.

use crate::core::pagination::{PageSpec, PrintDocument};
use crate::print::cells::slot_cells;
use crate::print::font::{HindiFont, ShapedRun, needs_embedded_font};
use crate::print::layout::{
    CERTIFICATION, CERTIFICATION_HINDI, COLUMNS, FormSettings, RATE_COLUMN, SIGNATURES, TITLE,
    TITLE_HINDI,
};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::collections::BTreeMap;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");
const HINDI: Name<'static> = Name(b"F3");

/// Width and source text of a glyph drawn with the embedded font.
struct UsedGlyph {
    width: f32,
    text: String,
}

struct EmbeddedFont {
    font: HindiFont,
    type0_id: Ref,
    glyphs: BTreeMap<u16, UsedGlyph>,
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    body_budget: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,
    hindi: Option<EmbeddedFont>,

    font_size: f32,
    small_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Base-14 fonts only cover Latin-1: keep those bytes, replace the rest.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Rough Helvetica advance width, good enough for centring and clipping.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5
}

fn clip(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let max_chars = (width / (size * 0.5)).floor() as usize;
    text.chars().take(max_chars.saturating_sub(1)).collect::<String>() + "."
}

impl PdfManager {
    /// Start a document. With `hindi` set, the form labels are bilingual.
    pub fn new(hindi: Option<HindiFont>) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let hindi = hindi.map(|font| EmbeddedFont {
            font,
            type0_id: Ref::new(5),
            glyphs: BTreeMap::new(),
        });
        let next_id = 6;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            // A4 landscape, 297mm x 210mm
            page_w: 842.0,
            page_h: 595.0,
            margin: 24.0,
            body_budget: 260.0,

            next_id,
            font_id,
            bold_font_id,
            hindi,

            font_size: 8.0,
            small_font_size: 6.5,
            title_font_size: 13.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(REGULAR, self.font_id);
            fonts.pair(BOLD, self.bold_font_id);
            if let Some(hindi) = &self.hindi {
                fonts.pair(HINDI, hindi.type0_id);
            }
        }

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn table_width(&self) -> f32 {
        self.page_w - 2.0 * self.margin
    }

    fn col_widths(&self) -> Vec<f32> {
        let w = self.table_width();
        COLUMNS.iter().map(|c| w * c.weight / 100.0).collect()
    }

    fn draw_text(&self, content: &mut Content, font: Name, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encode(text)));
        content.end_text();
    }

    fn draw_centered(&self, content: &mut Content, font: Name, cx: f32, y: f32, size: f32, text: &str) {
        let x = cx - text_width(text, size) / 2.0;
        self.draw_text(content, font, x, y, size, text);
    }

    /// Shape `text` with the embedded font, shrinking it until it fits in
    /// `max_w`. `None` without an embedded font.
    fn fit_run(&self, text: &str, size: f32, max_w: f32) -> Option<(ShapedRun, f32)> {
        let hindi = self.hindi.as_ref()?;
        let run = hindi.font.shape(text, size);
        if run.width <= max_w || run.width <= 0.0 {
            return Some((run, size));
        }
        let fitted = size * max_w / run.width;
        Some((hindi.font.shape(text, fitted), fitted))
    }

    /// Place each glyph of `run` with its own text matrix so mark offsets
    /// from shaping are kept.
    fn draw_run(&mut self, content: &mut Content, run: &ShapedRun, x: f32, y: f32, size: f32) {
        let Some(hindi) = self.hindi.as_mut() else {
            return;
        };
        content.begin_text();
        content.set_font(HINDI, size);
        for glyph in &run.glyphs {
            content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x + glyph.x, y + glyph.y]);
            content.show(Str(&glyph.id.to_be_bytes()));

            let used = hindi.glyphs.entry(glyph.id).or_insert_with(|| UsedGlyph {
                width: glyph.width,
                text: String::new(),
            });
            if used.text.is_empty() {
                used.text = glyph.text.clone();
            }
        }
        content.end_text();
    }

    /// Draw Hindi text centred on `cx`. Returns false when no Devanagari
    /// font is embedded.
    fn draw_hindi_centered(&mut self, content: &mut Content, cx: f32, y: f32, size: f32, max_w: f32, text: &str) -> bool {
        match self.fit_run(text, size, max_w) {
            Some((run, size)) => {
                self.draw_run(content, &run, cx - run.width / 2.0, y, size);
                true
            }
            None => false,
        }
    }

    fn draw_line(&self, content: &mut Content, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        content.save_state();
        content.set_line_width(width);
        content.move_to(x1, y1);
        content.line_to(x2, y2);
        content.stroke();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_line_width(0.5);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Header block printed at the top of every page. Returns the y just
    /// below it.
    fn draw_form_header(&mut self, content: &mut Content, doc: &PrintDocument<'_>, form: &FormSettings) -> f32 {
        let left = self.margin;
        let right = self.page_w - self.margin;
        let cx = self.page_w / 2.0;
        let p = doc.profile;

        let mut y = self.page_h - self.margin - 10.0;
        let title_w = self.table_width() / 2.0;
        if self.draw_hindi_centered(content, cx, y, self.title_font_size, title_w, TITLE_HINDI) {
            y -= 15.0;
        }
        self.draw_text(content, BOLD, left, y, 9.0, &form.railway);
        self.draw_centered(content, BOLD, cx, y, self.title_font_size, TITLE);
        let code_x = right - text_width(&form.form_code, self.font_size);
        self.draw_text(content, REGULAR, code_x, y, self.font_size, &form.form_code);

        y -= 12.0;
        let rule = format!("Rule by which governed: {}", form.governing_rule);
        self.draw_centered(content, REGULAR, cx, y, self.font_size, &rule);

        y -= 5.0;
        self.draw_line(content, left, y, right, y, 0.8);

        y -= 12.0;
        let third = self.table_width() / 3.0;
        self.draw_text(content, REGULAR, left, y, self.font_size, &format!("Branch: {}", p.branch));
        self.draw_text(
            content,
            REGULAR,
            left + third,
            y,
            self.font_size,
            &format!("Division/Distt.: {}", p.division),
        );
        self.draw_text(
            content,
            REGULAR,
            left + 2.0 * third,
            y,
            self.font_size,
            &format!("Headquarters at: {}", p.headquarters),
        );

        y -= 14.0;
        let sentence = format!(
            "Journal of duties performed by {} for which allowance for {} 20{} is claimed.",
            p.name,
            doc.month_name(),
            doc.short_year()
        );
        self.draw_text(content, REGULAR, left, y, 9.5, &sentence);

        y -= 14.0;
        let quarter = self.table_width() / 4.0;
        let pay_fields = [
            format!("Designation: {}", p.designation),
            format!("Pay: {}", p.basic_pay),
            format!("Level-{}", p.pay_level),
            format!("P.F. NO: {}", p.pf_number),
        ];
        for (i, text) in pay_fields.iter().enumerate() {
            self.draw_text(content, REGULAR, left + i as f32 * quarter, y, self.font_size, text);
        }

        y -= 5.0;
        self.draw_line(content, left, y, right, y, 1.5);

        y - 4.0
    }

    /// Column captions plus the 1..12 numbering row. Returns the y below.
    fn draw_table_header(&mut self, content: &mut Content, top: f32, widths: &[f32]) -> f32 {
        let caption_h = 24.0;
        let number_h = 11.0;
        let mut x = self.margin;

        let caption_y = top - caption_h;
        let number_y = caption_y - number_h;

        for (col, w) in COLUMNS.iter().zip(widths) {
            self.draw_cell_borders(content, x, caption_y, *w, caption_h);
            let label = clip(col.label, *w - 4.0, self.small_font_size);
            let cx = x + w / 2.0;
            if self.draw_hindi_centered(content, cx, caption_y + 14.0, self.small_font_size, *w - 4.0, col.hindi) {
                self.draw_centered(content, BOLD, cx, caption_y + 4.0, self.small_font_size, &label);
            } else {
                self.draw_centered(content, BOLD, cx, caption_y + 9.0, self.small_font_size, &label);
            }

            content.save_state();
            content.set_fill_gray(0.92);
            content.rect(x, number_y, *w, number_h);
            content.fill_nonzero();
            content.restore_state();
            self.draw_cell_borders(content, x, number_y, *w, number_h);
            self.draw_centered(
                content,
                BOLD,
                cx,
                number_y + 3.0,
                self.small_font_size,
                &col.number.to_string(),
            );

            x += w;
        }

        number_y
    }

    /// One body cell. Text the base fonts cannot show goes through the
    /// embedded font when there is one.
    fn draw_cell_text(&mut self, content: &mut Content, x: f32, y: f32, w: f32, left_aligned: bool, text: &str) {
        let max_w = w - 4.0;
        if needs_embedded_font(text)
            && let Some((run, size)) = self.fit_run(text, self.font_size, max_w)
        {
            let tx = if left_aligned { x + 2.0 } else { x + (w - run.width) / 2.0 };
            self.draw_run(content, &run, tx, y, size);
            return;
        }
        let text = clip(text, max_w, self.font_size);
        if left_aligned {
            self.draw_text(content, REGULAR, x + 2.0, y, self.font_size, &text);
        } else {
            self.draw_centered(content, REGULAR, x + w / 2.0, y, self.font_size, &text);
        }
    }

    fn draw_body(&mut self, content: &mut Content, top: f32, widths: &[f32], page: &PageSpec<'_>) -> f32 {
        let row_h = (self.body_budget / page.rows.len() as f32).min(22.0);
        let mut y = top;

        for slot in &page.rows {
            y -= row_h;
            let mut x = self.margin;

            match slot_cells(slot) {
                Some(cells) => {
                    for (i, (text, w)) in cells.iter().zip(widths).enumerate() {
                        self.draw_cell_borders(content, x, y, *w, row_h);
                        // Purpose reads left to right; the rest are centred.
                        self.draw_cell_text(content, x, y + row_h / 2.0 - 3.0, *w, i == 8, text);
                        x += w;
                    }
                }
                None => {
                    for w in widths {
                        self.draw_cell_borders(content, x, y, *w, row_h);
                        x += w;
                    }
                    // Blank rows are cancelled across the full width.
                    let mid = y + row_h / 2.0;
                    self.draw_line(content, self.margin, mid, self.margin + self.table_width(), mid, 1.0);
                }
            }
        }

        y
    }

    fn draw_totals_row(&self, content: &mut Content, top: f32, widths: &[f32], total: &str) -> f32 {
        let h = 16.0;
        let y = top - h;

        let label_w: f32 = widths[..RATE_COLUMN].iter().sum();
        let rate_w = widths[RATE_COLUMN];
        let rest_w: f32 = widths[RATE_COLUMN + 1..].iter().sum();
        let left = self.margin;

        self.draw_cell_borders(content, left, y, label_w, h);
        self.draw_cell_borders(content, left + label_w, y, rate_w, h);
        self.draw_cell_borders(content, left + label_w + rate_w, y, rest_w, h);

        let label_x = left + label_w - 6.0 - text_width("Total", self.font_size);
        self.draw_text(content, BOLD, label_x, y + 5.0, self.font_size, "Total");
        self.draw_centered(content, BOLD, left + label_w + rate_w / 2.0, y + 5.0, self.font_size, total);

        y
    }

    fn draw_certification(&mut self, content: &mut Content, top: f32) {
        let left = self.margin;
        let right = self.page_w - self.margin;
        let mut y = top - 16.0;

        // Amount in words is filled in by hand.
        self.draw_text(content, REGULAR, left, y, self.font_size, "B :");
        self.draw_line(content, left + 40.0, y - 2.0, right, y - 2.0, 0.5);

        if let Some((run, size)) = self.fit_run(CERTIFICATION_HINDI, self.small_font_size, self.table_width()) {
            y -= 10.0;
            self.draw_run(content, &run, left, y, size);
        }

        let chars_per_line = (self.table_width() / (self.small_font_size * 0.5)) as usize;
        for sentence in CERTIFICATION {
            for line in textwrap::wrap(sentence, chars_per_line) {
                y -= 9.0;
                self.draw_text(content, REGULAR, left, y, self.small_font_size, &line);
            }
            y -= 2.0;
        }

        let sig_y = (y - 34.0).max(self.margin + 20.0);
        let block = self.table_width() / 3.0;
        for (i, (title, caption)) in SIGNATURES.iter().enumerate() {
            let cx = left + block * i as f32 + block / 2.0;
            self.draw_line(content, cx - 80.0, sig_y, cx + 80.0, sig_y, 0.5);
            self.draw_centered(content, REGULAR, cx, sig_y - 9.0, self.font_size, title);
            if !caption.is_empty() {
                self.draw_centered(content, REGULAR, cx, sig_y - 18.0, self.font_size, caption);
            }
        }
    }

    fn draw_page_number(&self, content: &mut Content, page: usize, of: usize) {
        let label = format!("Page {} of {}", page, of);
        let x = self.page_w - self.margin - text_width(&label, self.small_font_size);
        self.draw_text(content, REGULAR, x, self.margin - 12.0, self.small_font_size, &label);
    }

    /// Draw every planned page.
    pub fn write_document(&mut self, doc: &PrintDocument<'_>, form: &FormSettings) {
        let widths = self.col_widths();
        let count = doc.pages.len();

        for page in &doc.pages {
            let mut content = self.new_page();

            let mut y = self.page_h - self.margin;
            if page.show_header {
                y = self.draw_form_header(&mut content, doc, form);
            }

            y = self.draw_table_header(&mut content, y, &widths);
            y = self.draw_body(&mut content, y, &widths, page);

            if page.show_totals_row {
                let total = page.grand_total.unwrap_or(page.page_total).to_string();
                y = self.draw_totals_row(&mut content, y, &widths, &total);
            }

            if page.show_certification_footer {
                self.draw_certification(&mut content, y);
            }

            self.draw_page_number(&mut content, page.number(), count);
            self.finalize_page(content);
        }
    }

    /// Type0 font over an Identity-H encoding: glyph ids are written
    /// directly and the ToUnicode map keeps the text extractable.
    fn write_embedded_font(&mut self, embedded: EmbeddedFont) {
        let cid_id = self.fresh_ref();
        let descriptor_id = self.fresh_ref();
        let cmap_id = self.fresh_ref();
        let data_id = self.fresh_ref();

        let name = Name(embedded.font.name().as_bytes());
        let info = SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        };

        self.pdf
            .type0_font(embedded.type0_id)
            .base_font(name)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_id)
            .to_unicode(cmap_id);

        {
            let mut cid = self.pdf.cid_font(cid_id);
            cid.subtype(CidFontType::Type2)
                .base_font(name)
                .system_info(info)
                .font_descriptor(descriptor_id)
                .default_width(0.0)
                .cid_to_gid_map_predefined(Name(b"Identity"));
            let mut widths = cid.widths();
            for (id, glyph) in &embedded.glyphs {
                widths.consecutive(*id, [glyph.width]);
            }
        }

        let m = embedded.font.metrics();
        self.pdf
            .font_descriptor(descriptor_id)
            .name(name)
            .flags(FontFlags::NON_SYMBOLIC)
            .bbox(Rect::new(m.bbox[0], m.bbox[1], m.bbox[2], m.bbox[3]))
            .italic_angle(0.0)
            .ascent(m.ascent)
            .descent(m.descent)
            .cap_height(m.cap_height)
            .stem_v(80.0)
            .font_file2(data_id);

        let mut cmap = UnicodeCmap::new(Name(b"Custom"), info);
        for (id, glyph) in &embedded.glyphs {
            if !glyph.text.is_empty() {
                cmap.pair_with_multiple(*id, glyph.text.chars());
            }
        }
        self.pdf.cmap(cmap_id, &cmap.finish());

        let data = embedded.font.data();
        self.pdf
            .stream(data_id, data)
            .pair(Name(b"Length1"), data.len() as i32);
    }

    pub fn finish(mut self) -> Vec<u8> {
        if let Some(embedded) = self.hindi.take() {
            self.write_embedded_font(embedded);
        }
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pagination::{default_rows_per_page, plan_document};
    use crate::models::{MonthData, TaEntry, UserProfile};
    use chrono::NaiveDate;

    fn form() -> FormSettings {
        FormSettings {
            railway: "CENTRAL RAILWAY".into(),
            governing_rule: "New Rule".into(),
            form_code: "GA 31 SRC/G 1677".into(),
            hindi_font: None,
        }
    }

    fn march_document_pdf(hindi: Option<HindiFont>, days: u32) -> Vec<u8> {
        let profile = UserProfile {
            id: 1,
            name: "M. D. Manugade".into(),
            ..Default::default()
        };
        let mut month = MonthData::empty(2025, 2, 1);
        for day in 1..=days {
            let mut e = TaEntry::new(NaiveDate::from_ymd_opt(2025, 3, day).unwrap());
            e.rate = "625".into();
            month.entries.push(e);
        }

        let doc = plan_document(Some(&profile), Some(&month), default_rows_per_page()).unwrap();
        let mut pdf = PdfManager::new(hindi);
        pdf.write_document(&doc, &form());
        pdf.finish()
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn one_pdf_page_per_planned_page() {
        let bytes = march_document_pdf(None, 14);

        assert!(bytes.starts_with(b"%PDF-"));
        let pages = count(&bytes, b"/Type /Page") - count(&bytes, b"/Type /Pages");
        assert_eq!(pages, 2);
    }

    #[test]
    fn without_a_devanagari_font_only_helvetica_is_used() {
        let bytes = march_document_pdf(None, 3);

        assert!(count(&bytes, b"/Helvetica") > 0);
        assert_eq!(count(&bytes, b"/Type0"), 0);
        assert_eq!(count(&bytes, b"/FontFile2"), 0);
        assert_eq!(count(&bytes, b"/F3"), 0);
    }

    #[test]
    fn hindi_captions_are_embedded_as_glyph_runs() {
        let Some(font) = HindiFont::find_system() else {
            eprintln!("no Devanagari font installed; bilingual PDF not exercised");
            return;
        };
        let bytes = march_document_pdf(Some(font), 3);

        assert_eq!(count(&bytes, b"/Type0"), 1);
        assert!(count(&bytes, b"/Identity-H") > 0);
        assert!(count(&bytes, b"/FontFile2") > 0);
        assert!(count(&bytes, b"/F3") > 0);
        // ToUnicode maps a glyph back to U+0926, the first letter of the
        // Rate caption.
        assert!(count(&bytes, b"0926") > 0);
        // English captions are still printed under the Hindi ones.
        assert!(count(&bytes, b"(Rate)") > 0);
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(encode("PUNE → CSMT"), b"PUNE ? CSMT".to_vec());
        assert_eq!(encode("café"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn long_cells_are_clipped() {
        assert_eq!(clip("short", 100.0, 8.0), "short");
        let clipped = clip("a very long purpose of journey", 40.0, 8.0);
        assert!(clipped.ends_with('.'));
        assert!(text_width(&clipped, 8.0) <= 40.0);
    }
}
