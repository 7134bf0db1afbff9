//! Terminal preview of a planned journal, bilingual captions included.

use crate::core::pagination::{PageSpec, PrintDocument};
use crate::print::cells::slot_cells;
use crate::print::layout::{
    CERTIFICATION, CERTIFICATION_HINDI, COLUMNS, FormSettings, RATE_COLUMN, SIGNATURES, TITLE,
    TITLE_HINDI,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_COL_WIDTH: usize = 22;

fn pad(text: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(w)))
}

fn pad_left(text: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(text);
    format!("{}{}", " ".repeat(width.saturating_sub(w)), text)
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}

fn column_widths(doc: &PrintDocument<'_>) -> Vec<usize> {
    let mut widths: Vec<usize> = COLUMNS
        .iter()
        .map(|c| {
            UnicodeWidthStr::width(c.label)
                .max(UnicodeWidthStr::width(c.hindi))
                .max(2)
        })
        .collect();

    for page in &doc.pages {
        for cells in page.rows.iter().filter_map(slot_cells) {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }
    }

    if let Some(total) = doc.pages.last().and_then(|p| p.grand_total) {
        let w = total.to_string().len();
        widths[RATE_COLUMN] = widths[RATE_COLUMN].max(w);
    }

    widths.iter().map(|w| (*w).min(MAX_COL_WIDTH)).collect()
}

fn table_width(widths: &[usize]) -> usize {
    widths.iter().map(|w| w + 3).sum::<usize>() + 1
}

fn border(widths: &[usize], fill: char) -> String {
    let mut out = String::from("+");
    for w in widths {
        out.push_str(&fill.to_string().repeat(w + 2));
        out.push('+');
    }
    out
}

fn row(widths: &[usize], cells: &[String]) -> String {
    let mut out = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(&pad(&truncate(cell, *w), *w));
        out.push_str(" |");
    }
    out
}

/// Empty slot: one rule through the whole row.
fn struck_row(widths: &[usize]) -> String {
    format!("|{}|", "─".repeat(table_width(widths) - 2))
}

fn totals_row(widths: &[usize], total: &str) -> String {
    let span = |ws: &[usize]| ws.iter().map(|w| w + 3).sum::<usize>() - 3;
    let label_w = span(&widths[..RATE_COLUMN]);
    let rest_w = span(&widths[RATE_COLUMN + 1..]);
    format!(
        "| {} | {} | {} |",
        pad_left("Total", label_w),
        pad_left(total, widths[RATE_COLUMN]),
        " ".repeat(rest_w)
    )
}

fn render_header(out: &mut Vec<String>, doc: &PrintDocument<'_>, form: &FormSettings) {
    let p = doc.profile;
    out.push(format!(
        "{} | {} / {} | {}",
        form.railway, TITLE_HINDI, TITLE, form.form_code
    ));
    out.push(format!("Rule by which governed: {}", form.governing_rule));
    out.push(format!(
        "Branch: {} | Division/Distt.: {} | Headquarters at: {}",
        p.branch, p.division, p.headquarters
    ));
    out.push(format!(
        "Journal of duties performed by {} for which allowance for {} 20{} is claimed.",
        p.name,
        doc.month_name(),
        doc.short_year()
    ));
    out.push(format!(
        "Designation: {} | Pay: {} | Level-{} | P.F. NO: {}",
        p.designation, p.basic_pay, p.pay_level, p.pf_number
    ));
}

fn render_footer(out: &mut Vec<String>, width: usize) {
    out.push(String::new());
    out.push(format!("B : {}", "_".repeat(width.saturating_sub(4).min(80))));
    out.push(String::new());
    for line in textwrap::wrap(CERTIFICATION_HINDI, width) {
        out.push(line.into_owned());
    }
    for sentence in CERTIFICATION {
        for line in textwrap::wrap(sentence, width) {
            out.push(line.into_owned());
        }
    }
    out.push(String::new());
    let sigs: Vec<String> = SIGNATURES
        .iter()
        .map(|(title, caption)| {
            if caption.is_empty() {
                title.to_string()
            } else {
                format!("{} / {}", title, caption)
            }
        })
        .collect();
    out.push(sigs.join("    |    "));
}

fn render_page(
    out: &mut Vec<String>,
    doc: &PrintDocument<'_>,
    page: &PageSpec<'_>,
    form: &FormSettings,
    widths: &[usize],
) {
    out.push(format!("=== Page {} of {} ===", page.number(), doc.pages.len()));

    if page.show_header {
        render_header(out, doc, form);
    }

    let numbers: Vec<String> = COLUMNS.iter().map(|c| c.number.to_string()).collect();
    let labels: Vec<String> = COLUMNS.iter().map(|c| c.label.to_string()).collect();
    let hindi: Vec<String> = COLUMNS.iter().map(|c| c.hindi.to_string()).collect();

    out.push(border(widths, '='));
    out.push(row(widths, &hindi));
    out.push(row(widths, &labels));
    out.push(border(widths, '-'));
    out.push(row(widths, &numbers));
    out.push(border(widths, '='));

    for slot in &page.rows {
        match slot_cells(slot) {
            Some(cells) => out.push(row(widths, &cells)),
            None => out.push(struck_row(widths)),
        }
    }
    out.push(border(widths, '-'));

    if page.show_totals_row {
        let total = page.grand_total.unwrap_or(page.page_total).to_string();
        out.push(totals_row(widths, &total));
        out.push(border(widths, '-'));
    }

    if page.show_certification_footer {
        render_footer(out, table_width(widths));
    }
}

/// Render every page of `doc`, separated by a blank line.
pub fn render_text(doc: &PrintDocument<'_>, form: &FormSettings) -> String {
    let widths = column_widths(doc);
    let mut out = Vec::new();

    for (i, page) in doc.pages.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        render_page(&mut out, doc, page, form, &widths);
    }

    out.join("\n") + "\n"
}
