//! Renderers for a planned journal: PDF, terminal preview and JSON.

mod cells;
pub mod font;
mod fs_utils;
mod json;
pub mod layout;
mod pdf;
mod text;

pub use font::HindiFont;
pub use json::render_json;
pub use layout::FormSettings;
pub use pdf::PdfManager;
pub use text::render_text;

use crate::core::pagination::PrintDocument;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    Pdf,
    Text,
    Json,
}

impl PrintFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintFormat::Pdf => "pdf",
            PrintFormat::Text => "text",
            PrintFormat::Json => "json",
        }
    }
}

/// Where rendered output goes.
pub enum Target {
    Stdout,
    File { path: PathBuf },
}

impl Target {
    /// Resolve `--file`. PDF output always needs a file.
    pub fn resolve(format: PrintFormat, file: Option<&str>, force: bool) -> AppResult<Self> {
        match file {
            Some(f) => {
                let path = fs_utils::resolve_output(f)?;
                fs_utils::ensure_writable(&path, force)?;
                Ok(Target::File { path })
            }
            None if format == PrintFormat::Pdf => Err(AppError::Export(
                "PDF output needs --file <absolute path>".into(),
            )),
            None => Ok(Target::Stdout),
        }
    }
}

/// The configured font file if it is usable, else a system font.
fn locate_hindi_font(configured: Option<&str>) -> Option<HindiFont> {
    let from_config = configured.and_then(|p| {
        let font = HindiFont::from_file(&expand_tilde(p));
        if font.is_none() {
            warning(format!("hindi_font {} is not a Devanagari TrueType font, ignoring it", p));
        }
        font
    });
    from_config.or_else(HindiFont::find_system)
}

/// Render `doc` in `format` and deliver it to `target`.
pub fn render(
    doc: &PrintDocument<'_>,
    form: &FormSettings,
    format: PrintFormat,
    target: &Target,
) -> AppResult<()> {
    let bytes = match format {
        PrintFormat::Pdf => {
            let hindi = locate_hindi_font(form.hindi_font.as_deref());
            if hindi.is_none() {
                warning("No Devanagari TrueType font found: printing English labels only");
            }
            let mut pdf = PdfManager::new(hindi);
            pdf.write_document(doc, form);
            pdf.finish()
        }
        PrintFormat::Text => render_text(doc, form).into_bytes(),
        PrintFormat::Json => render_json(doc)?.into_bytes(),
    };

    match target {
        Target::Stdout => {
            print!("{}", String::from_utf8_lossy(&bytes));
        }
        Target::File { path } => {
            info(format!("Printing to {}: {}", format.as_str(), path.display()));
            fs::write(path, &bytes)
                .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;
            success(format!(
                "{} page(s) written to {} ({} entries)",
                doc.pages.len(),
                path.display(),
                doc.entry_count()
            ));
        }
    }

    Ok(())
}
