//! Page planning for the printed journal.
//!
//! The paper form holds a fixed number of journey rows per sheet. Planning
//! splits the month's entries into consecutive sheets, pads the last one
//! with empty (struck-through) rows and decides where the totals row and
//! the certification block go. Nothing here touches storage or output.

use crate::errors::{AppError, AppResult};
use crate::models::{MonthData, TaEntry, UserProfile};
use crate::utils::Amount;
use crate::utils::date::month_name;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Journey rows on one sheet of the official form.
pub const ROWS_PER_PAGE: usize = 13;

pub fn default_rows_per_page() -> NonZeroUsize {
    NonZeroUsize::new(ROWS_PER_PAGE).unwrap_or(NonZeroUsize::MIN)
}

/// One table row on a page: bound to an entry, or blank and cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entry", rename_all = "lowercase")]
pub enum Slot<'a> {
    Filled(&'a TaEntry),
    Empty,
}

impl<'a> Slot<'a> {
    pub fn entry(&self) -> Option<&'a TaEntry> {
        match self {
            Slot::Filled(e) => Some(e),
            Slot::Empty => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }
}

/// Render instructions for one physical page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec<'a> {
    pub index: usize,
    pub rows: Vec<Slot<'a>>,
    pub show_header: bool,
    pub show_totals_row: bool,
    pub show_certification_footer: bool,
    pub page_total: Amount,
    /// Only set on the final page.
    pub grand_total: Option<Amount>,
}

impl<'a> PageSpec<'a> {
    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn entries(&self) -> impl Iterator<Item = &'a TaEntry> + '_ {
        self.rows.iter().filter_map(Slot::entry)
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().filter(|s| s.is_filled()).count()
    }
}

/// Split `entries` (already in journal order) into fixed-size pages.
///
/// Always returns at least one page. Only the last page carries the
/// totals row, the certification footer and the grand total.
pub fn plan(entries: &[TaEntry], rows_per_page: NonZeroUsize) -> Vec<PageSpec<'_>> {
    let size = rows_per_page.get();

    let chunks: Vec<&[TaEntry]> = if entries.is_empty() {
        vec![entries]
    } else {
        entries.chunks(size).collect()
    };
    let last = chunks.len() - 1;

    let mut pages: Vec<PageSpec<'_>> = chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let mut rows: Vec<Slot<'_>> = chunk.iter().map(Slot::Filled).collect();
            rows.resize(size, Slot::Empty);

            PageSpec {
                index,
                rows,
                show_header: true,
                show_totals_row: index == last,
                show_certification_footer: index == last,
                page_total: chunk.iter().map(TaEntry::rate_amount).sum(),
                grand_total: None,
            }
        })
        .collect();

    let grand_total: Amount = pages.iter().map(|p| p.page_total).sum();
    if let Some(final_page) = pages.last_mut() {
        final_page.grand_total = Some(grand_total);
    }

    pages
}

/// A profile, a month and its page plan: everything a renderer needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument<'a> {
    pub profile: &'a UserProfile,
    pub year: i32,
    pub month: u32,
    pub pages: Vec<PageSpec<'a>>,
}

impl PrintDocument<'_> {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// Two-digit year as written after the printed "20".
    pub fn short_year(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }

    pub fn grand_total(&self) -> Amount {
        self.pages
            .last()
            .and_then(|p| p.grand_total)
            .unwrap_or_default()
    }

    pub fn entry_count(&self) -> usize {
        self.pages.iter().map(PageSpec::filled_count).sum()
    }
}

/// Plan a printable document. Both inputs are required; the caller is
/// expected to have loaded them before asking for a print.
pub fn plan_document<'a>(
    profile: Option<&'a UserProfile>,
    month: Option<&'a MonthData>,
    rows_per_page: NonZeroUsize,
) -> AppResult<PrintDocument<'a>> {
    let profile = profile.ok_or_else(|| {
        AppError::Precondition("no active profile (create one with `profile add`)".into())
    })?;
    let month = month.ok_or_else(|| {
        AppError::Precondition("no journal data for the requested month".into())
    })?;

    if month.profile_id != profile.id {
        return Err(AppError::Precondition(format!(
            "month {} belongs to profile {}, not {}",
            month.id, month.profile_id, profile.id
        )));
    }

    Ok(PrintDocument {
        profile,
        year: month.year,
        month: month.month,
        pages: plan(&month.entries, rows_per_page),
    })
}
