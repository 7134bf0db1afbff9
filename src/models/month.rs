use super::entry::TaEntry;
use crate::utils::Amount;
use crate::utils::date::{month_arg, month_label};
use serde::Serialize;

/// All entries of one profile for one calendar month.
///
/// `month` is zero based (0 = January). `entries` is kept in journal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    pub id: String,
    pub profile_id: i64,
    pub year: i32,
    pub month: u32,
    pub entries: Vec<TaEntry>,
}

impl MonthData {
    /// Storage key: `<year>-<month0>-<profileId>`.
    pub fn key(year: i32, month: u32, profile_id: i64) -> String {
        format!("{}-{}-{}", year, month, profile_id)
    }

    pub fn empty(year: i32, month: u32, profile_id: i64) -> Self {
        Self {
            id: Self::key(year, month, profile_id),
            profile_id,
            year,
            month,
            entries: Vec::new(),
        }
    }

    /// Stable sort, so entries with equal date and time keep their order.
    pub fn sort_entries(&mut self) {
        self.entries.sort_by_key(TaEntry::sort_key);
    }

    pub fn label(&self) -> String {
        month_label(self.year, self.month)
    }

    pub fn arg(&self) -> String {
        month_arg(self.year, self.month)
    }

    pub fn total(&self) -> Amount {
        self.entries.iter().map(TaEntry::rate_amount).sum()
    }
}
