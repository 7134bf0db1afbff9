use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Printed form uses day-first dates, e.g. `05-03-2025`.
pub fn format_dmy(d: &NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}

/// Parse `YYYY-MM` into `(year, month0)` where month0 is 0..=11.
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidMonth(s.to_string()))?;
    Ok((d.year(), d.month0()))
}

/// `(year, month0)` of the month containing `d`.
pub fn month_of(d: &NaiveDate) -> (i32, u32) {
    (d.year(), d.month0())
}

pub fn current_month() -> (i32, u32) {
    month_of(&today())
}

/// Human label like `March 2025`; out-of-range months render blank.
pub fn month_label(year: i32, month0: u32) -> String {
    format!("{} {}", month_name(month0), year)
}

pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("")
}

/// `YYYY-MM` form used on the command line.
pub fn month_arg(year: i32, month0: u32) -> String {
    format!("{:04}-{:02}", year, month0 + 1)
}
