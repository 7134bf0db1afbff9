use crate::errors::{AppError, AppResult};
use crate::models::{MonthData, TaEntry, UserProfile};
use crate::utils::date::month_of;
use crate::utils::time::{format_time, parse_time};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ENTRY_COLUMNS: &str = "id, date, train_no, departure_time, arrival_time, from_station, \
     to_station, kms, day_night, purpose, rate, conveyance_distance, reference";

const PROFILE_COLUMNS: &str =
    "id, name, designation, station, pay_level, basic_pay, pf_number, headquarters, branch, division";

// ---------------------------
// Profiles
// ---------------------------

pub fn map_profile_row(row: &Row) -> Result<UserProfile> {
    Ok(UserProfile {
        id: row.get("id")?,
        name: row.get("name")?,
        designation: row.get("designation")?,
        station: row.get("station")?,
        pay_level: row.get("pay_level")?,
        basic_pay: row.get("basic_pay")?,
        pf_number: row.get("pf_number")?,
        headquarters: row.get("headquarters")?,
        branch: row.get("branch")?,
        division: row.get("division")?,
    })
}

pub fn load_profiles(conn: &Connection) -> AppResult<Vec<UserProfile>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([], map_profile_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_profile(conn: &Connection, id: i64) -> AppResult<Option<UserProfile>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_profile_row).optional()?)
}

pub fn insert_profile(conn: &Connection, p: &UserProfile) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO profiles (name, designation, station, pay_level, basic_pay, pf_number,
                               headquarters, branch, division, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            p.name,
            p.designation,
            p.station,
            p.pay_level,
            p.basic_pay,
            p.pf_number,
            p.headquarters,
            p.branch,
            p.division,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_profile(conn: &Connection, p: &UserProfile) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE profiles
         SET name = ?1, designation = ?2, station = ?3, pay_level = ?4, basic_pay = ?5,
             pf_number = ?6, headquarters = ?7, branch = ?8, division = ?9
         WHERE id = ?10",
        params![
            p.name,
            p.designation,
            p.station,
            p.pay_level,
            p.basic_pay,
            p.pf_number,
            p.headquarters,
            p.branch,
            p.division,
            p.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::ProfileNotFound(p.id));
    }
    Ok(())
}

// ---------------------------
// Settings
// ---------------------------

pub fn get_setting(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

// ---------------------------
// Months
// ---------------------------

pub fn month_exists(conn: &Connection, month_id: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM months WHERE id = ?1")?;
    Ok(stmt.exists([month_id])?)
}

/// Insert the month row if missing. Returns true when it was created.
pub fn ensure_month(conn: &Connection, profile_id: i64, year: i32, month: u32) -> AppResult<bool> {
    let id = MonthData::key(year, month, profile_id);
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO months (id, profile_id, year, month, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, profile_id, year, month, Local::now().to_rfc3339()],
    )?;
    Ok(inserted > 0)
}

// ---------------------------
// Entries
// ---------------------------

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_entry_row(row: &Row) -> Result<TaEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    // Times are optional; a value that does not parse is shown as blank.
    let dep: String = row.get("departure_time")?;
    let arr: String = row.get("arrival_time")?;

    Ok(TaEntry {
        id: row.get("id")?,
        date,
        train_no: row.get("train_no")?,
        departure_time: parse_time(&dep),
        arrival_time: parse_time(&arr),
        from_station: row.get("from_station")?,
        to_station: row.get("to_station")?,
        kms: row.get("kms")?,
        day_night_percent: row.get("day_night")?,
        purpose: row.get("purpose")?,
        rate: row.get("rate")?,
        conveyance_distance: row.get("conveyance_distance")?,
        reference: row.get("reference")?,
    })
}

/// Entries of a month in journal order. An empty departure time sorts
/// first; equal keys keep insertion order.
pub fn load_entries(conn: &Connection, month_id: &str) -> AppResult<Vec<TaEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM entries
         WHERE month_id = ?1
         ORDER BY date ASC, departure_time ASC, id ASC"
    ))?;
    let rows = stmt.query_map([month_id], map_entry_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Load an entry together with the id of the month it belongs to.
pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<(String, TaEntry)>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT month_id, {ENTRY_COLUMNS} FROM entries WHERE id = ?1"
    ))?;
    Ok(stmt
        .query_row([id], |row| Ok((row.get("month_id")?, map_entry_row(row)?)))
        .optional()?)
}

pub fn insert_entry(conn: &Connection, month_id: &str, e: &TaEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (month_id, date, train_no, departure_time, arrival_time,
                              from_station, to_station, kms, day_night, purpose, rate,
                              conveyance_distance, reference, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            month_id,
            e.date_str(),
            e.train_no,
            format_time(e.departure_time),
            format_time(e.arrival_time),
            e.from_station,
            e.to_station,
            e.kms,
            e.day_night_percent,
            e.purpose,
            e.rate,
            e.conveyance_distance,
            e.reference,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_entry(conn: &Connection, month_id: &str, e: &TaEntry) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE entries
         SET month_id = ?1, date = ?2, train_no = ?3, departure_time = ?4, arrival_time = ?5,
             from_station = ?6, to_station = ?7, kms = ?8, day_night = ?9, purpose = ?10,
             rate = ?11, conveyance_distance = ?12, reference = ?13
         WHERE id = ?14",
        params![
            month_id,
            e.date_str(),
            e.train_no,
            format_time(e.departure_time),
            format_time(e.arrival_time),
            e.from_station,
            e.to_station,
            e.kms,
            e.day_night_percent,
            e.purpose,
            e.rate,
            e.conveyance_distance,
            e.reference,
            e.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EntryNotFound(e.id));
    }
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<bool> {
    let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    Ok(deleted > 0)
}

/// Month id an entry should live in, derived from its date.
pub fn month_id_for(profile_id: i64, e: &TaEntry) -> String {
    let (year, month) = month_of(&e.date);
    MonthData::key(year, month, profile_id)
}
