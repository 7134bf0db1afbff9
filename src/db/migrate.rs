use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250601_0001_initial_schema",
        description: "Created profiles, months, entries and settings tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL DEFAULT '',
            designation   TEXT NOT NULL DEFAULT '',
            station       TEXT NOT NULL DEFAULT '',
            pay_level     TEXT NOT NULL DEFAULT '',
            basic_pay     TEXT NOT NULL DEFAULT '',
            pf_number     TEXT NOT NULL DEFAULT '',
            headquarters  TEXT NOT NULL DEFAULT '',
            branch        TEXT NOT NULL DEFAULT '',
            division      TEXT NOT NULL DEFAULT '',
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS months (
            id          TEXT PRIMARY KEY,
            profile_id  INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
            year        INTEGER NOT NULL,
            month       INTEGER NOT NULL CHECK(month BETWEEN 0 AND 11),
            created_at  TEXT NOT NULL,
            UNIQUE(profile_id, year, month)
        );

        CREATE TABLE IF NOT EXISTS entries (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            month_id             TEXT NOT NULL REFERENCES months(id) ON DELETE CASCADE,
            date                 TEXT NOT NULL,
            train_no             TEXT NOT NULL DEFAULT '',
            departure_time       TEXT NOT NULL DEFAULT '',
            arrival_time         TEXT NOT NULL DEFAULT '',
            from_station         TEXT NOT NULL DEFAULT '',
            to_station           TEXT NOT NULL DEFAULT '',
            kms                  TEXT NOT NULL DEFAULT '',
            day_night            TEXT NOT NULL DEFAULT '100%',
            purpose              TEXT NOT NULL DEFAULT '',
            rate                 TEXT NOT NULL DEFAULT '',
            conveyance_distance  TEXT NOT NULL DEFAULT '',
            reference            TEXT NOT NULL DEFAULT '',
            created_at           TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS settings (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250715_0002_entries_journal_order_index",
        description: "Added journal-order index on entries",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_entries_month_order
            ON entries(month_id, date, departure_time, id);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    if is_applied(conn, m.version)? {
        return Ok(());
    }

    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Run every migration not yet recorded in `log`.
///
/// Invoked by `init` and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        apply(conn, m)?;
    }

    Ok(())
}

/// Versions already applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_run_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let versions = applied_versions(&conn).unwrap();
        assert_eq!(versions.len(), MIGRATIONS.len());
        assert_eq!(versions[0], "20250601_0001_initial_schema");
    }
}
