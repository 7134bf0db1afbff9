//! Repository interfaces over persisted journal data.
//!
//! Commands talk to storage through these traits; the page planner only
//! ever receives the loaded values.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::{MonthData, TaEntry, UserProfile};

const ACTIVE_PROFILE_KEY: &str = "last_profile";

pub trait ProfileStore {
    fn profiles(&self) -> AppResult<Vec<UserProfile>>;
    fn profile(&self, id: i64) -> AppResult<Option<UserProfile>>;
    /// Insert when `id == 0`, update otherwise. Returns the stored id.
    fn save_profile(&self, profile: &UserProfile) -> AppResult<i64>;
    fn active_profile_id(&self) -> AppResult<Option<i64>>;
    fn set_active_profile(&self, id: i64) -> AppResult<()>;

    /// The active profile, if one is set and still exists.
    fn active_profile(&self) -> AppResult<Option<UserProfile>> {
        match self.active_profile_id()? {
            Some(id) => self.profile(id),
            None => Ok(None),
        }
    }
}

pub trait EntryStore {
    /// A month that was created before, with its entries in journal order.
    fn month(&self, profile_id: i64, year: i32, month: u32) -> AppResult<Option<MonthData>>;
    /// Like [`EntryStore::month`], creating an empty month when missing.
    fn create_or_get_month(&self, profile_id: i64, year: i32, month: u32) -> AppResult<MonthData>;
    /// Insert when `entry.id == 0`, update otherwise. The entry is filed
    /// under the month of its date. Returns the stored id.
    fn save_entry(&self, profile_id: i64, entry: &TaEntry) -> AppResult<i64>;
    /// An entry owned by `profile_id`.
    fn entry(&self, profile_id: i64, id: i64) -> AppResult<Option<TaEntry>>;
    fn delete_entry(&self, profile_id: i64, id: i64) -> AppResult<bool>;

    /// Store a copy of the month's last entry; `None` when the month is
    /// missing or empty.
    fn duplicate_last(&self, profile_id: i64, year: i32, month: u32) -> AppResult<Option<TaEntry>> {
        let Some(data) = self.month(profile_id, year, month)? else {
            return Ok(None);
        };
        let Some(last) = data.entries.last() else {
            return Ok(None);
        };

        let mut copy = last.clone();
        copy.id = 0;
        copy.id = self.save_entry(profile_id, &copy)?;
        Ok(Some(copy))
    }
}

fn owner_of(month_id: &str) -> Option<i64> {
    month_id.rsplit('-').next().and_then(|s| s.parse().ok())
}

impl ProfileStore for DbPool {
    fn profiles(&self) -> AppResult<Vec<UserProfile>> {
        queries::load_profiles(&self.conn)
    }

    fn profile(&self, id: i64) -> AppResult<Option<UserProfile>> {
        queries::load_profile(&self.conn, id)
    }

    fn save_profile(&self, profile: &UserProfile) -> AppResult<i64> {
        if profile.id == 0 {
            queries::insert_profile(&self.conn, profile)
        } else {
            queries::update_profile(&self.conn, profile)?;
            Ok(profile.id)
        }
    }

    fn active_profile_id(&self) -> AppResult<Option<i64>> {
        Ok(queries::get_setting(&self.conn, ACTIVE_PROFILE_KEY)?
            .and_then(|v| v.parse().ok()))
    }

    fn set_active_profile(&self, id: i64) -> AppResult<()> {
        if queries::load_profile(&self.conn, id)?.is_none() {
            return Err(AppError::ProfileNotFound(id));
        }
        queries::set_setting(&self.conn, ACTIVE_PROFILE_KEY, &id.to_string())
    }
}

impl EntryStore for DbPool {
    fn month(&self, profile_id: i64, year: i32, month: u32) -> AppResult<Option<MonthData>> {
        let id = MonthData::key(year, month, profile_id);
        if !queries::month_exists(&self.conn, &id)? {
            return Ok(None);
        }

        let mut data = MonthData::empty(year, month, profile_id);
        data.entries = queries::load_entries(&self.conn, &id)?;
        data.sort_entries();
        Ok(Some(data))
    }

    fn create_or_get_month(&self, profile_id: i64, year: i32, month: u32) -> AppResult<MonthData> {
        queries::ensure_month(&self.conn, profile_id, year, month)?;
        self.month(profile_id, year, month)?
            .ok_or_else(|| AppError::MonthNotFound(MonthData::key(year, month, profile_id)))
    }

    fn save_entry(&self, profile_id: i64, entry: &TaEntry) -> AppResult<i64> {
        if entry.id != 0 && self.entry(profile_id, entry.id)?.is_none() {
            return Err(AppError::EntryNotFound(entry.id));
        }

        let (year, month) = crate::utils::date::month_of(&entry.date);
        queries::ensure_month(&self.conn, profile_id, year, month)?;
        let month_id = queries::month_id_for(profile_id, entry);

        if entry.id == 0 {
            return queries::insert_entry(&self.conn, &month_id, entry);
        }
        queries::update_entry(&self.conn, &month_id, entry)?;
        Ok(entry.id)
    }

    fn entry(&self, profile_id: i64, id: i64) -> AppResult<Option<TaEntry>> {
        Ok(queries::load_entry(&self.conn, id)?
            .filter(|(month_id, _)| owner_of(month_id) == Some(profile_id))
            .map(|(_, e)| e))
    }

    fn delete_entry(&self, profile_id: i64, id: i64) -> AppResult<bool> {
        if self.entry(profile_id, id)?.is_none() {
            return Ok(false);
        }
        queries::delete_entry(&self.conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn profile(pool: &DbPool, name: &str) -> i64 {
        let p = UserProfile {
            name: name.into(),
            designation: "PMA".into(),
            ..Default::default()
        };
        pool.save_profile(&p).unwrap()
    }

    fn entry(day: u32, dep: &str, train: &str) -> TaEntry {
        let mut e = TaEntry::new(NaiveDate::from_ymd_opt(2025, 3, day).unwrap());
        e.departure_time = NaiveTime::parse_from_str(dep, "%H:%M").ok();
        e.train_no = train.into();
        e.rate = "625".into();
        e
    }

    #[test]
    fn active_profile_is_persisted() {
        let pool = DbPool::in_memory();
        assert!(pool.active_profile().unwrap().is_none());

        let a = profile(&pool, "Asha");
        let b = profile(&pool, "Bhanu");
        pool.set_active_profile(b).unwrap();
        assert_eq!(pool.active_profile().unwrap().unwrap().name, "Bhanu");

        pool.set_active_profile(a).unwrap();
        assert_eq!(pool.active_profile_id().unwrap(), Some(a));

        assert!(matches!(
            pool.set_active_profile(99),
            Err(AppError::ProfileNotFound(99))
        ));
    }

    #[test]
    fn month_is_created_empty_on_first_access() {
        let pool = DbPool::in_memory();
        let p = profile(&pool, "Asha");

        assert!(pool.month(p, 2025, 2).unwrap().is_none());
        let m = pool.create_or_get_month(p, 2025, 2).unwrap();
        assert_eq!(m.id, "2025-2-1");
        assert!(m.entries.is_empty());
        assert!(pool.month(p, 2025, 2).unwrap().is_some());
    }

    #[test]
    fn month_that_cannot_be_read_back_is_not_found() {
        let pool = DbPool::in_memory();
        let p = profile(&pool, "Asha");
        pool.conn
            .execute_batch(
                "CREATE TEMP TRIGGER drop_new_month AFTER INSERT ON months
                 BEGIN DELETE FROM months WHERE id = NEW.id; END;",
            )
            .unwrap();

        let err = pool.create_or_get_month(p, 2025, 2).unwrap_err();
        assert!(matches!(err, AppError::MonthNotFound(ref id) if id == "2025-2-1"));
        assert_eq!(err.to_string(), "Month not found: 2025-2-1");
    }

    #[test]
    fn entries_come_back_in_journal_order() {
        let pool = DbPool::in_memory();
        let p = profile(&pool, "Asha");

        pool.save_entry(p, &entry(12, "09:00", "C")).unwrap();
        pool.save_entry(p, &entry(3, "18:30", "B")).unwrap();
        pool.save_entry(p, &entry(3, "06:10", "A")).unwrap();
        pool.save_entry(p, &entry(12, "09:00", "D")).unwrap();

        let m = pool.month(p, 2025, 2).unwrap().unwrap();
        let trains: Vec<&str> = m.entries.iter().map(|e| e.train_no.as_str()).collect();
        assert_eq!(trains, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn editing_an_entry_keeps_order_and_can_move_month() {
        let pool = DbPool::in_memory();
        let p = profile(&pool, "Asha");

        let id = pool.save_entry(p, &entry(20, "10:00", "X")).unwrap();
        pool.save_entry(p, &entry(5, "10:00", "Y")).unwrap();

        let mut e = pool.entry(p, id).unwrap().unwrap();
        e.date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        pool.save_entry(p, &e).unwrap();
        let m = pool.month(p, 2025, 2).unwrap().unwrap();
        assert_eq!(m.entries[0].train_no, "X");

        e.date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        pool.save_entry(p, &e).unwrap();
        assert_eq!(pool.month(p, 2025, 2).unwrap().unwrap().entries.len(), 1);
        assert_eq!(pool.month(p, 2025, 3).unwrap().unwrap().entries.len(), 1);
    }

    #[test]
    fn entries_are_scoped_to_their_profile() {
        let pool = DbPool::in_memory();
        let a = profile(&pool, "Asha");
        let b = profile(&pool, "Bhanu");

        let id = pool.save_entry(a, &entry(1, "08:00", "A1")).unwrap();
        assert!(pool.entry(b, id).unwrap().is_none());
        assert!(!pool.delete_entry(b, id).unwrap());

        let mut stolen = entry(1, "08:00", "B1");
        stolen.id = id;
        assert!(matches!(
            pool.save_entry(b, &stolen),
            Err(AppError::EntryNotFound(_))
        ));

        assert!(pool.delete_entry(a, id).unwrap());
        assert!(pool.entry(a, id).unwrap().is_none());
    }

    #[test]
    fn unknown_profile_update_fails() {
        let pool = DbPool::in_memory();
        let ghost = UserProfile {
            id: 42,
            ..Default::default()
        };
        assert!(matches!(
            pool.save_profile(&ghost),
            Err(AppError::ProfileNotFound(42))
        ));
    }
}
