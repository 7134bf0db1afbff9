use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::TaEntry;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one entry of the active profile and return what was removed.
    pub fn apply(pool: &DbPool, profile_id: i64, id: i64) -> AppResult<TaEntry> {
        let entry = pool
            .entry(profile_id, id)?
            .ok_or(AppError::EntryNotFound(id))?;

        if !pool.delete_entry(profile_id, id)? {
            return Err(AppError::EntryNotFound(id));
        }

        audit(
            &pool.conn,
            "del",
            &entry.date_str(),
            &format!("Deleted entry #{} ({})", id, entry.route()),
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::ProfileStore;
    use crate::models::UserProfile;
    use chrono::NaiveDate;

    #[test]
    fn deleting_twice_reports_missing_entry() {
        let pool = DbPool::in_memory();
        let p = pool.save_profile(&UserProfile::default()).unwrap();
        let e = TaEntry::new(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        let id = pool.save_entry(p, &e).unwrap();

        let removed = DeleteLogic::apply(&pool, p, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(matches!(
            DeleteLogic::apply(&pool, p, id),
            Err(AppError::EntryNotFound(_))
        ));

        // the month survives with no entries
        let m = pool.month(p, 2025, 2).unwrap().unwrap();
        assert!(m.entries.is_empty());
    }
}
