use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::EntryStore;
use crate::errors::AppResult;
use crate::models::MonthData;

pub struct MonthLogic;

impl MonthLogic {
    /// Open a month for the profile, creating it empty on first use.
    pub fn open(pool: &DbPool, profile_id: i64, year: i32, month: u32) -> AppResult<MonthData> {
        let existed = pool.month(profile_id, year, month)?.is_some();
        let data = pool.create_or_get_month(profile_id, year, month)?;

        if !existed {
            audit(
                &pool.conn,
                "open",
                &data.arg(),
                &format!("Opened {}", data.label()),
            );
        }
        Ok(data)
    }

    /// A month as stored, `None` if it was never opened.
    pub fn load<S: EntryStore>(
        store: &S,
        profile_id: i64,
        year: i32,
        month: u32,
    ) -> AppResult<Option<MonthData>> {
        store.month(profile_id, year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::load_log;
    use crate::db::store::ProfileStore;
    use crate::models::UserProfile;

    #[test]
    fn open_is_idempotent_and_logged_once() {
        let pool = DbPool::in_memory();
        let p = pool.save_profile(&UserProfile::default()).unwrap();

        assert!(MonthLogic::load(&pool, p, 2025, 0).unwrap().is_none());
        MonthLogic::open(&pool, p, 2025, 0).unwrap();
        MonthLogic::open(&pool, p, 2025, 0).unwrap();

        let opens = load_log(&pool.conn)
            .unwrap()
            .into_iter()
            .filter(|r| r.operation == "open")
            .count();
        assert_eq!(opens, 1);
        assert!(MonthLogic::load(&pool, p, 2025, 0).unwrap().is_some());
    }
}
