pub mod del;
pub mod entry;
pub mod log;
pub mod month;
pub mod pagination;
pub mod print;
pub mod profile;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::store::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;

/// Open the configured database, applying pending migrations.
pub fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// The active profile, or a precondition error pointing at `profile add`.
pub fn require_active_profile<S: ProfileStore>(store: &S) -> AppResult<UserProfile> {
    store.active_profile()?.ok_or_else(|| {
        AppError::Precondition("no active profile (create one with `profile add`)".into())
    })
}
