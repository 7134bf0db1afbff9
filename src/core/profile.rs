use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;

/// Profile fields given on the command line; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub station: Option<String>,
    pub pay_level: Option<String>,
    pub basic_pay: Option<String>,
    pub pf_number: Option<String>,
    pub headquarters: Option<String>,
    pub branch: Option<String>,
    pub division: Option<String>,
}

impl ProfileFields {
    pub fn apply(&self, p: &mut UserProfile) {
        let set = |dst: &mut String, src: &Option<String>| {
            if let Some(v) = src {
                *dst = v.trim().to_string();
            }
        };
        set(&mut p.name, &self.name);
        set(&mut p.designation, &self.designation);
        set(&mut p.station, &self.station);
        set(&mut p.pay_level, &self.pay_level);
        set(&mut p.basic_pay, &self.basic_pay);
        set(&mut p.pf_number, &self.pf_number);
        set(&mut p.headquarters, &self.headquarters);
        set(&mut p.branch, &self.branch);
        set(&mut p.division, &self.division);
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.designation,
            &self.station,
            &self.pay_level,
            &self.basic_pay,
            &self.pf_number,
            &self.headquarters,
            &self.branch,
            &self.division,
        ]
        .iter()
        .all(|f| f.is_none())
    }
}

/// High-level logic for the `profile` commands.
pub struct ProfileLogic;

impl ProfileLogic {
    /// Onboarding: store a new profile and make it the active one.
    pub fn add(pool: &DbPool, fields: &ProfileFields) -> AppResult<UserProfile> {
        let mut profile = UserProfile::default();
        fields.apply(&mut profile);

        profile.id = pool.save_profile(&profile)?;
        pool.set_active_profile(profile.id)?;

        audit(
            &pool.conn,
            "profile_add",
            &profile.id.to_string(),
            &format!("Created profile {}", profile.display_name()),
        );
        Ok(profile)
    }

    pub fn edit(pool: &DbPool, id: i64, fields: &ProfileFields) -> AppResult<UserProfile> {
        let mut profile = pool.profile(id)?.ok_or(AppError::ProfileNotFound(id))?;
        fields.apply(&mut profile);
        pool.save_profile(&profile)?;

        audit(
            &pool.conn,
            "profile_edit",
            &id.to_string(),
            &format!("Updated profile {}", profile.display_name()),
        );
        Ok(profile)
    }

    pub fn switch(pool: &DbPool, id: i64) -> AppResult<UserProfile> {
        pool.set_active_profile(id)?;
        let profile = pool.profile(id)?.ok_or(AppError::ProfileNotFound(id))?;

        audit(
            &pool.conn,
            "profile_switch",
            &id.to_string(),
            &format!("Active profile is now {}", profile.display_name()),
        );
        Ok(profile)
    }

    /// All profiles plus the id of the active one.
    pub fn list<S: ProfileStore>(store: &S) -> AppResult<(Vec<UserProfile>, Option<i64>)> {
        Ok((store.profiles()?, store.active_profile_id()?))
    }
}
