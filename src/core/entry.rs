use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::{DayNight, TaEntry};
use crate::utils::date::month_arg;
use crate::utils::time::parse_optional_time;
use chrono::NaiveDate;

/// Entry fields given on the command line; `None` leaves a field as is,
/// an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct EntryFields {
    pub date: Option<NaiveDate>,
    pub train_no: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub from_station: Option<String>,
    pub to_station: Option<String>,
    pub kms: Option<String>,
    pub day_night: Option<String>,
    pub purpose: Option<String>,
    pub rate: Option<String>,
    pub conveyance_distance: Option<String>,
    pub reference: Option<String>,
}

impl EntryFields {
    /// Validate the typed input and copy it onto `e`. Nothing is written
    /// when any field is invalid.
    pub fn apply(&self, e: &mut TaEntry) -> AppResult<()> {
        let departure = match &self.departure {
            Some(_) => Some(parse_optional_time(self.departure.as_ref())?),
            None => None,
        };
        let arrival = match &self.arrival {
            Some(_) => Some(parse_optional_time(self.arrival.as_ref())?),
            None => None,
        };
        let day_night = match &self.day_night {
            Some(raw) => Some(
                DayNight::from_input(raw).ok_or_else(|| AppError::InvalidDayNight(raw.clone()))?,
            ),
            None => None,
        };

        if let Some(d) = self.date {
            e.date = d;
        }
        if let Some(t) = departure {
            e.departure_time = t;
        }
        if let Some(t) = arrival {
            e.arrival_time = t;
        }
        if let Some(dn) = day_night {
            e.day_night_percent = dn.label().to_string();
        }

        let set = |dst: &mut String, src: &Option<String>| {
            if let Some(v) = src {
                *dst = v.trim().to_string();
            }
        };
        set(&mut e.train_no, &self.train_no);
        set(&mut e.from_station, &self.from_station);
        set(&mut e.to_station, &self.to_station);
        set(&mut e.kms, &self.kms);
        set(&mut e.purpose, &self.purpose);
        set(&mut e.rate, &self.rate);
        set(&mut e.conveyance_distance, &self.conveyance_distance);
        set(&mut e.reference, &self.reference);

        Ok(())
    }
}

/// High-level logic for creating, editing and duplicating journey entries.
pub struct EntryLogic;

impl EntryLogic {
    /// New entry for `date`, seeded with the configured defaults.
    pub fn add(
        pool: &DbPool,
        cfg: &Config,
        profile_id: i64,
        date: NaiveDate,
        fields: &EntryFields,
    ) -> AppResult<TaEntry> {
        let mut entry = TaEntry::new(date);
        entry.rate = cfg.default_rate.clone();
        if let Some(dn) = DayNight::from_input(&cfg.default_day_night) {
            entry.day_night_percent = dn.label().to_string();
        }
        fields.apply(&mut entry)?;

        entry.id = pool.save_entry(profile_id, &entry)?;

        audit(
            &pool.conn,
            "add",
            &entry.date_str(),
            &format!("Added entry #{} ({})", entry.id, entry.route()),
        );
        Ok(entry)
    }

    pub fn edit(pool: &DbPool, profile_id: i64, id: i64, fields: &EntryFields) -> AppResult<TaEntry> {
        let mut entry = pool
            .entry(profile_id, id)?
            .ok_or(AppError::EntryNotFound(id))?;
        fields.apply(&mut entry)?;
        pool.save_entry(profile_id, &entry)?;

        audit(
            &pool.conn,
            "edit",
            &entry.date_str(),
            &format!("Edited entry #{}", id),
        );
        Ok(entry)
    }

    /// Copy the month's last entry as a new entry. `None` when the month
    /// has no entries.
    pub fn duplicate_last(
        pool: &DbPool,
        profile_id: i64,
        year: i32,
        month: u32,
    ) -> AppResult<Option<TaEntry>> {
        let Some(copy) = pool.duplicate_last(profile_id, year, month)? else {
            return Ok(None);
        };

        audit(
            &pool.conn,
            "dup",
            &copy.date_str(),
            &format!("Duplicated last entry of {} as #{}", month_arg(year, month), copy.id),
        );
        Ok(Some(copy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{ProfileFields, ProfileLogic};

    fn setup() -> (DbPool, Config, i64) {
        let pool = DbPool::in_memory();
        let cfg = Config::default();
        let p = ProfileLogic::add(
            &pool,
            &ProfileFields {
                name: Some("Asha".into()),
                ..Default::default()
            },
        )
        .unwrap();
        (pool, cfg, p.id)
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn new_entries_get_configured_defaults() {
        let (pool, cfg, p) = setup();
        let e = EntryLogic::add(&pool, &cfg, p, d(4), &EntryFields::default()).unwrap();
        assert_eq!(e.rate, "625");
        assert_eq!(e.day_night_percent, "100%");
        assert!(e.id > 0);
    }

    #[test]
    fn invalid_input_is_rejected_before_saving() {
        let (pool, cfg, p) = setup();
        let bad_time = EntryFields {
            departure: Some("7pm".into()),
            ..Default::default()
        };
        assert!(matches!(
            EntryLogic::add(&pool, &cfg, p, d(4), &bad_time),
            Err(AppError::InvalidTime(_))
        ));

        let bad_dn = EntryFields {
            day_night: Some("50%".into()),
            ..Default::default()
        };
        assert!(matches!(
            EntryLogic::add(&pool, &cfg, p, d(4), &bad_dn),
            Err(AppError::InvalidDayNight(_))
        ));

        assert!(pool.month(p, 2025, 2).unwrap().is_none());
    }

    #[test]
    fn edit_can_clear_a_time() {
        let (pool, cfg, p) = setup();
        let fields = EntryFields {
            departure: Some("06:40".into()),
            arrival: Some("10:15".into()),
            ..Default::default()
        };
        let e = EntryLogic::add(&pool, &cfg, p, d(4), &fields).unwrap();

        let clear = EntryFields {
            arrival: Some(String::new()),
            kms: Some("192".into()),
            ..Default::default()
        };
        let edited = EntryLogic::edit(&pool, p, e.id, &clear).unwrap();
        assert!(edited.departure_time.is_some());
        assert!(edited.arrival_time.is_none());
        assert_eq!(edited.kms, "192");
    }

    #[test]
    fn duplicate_copies_the_last_entry() {
        let (pool, cfg, p) = setup();
        assert!(EntryLogic::duplicate_last(&pool, p, 2025, 2).unwrap().is_none());

        let fields = EntryFields {
            train_no: Some("11007".into()),
            departure: Some("06:40".into()),
            ..Default::default()
        };
        EntryLogic::add(&pool, &cfg, p, d(2), &EntryFields::default()).unwrap();
        let last = EntryLogic::add(&pool, &cfg, p, d(9), &fields).unwrap();

        let copy = EntryLogic::duplicate_last(&pool, p, 2025, 2).unwrap().unwrap();
        assert_ne!(copy.id, last.id);
        assert_eq!(copy.train_no, "11007");

        let month = pool.month(p, 2025, 2).unwrap().unwrap();
        let ids: Vec<i64> = month.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids[1..], [last.id, copy.id]);
    }
}
