use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::{EntryFields, EntryLogic};
use crate::core::{open_pool, require_active_profile};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, fields, edit } = cmd {
        let d = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
        let pool = open_pool(cfg)?;
        let profile = require_active_profile(&pool)?;
        let mut fields = EntryFields::from(fields);

        match edit {
            Some(id) => {
                fields.date = Some(d);
                let e = EntryLogic::edit(&pool, profile.id, *id, &fields)?;
                success(format!("Entry #{} updated ({}, {})", e.id, e.printed_date(), e.route()));
            }
            None => {
                let e = EntryLogic::add(&pool, cfg, profile.id, d, &fields)?;
                success(format!("Entry #{} added ({}, {})", e.id, e.printed_date(), e.route()));
            }
        }
    }

    Ok(())
}
