use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::core::{open_pool, require_active_profile};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::{month_arg, parse_month};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dup { month } = cmd {
        let (year, month0) = parse_month(month)?;
        let pool = open_pool(cfg)?;
        let profile = require_active_profile(&pool)?;

        let copy = EntryLogic::duplicate_last(&pool, profile.id, year, month0)?
            .ok_or_else(|| AppError::EmptyMonth(month_arg(year, month0)))?;
        success(format!(
            "Entry #{} added as a copy ({}, {})",
            copy.id,
            copy.printed_date(),
            copy.route()
        ));
    }

    Ok(())
}
