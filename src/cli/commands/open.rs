use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::month::MonthLogic;
use crate::core::{open_pool, require_active_profile};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::parse_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Open { month } = cmd {
        let (year, month0) = parse_month(month)?;
        let pool = open_pool(cfg)?;
        let profile = require_active_profile(&pool)?;

        let data = MonthLogic::open(&pool, profile.id, year, month0)?;
        info(format!(
            "{} opened for {}: {} entr{}",
            data.label(),
            profile.display_name(),
            data.entries.len(),
            if data.entries.len() == 1 { "y" } else { "ies" }
        ));
    }

    Ok(())
}
