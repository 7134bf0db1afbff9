use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::{open_pool, require_active_profile};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let pool = open_pool(cfg)?;
        let profile = require_active_profile(&pool)?;

        let e = DeleteLogic::apply(&pool, profile.id, *id)?;
        success(format!("Deleted entry #{} of {}", e.id, e.printed_date()));
    }

    Ok(())
}
