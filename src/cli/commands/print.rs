use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::open_pool;
use crate::core::print::{PrintLogic, PrintRequest};
use crate::errors::AppResult;
use crate::utils::date::parse_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Print {
        month,
        format,
        file,
        force,
    } = cmd
    {
        let (year, month0) = parse_month(month)?;
        let pool = open_pool(cfg)?;

        PrintLogic::print(
            &pool,
            cfg,
            &PrintRequest {
                year,
                month: month0,
                format: *format,
                file: file.as_deref(),
                force: *force,
            },
        )?;
    }

    Ok(())
}
