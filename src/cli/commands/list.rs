use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::month::MonthLogic;
use crate::core::{open_pool, require_active_profile};
use crate::errors::AppResult;
use crate::models::TaEntry;
use crate::ui::messages::{header, info};
use crate::utils::colors::{BOLD, GREY, RESET, color_for_optional_field};
use crate::utils::date::{current_month, month_label, parse_month};
use crate::utils::time::format_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { month } = cmd {
        let (year, month0) = match month {
            Some(m) => parse_month(m)?,
            None => current_month(),
        };
        let pool = open_pool(cfg)?;
        let profile = require_active_profile(&pool)?;

        let Some(data) = MonthLogic::load(&pool, profile.id, year, month0)? else {
            info(format!(
                "{} has not been opened for {}.",
                month_label(year, month0),
                profile.display_name()
            ));
            return Ok(());
        };

        header(format!("{} · {}", data.label(), profile.display_name()));
        if data.entries.is_empty() {
            info("No entries.");
            return Ok(());
        }

        println!(
            "{BOLD}{:>4}  {:<10}  {:<6}  {:<5}  {:<5}  {:<24}  {:>6}  {:>4}  {:>8}{RESET}",
            "ID", "Date", "Train", "Dep", "Arr", "Route", "Kms", "D/N", "Rate"
        );
        for e in &data.entries {
            print_row(e);
        }
        println!(
            "{BOLD}{:>4}  {:<66}  {:>8}{RESET}",
            "",
            format!("Total ({} entries)", data.entries.len()),
            data.total()
        );
    }

    Ok(())
}

fn print_row(e: &TaEntry) {
    let dep = format_time(e.departure_time);
    let arr = format_time(e.arrival_time);
    let dep_color = color_for_optional_field(Some(&dep));
    let arr_color = color_for_optional_field(Some(&arr));

    println!(
        "{:>4}  {:<10}  {:<6}  {dep_color}{:<5}{RESET}  {arr_color}{:<5}{RESET}  {:<24}  {:>6}  {:>4}  {:>8}",
        e.id,
        e.printed_date(),
        e.train_no,
        if dep.is_empty() { "--:--" } else { dep.as_str() },
        if arr.is_empty() { "--:--" } else { arr.as_str() },
        e.route(),
        e.kms,
        e.day_night().map(|d| d.label()).unwrap_or(""),
        e.rate,
    );
    if !e.purpose.is_empty() {
        println!("{GREY}{:>4}  {}{RESET}", "", e.purpose);
    }
}
