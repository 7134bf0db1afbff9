use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::open_pool;
use crate::core::profile::{ProfileFields, ProfileLogic};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };
    let pool = open_pool(cfg)?;

    match action {
        ProfileAction::Add { fields } => {
            let fields = ProfileFields::from(fields);
            if fields.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
                return Err(AppError::Precondition(
                    "a profile needs at least --name".into(),
                ));
            }
            let p = ProfileLogic::add(&pool, &fields)?;
            success(format!("Profile #{} created and active: {}", p.id, p.display_name()));
        }
        ProfileAction::Edit { id, fields } => {
            let fields = ProfileFields::from(fields);
            if fields.is_empty() {
                info("Nothing to change.");
                return Ok(());
            }
            let p = ProfileLogic::edit(&pool, *id, &fields)?;
            success(format!("Profile #{} updated: {}", p.id, p.display_name()));
        }
        ProfileAction::List => {
            let (profiles, active) = ProfileLogic::list(&pool)?;
            if profiles.is_empty() {
                info("No profiles yet. Create one with `profile add --name <NAME>`.");
                return Ok(());
            }
            for p in profiles {
                let is_active = active == Some(p.id);
                let (mark, color) = if is_active { ("*", GREEN) } else { (" ", GREY) };
                println!(
                    "{color}{mark} {:>3}  {:<24} {:<16} {:<10} {}{RESET}",
                    p.id, p.name, p.designation, p.division, p.headquarters
                );
            }
        }
        ProfileAction::Switch { id } => {
            let p = ProfileLogic::switch(&pool, *id)?;
            success(format!("Active profile: #{} {}", p.id, p.display_name()));
        }
    }

    Ok(())
}
