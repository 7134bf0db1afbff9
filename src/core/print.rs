use crate::config::Config;
use crate::core::pagination::plan_document;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::store::{EntryStore, ProfileStore};
use crate::errors::AppResult;
use crate::print::{self, FormSettings, PrintFormat, Target};
use crate::utils::date::month_arg;

/// Options of a `print` run.
pub struct PrintRequest<'a> {
    pub year: i32,
    pub month: u32,
    pub format: PrintFormat,
    pub file: Option<&'a str>,
    pub force: bool,
}

pub struct PrintLogic;

impl PrintLogic {
    /// Load the active profile and the requested month, plan the pages and
    /// hand them to the renderer. Returns the number of pages produced.
    pub fn print(pool: &DbPool, cfg: &Config, req: &PrintRequest<'_>) -> AppResult<usize> {
        let profile = pool.active_profile()?;
        let month = match &profile {
            Some(p) => pool.month(p.id, req.year, req.month)?,
            None => None,
        };

        let doc = plan_document(profile.as_ref(), month.as_ref(), cfg.rows()?)?;
        let target = Target::resolve(req.format, req.file, req.force)?;
        print::render(&doc, &FormSettings::from(cfg), req.format, &target)?;

        if let Target::File { path } = &target {
            audit(
                &pool.conn,
                "print",
                &month_arg(req.year, req.month),
                &format!(
                    "{} page(s) as {} to {}",
                    doc.pages.len(),
                    req.format.as_str(),
                    path.display()
                ),
            );
        }
        Ok(doc.pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::{EntryFields, EntryLogic};
    use crate::core::profile::{ProfileFields, ProfileLogic};
    use crate::errors::AppError;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn request(file: Option<&str>, format: PrintFormat) -> PrintRequest<'_> {
        PrintRequest {
            year: 2025,
            month: 2,
            format,
            file,
            force: true,
        }
    }

    #[test]
    fn printing_without_profile_is_a_precondition_error() {
        let pool = DbPool::in_memory();
        let err = PrintLogic::print(&pool, &Config::default(), &request(None, PrintFormat::Json))
            .unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn printing_an_unopened_month_is_a_precondition_error() {
        let pool = DbPool::in_memory();
        ProfileLogic::add(&pool, &ProfileFields::default()).unwrap();
        let err = PrintLogic::print(&pool, &Config::default(), &request(None, PrintFormat::Text))
            .unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn pdf_file_gets_one_page_per_thirteen_entries() {
        let pool = DbPool::in_memory();
        let cfg = Config::default();
        let p = ProfileLogic::add(&pool, &ProfileFields::default()).unwrap();
        for day in 1..=14 {
            let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
            EntryLogic::add(&pool, &cfg, p.id, date, &EntryFields::default()).unwrap();
        }

        let out = env::temp_dir().join("tajournal_core_print_test.pdf");
        let out_str = out.to_string_lossy().to_string();
        let pages = PrintLogic::print(&pool, &cfg, &request(Some(&out_str), PrintFormat::Pdf))
            .unwrap();
        assert_eq!(pages, 2);

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        fs::remove_file(&out).ok();
    }
}
