use crate::core::pagination::ROWS_PER_PAGE;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
    #[serde(default = "default_rate")]
    pub default_rate: String,
    #[serde(default = "default_day_night")]
    pub default_day_night: String,
    #[serde(default = "default_railway")]
    pub railway: String,
    #[serde(default = "default_governing_rule")]
    pub governing_rule: String,
    #[serde(default = "default_form_code")]
    pub form_code: String,
    /// Devanagari TrueType font for the PDF; system fonts are searched when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hindi_font: Option<String>,
}

fn default_rows_per_page() -> usize {
    ROWS_PER_PAGE
}
fn default_rate() -> String {
    "625".to_string()
}
fn default_day_night() -> String {
    "100%".to_string()
}
fn default_railway() -> String {
    "CENTRAL RAILWAY".to_string()
}
fn default_governing_rule() -> String {
    "New Rule".to_string()
}
fn default_form_code() -> String {
    "GA 31 SRC/G 1677".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            rows_per_page: default_rows_per_page(),
            default_rate: default_rate(),
            default_day_night: default_day_night(),
            railway: default_railway(),
            governing_rule: default_governing_rule(),
            form_code: default_form_code(),
            hindi_font: None,
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tajournal")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tajournal")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tajournal.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tajournal.sqlite")
    }

    /// Load configuration from the standard file, or defaults if missing.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(yaml: &str) -> AppResult<Self> {
        let cfg: Config =
            serde_yaml::from_str(yaml).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.rows()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Rows per printed page; zero is rejected.
    pub fn rows(&self) -> AppResult<NonZeroUsize> {
        NonZeroUsize::new(self.rows_per_page)
            .ok_or_else(|| AppError::Config("rows_per_page must be at least 1".into()))
    }

    /// Resolve a database name given on the command line: relative names
    /// live in the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => Self::resolve_database(&name),
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path.clone());

        if !is_test {
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
