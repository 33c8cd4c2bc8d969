use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::DEFAULT_BASE_URL;
use crate::app::{Background, Presentation, WidgetLayout};
use crate::error::AppError;
use crate::units::Units;

/// Settings stored on disk between runs.
///
/// Example TOML:
/// ```toml
/// base_url = "https://weather-backend-ugpk.onrender.com"
/// background = "gradient"
/// layout = "cards"
/// units = "metric"
/// last_city = "Lisbon"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,

    /// Request timeout. Absent means requests wait indefinitely.
    pub timeout_secs: Option<u64>,

    pub background: Background,
    pub layout: WidgetLayout,
    pub units: Units,

    /// Last city that was looked up successfully.
    pub last_city: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            background: Background::default(),
            layout: WidgetLayout::default(),
            units: Units::default(),
            last_city: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn presentation(&self) -> Presentation {
        Presentation {
            background: self.background,
            layout: self.layout,
            units: self.units,
        }
    }

    /// Load from the platform config directory, or defaults on first run.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`Config::load`], but an unreadable file or a missing home
    /// directory gives defaults instead of stopping the program.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    fn or_default(loaded: Result<Self, AppError>) -> Self {
        loaded.unwrap_or_else(|err| {
            warn!(error = %err, "could not load config, using defaults");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Write the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let write_err = |source: std::io::Error| AppError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml).map_err(write_err)
    }

    pub fn config_file_path() -> Result<PathBuf, AppError> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn default_log_path() -> Result<PathBuf, AppError> {
        Ok(project_dirs()?.data_dir().join("wxcity.log"))
    }
}

fn project_dirs() -> Result<ProjectDirs, AppError> {
    ProjectDirs::from("dev", "wxcity", "wxcity").ok_or(AppError::NoProjectDirs)
}
