use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_page_size")]
    pub activity_page_size: i64,
}

fn default_page_size() -> i64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            activity_page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".crewledger")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("crewledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("crewledger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("failed to parse {}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left alone (only the DB is touched).
    pub fn init_all(is_test: bool) -> AppResult<()> {
        let dir = Self::config_dir();

        if !is_test {
            fs::create_dir_all(&dir)?;

            let config = Config::default();
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("failed to serialize config: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            crate::ui::messages::success(format!("Config file: {:?}", Self::config_file()));
        }

        Ok(())
    }
}
