use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::AppConfig;

const CONFIG_FILE: &str = "config.toml";

/// Loads and saves [`AppConfig`] as TOML.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the per-user config file, falling back to the working
    /// directory when no home directory can be resolved.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
            None => {
                log::warn!("Unable to resolve project directory; using current dir for config");
                PathBuf::from(CONFIG_FILE)
            }
        }
    }

    /// Directory that relative database paths are resolved against.
    pub fn data_dir() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file, returning defaults when it does not exist yet.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::info!("No config at {}; using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read config from {}", self.path.display()))?;
        let config: AppConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse config from {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config {}: {}", self.path.display(), e))?;

        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid config: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write config to {}", self.path.display()))?;
        Ok(())
    }

    /// Absolute location of the event database for `config`.
    pub fn resolve_database_path(config: &AppConfig) -> PathBuf {
        if config.database_path.is_absolute() {
            config.database_path.clone()
        } else {
            Self::data_dir().join(&config.database_path)
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "YouthMinistry", "MinistryEvents")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path().join("absent.toml"));

        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path().join("nested").join("config.toml"));

        let config = AppConfig {
            database_path: PathBuf::from("/srv/ministry/events.db"),
            refresh_interval_secs: 5,
            upcoming_only: true,
        };
        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "refresh_interval_secs = 0\n").unwrap();

        let err = ConfigService::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "refresh_interval_secs = \"soon\"\n").unwrap();

        assert!(ConfigService::new(&path).load().is_err());
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(dir.path().join("config.toml"));
        let config = AppConfig {
            refresh_interval_secs: 0,
            ..AppConfig::default()
        };

        assert!(service.save(&config).is_err());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_absolute_database_path_kept() {
        let config = AppConfig {
            database_path: std::env::temp_dir().join("events.db"),
            ..AppConfig::default()
        };
        assert_eq!(
            ConfigService::resolve_database_path(&config),
            config.database_path
        );
    }
}
