use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::errors::OnboardingError;
use crate::gateway::{DEFAULT_ENDPOINT, DEFAULT_SUBMIT_TIMEOUT};

const APP_DIR: &str = "onboarding_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Operator-tunable settings: where submissions go and how long to wait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub submit_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, OnboardingError> {
        let base = dirs::config_dir()
            .ok_or_else(|| {
                OnboardingError::Config("could not resolve a configuration directory".into())
            })?
            .join(APP_DIR);
        Self::from_base(base)
    }

    #[cfg(test)]
    pub fn with_base_dir(base: PathBuf) -> Result<Self, OnboardingError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, OnboardingError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Missing or never-written config falls back to defaults.
    pub fn load(&self) -> Result<Config, OnboardingError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), OnboardingError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(path: &Path) -> Result<(), OnboardingError> {
    fs::create_dir_all(path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), OnboardingError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_returns_defaults_when_nothing_was_saved() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.submit_timeout(), DEFAULT_SUBMIT_TIMEOUT);
    }

    #[test]
    fn saved_settings_round_trip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

        let config = Config {
            endpoint: "http://localhost:9000/api".into(),
            submit_timeout_secs: 10,
        };
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.endpoint, "http://localhost:9000/api");
        assert_eq!(loaded.submit_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn save_replaces_the_previous_file() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();

        manager.save(&Config::default()).unwrap();
        let config = Config {
            endpoint: "http://localhost:9000/api".into(),
            submit_timeout_secs: 5,
        };
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap().endpoint, "http://localhost:9000/api");
        assert!(!tmp_path(manager.path()).exists());
    }
}
