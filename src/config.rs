use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{Difficulty, SessionConfig};

/// Persisted setup defaults. Session state itself is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub role: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
    pub company_type: String,
    pub total_questions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for Config {
    fn from(sc: &SessionConfig) -> Self {
        Self {
            role: sc.role.clone(),
            difficulty: sc.difficulty,
            duration_minutes: sc.duration_minutes,
            company_type: sc.company_type.clone(),
            total_questions: sc.total_questions,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            role: cfg.role.clone(),
            difficulty: cfg.difficulty,
            duration_minutes: cfg.duration_minutes,
            company_type: cfg.company_type.clone(),
            total_questions: cfg.total_questions,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "intervu") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("intervu_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            role: "data-scientist".into(),
            difficulty: Difficulty::Advanced,
            duration_minutes: 45,
            company_type: "startup".into(),
            total_questions: 5,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn config_converts_to_session_config_and_back() {
        let cfg = Config {
            role: "product-manager".into(),
            difficulty: Difficulty::Beginner,
            duration_minutes: 15,
            company_type: "enterprise".into(),
            total_questions: 4,
        };
        let session: SessionConfig = (&cfg).into();
        assert_eq!(Config::from(&session), cfg);
    }
}
