// src/config/settings.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::file::FileFilter;

const APP_DIR: &str = "statement-analyzer";
const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "STATEMENT_ANALYZER";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub picker: PickerSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Statement Analyzer".to_string(),
            width: 900.0,
            height: 700.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// Set to false to force the manual input path.
    pub enabled: bool,
    pub title: String,
    pub filter_name: String,
    pub extensions: Vec<String>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Select Financial Statement".to_string(),
            filter_name: "Financial Files".to_string(),
            extensions: ["csv", "pdf", "xlsx", "xls"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl PickerSettings {
    pub fn filter(&self) -> FileFilter {
        FileFilter::new(self.filter_name.clone(), self.extensions.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub top_merchants: usize,
    pub small_transaction_threshold: f64,
    /// Small transactions are only called out when there are more than this many.
    pub small_transaction_min_count: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_merchants: 5,
            small_transaction_threshold: 10.0,
            small_transaction_min_count: 5,
        }
    }
}

impl Settings {
    /// Loads settings from the platform config directory and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_settings_path().as_deref())
    }

    /// Layers an optional settings file and `STATEMENT_ANALYZER__*` variables
    /// over the built-in defaults. A missing file is not an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "reading settings file");
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to assemble settings sources")?
            .try_deserialize::<Settings>()
            .context("Failed to parse settings")?;

        Ok(settings)
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};

    // The environment is process-wide; settings tests must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sets variables for the lifetime of the guard.
    struct ScopedEnv(Vec<&'static str>);

    impl ScopedEnv {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                env::set_var(key, value);
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for key in &self.0 {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_cover_financial_extensions() {
        let settings = Settings::default();
        assert_eq!(settings.picker.extensions, vec!["csv", "pdf", "xlsx", "xls"]);
        assert_eq!(settings.analysis.top_merchants, 5);
        assert!(settings.picker.enabled);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _lock = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.window.title, "Statement Analyzer");
        assert_eq!(settings.analysis.small_transaction_threshold, 10.0);
    }

    #[test]
    fn file_overrides_only_named_keys() {
        let _lock = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[analysis]\ntop_merchants = 3\n\n[picker]\nenabled = false\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.analysis.top_merchants, 3);
        assert_eq!(settings.analysis.small_transaction_min_count, 5);
        assert!(!settings.picker.enabled);
        assert_eq!(settings.picker.title, "Select Financial Statement");
    }

    #[test]
    fn malformed_file_is_reported() {
        let _lock = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[analysis]\ntop_merchants = \"many\"\n").unwrap();

        assert!(Settings::load_from(Some(&path)).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let _lock = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[analysis]\ntop_merchants = 3\n\n[picker]\nenabled = true\n").unwrap();

        let _env = ScopedEnv::set(&[
            ("STATEMENT_ANALYZER__ANALYSIS__TOP_MERCHANTS", "2"),
            ("STATEMENT_ANALYZER__PICKER__ENABLED", "false"),
        ]);

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.analysis.top_merchants, 2);
        assert!(!settings.picker.enabled);
        assert_eq!(settings.analysis.small_transaction_min_count, 5);
    }
}
