use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::forecast::{clamp_window, DEFAULT_WINDOW_MONTHS};

pub(crate) const DB_ENV: &str = "SCOUT_ADMIN_DB";
pub(crate) const LOG_ENV: &str = "SCOUT_ADMIN_LOG";
pub(crate) const MONTHS_ENV: &str = "SCOUT_ADMIN_MONTHS";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Process-wide settings, resolved once at start-up.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
    pub(crate) window_months: usize,
}

impl Config {
    pub(crate) fn load() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Ok(Self::resolve(data_dir, |key| std::env::var(key).ok()))
    }

    fn resolve(data_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = non_empty(DB_ENV)
            .map(|p| PathBuf::from(crate::run::shellexpand(p.trim())))
            .unwrap_or_else(|| data_dir.join("scout-admin.db"));
        let log_filter = non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let window_months = non_empty(MONTHS_ENV)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map(clamp_window)
            .unwrap_or(DEFAULT_WINDOW_MONTHS);

        Self {
            data_dir,
            db_path,
            log_filter,
            window_months,
        }
    }

    /// Create the data directory and the database's parent directory.
    pub(crate) fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("scout-admin.log")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "scout-admin", "ScoutAdmin")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(PathBuf::from("/data/scout"), |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]);
        assert_eq!(config.db_path, PathBuf::from("/data/scout/scout-admin.db"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.window_months, 12);
        assert_eq!(config.log_path(), PathBuf::from("/data/scout/scout-admin.log"));
    }

    #[test]
    fn test_db_override() {
        let config = resolve(&[(DB_ENV, "/tmp/other.db")]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = resolve(&[(DB_ENV, "  "), (LOG_ENV, "")]);
        assert_eq!(config.db_path, PathBuf::from("/data/scout/scout-admin.db"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_window_months_clamped() {
        assert_eq!(resolve(&[(MONTHS_ENV, "48")]).window_months, 24);
        assert_eq!(resolve(&[(MONTHS_ENV, "1")]).window_months, 3);
        assert_eq!(resolve(&[(MONTHS_ENV, "6")]).window_months, 6);
        assert_eq!(resolve(&[(MONTHS_ENV, "lots")]).window_months, 12);
    }

    #[test]
    fn test_log_filter_override() {
        let config = resolve(&[(LOG_ENV, "scout_admin=debug")]);
        assert_eq!(config.log_filter, "scout_admin=debug");
    }

    #[test]
    fn test_ensure_dirs_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("data"),
            db_path: dir.path().join("nested").join("x.db"),
            log_filter: "warn".into(),
            window_months: 12,
        };
        config.ensure_dirs().unwrap();
        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("nested").is_dir());
    }
}
