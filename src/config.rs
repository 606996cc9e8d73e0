use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DEFAULT_CURRENCY: &str = "₱";
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

const DB_FILE: &str = "pesowise.db";
const LOG_FILE: &str = "pesowise.log";

/// Runtime settings, resolved from the environment with platform defaults.
///
/// - `PESOWISE_DATA_DIR`: where the database and log file live
/// - `PESOWISE_CURRENCY`: symbol printed in front of amounts
/// - `PESOWISE_LOG`: tracing filter, falling back to `RUST_LOG`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub data_dir: PathBuf,
    pub currency: String,
    pub log_filter: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match non_empty("PESOWISE_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let currency = non_empty("PESOWISE_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into());
        let log_filter = non_empty("PESOWISE_LOG")
            .or_else(|| non_empty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Self {
            data_dir,
            currency,
            log_filter,
        })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "pesowise", "PesoWise")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| env.get(k).cloned()).unwrap()
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PESOWISE_DATA_DIR", "/tmp/pw"),
            ("PESOWISE_CURRENCY", "$"),
            ("PESOWISE_LOG", "debug"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pw"));
        assert_eq!(config.currency, "$");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/pw/pesowise.db"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/pw/pesowise.log"));
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("PESOWISE_DATA_DIR", "/tmp/pw")]);
        assert_eq!(config.currency, DEFAULT_CURRENCY);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_rust_log_fallback() {
        let config = config_from(&[("PESOWISE_DATA_DIR", "/tmp/pw"), ("RUST_LOG", "warn")]);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = config_from(&[("PESOWISE_DATA_DIR", "/tmp/pw"), ("PESOWISE_CURRENCY", "  ")]);
        assert_eq!(config.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_ensure_data_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let config = config_from(&[("PESOWISE_DATA_DIR", nested.to_str().unwrap())]);
        config.ensure_data_dir().unwrap();
        assert!(nested.is_dir());
    }
}
